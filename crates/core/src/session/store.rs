//! Durable, process-external bookkeeping of the current session.

use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use super::paths::SessionPaths;
use super::record::{SessionRecord, SESSION_RECORD_SCHEMA_VERSION};
use crate::error::{AutomationError, Result};

/// File-backed store holding at most one [`SessionRecord`].
///
/// `save` is atomic (temp file + rename in the same directory), so a reader
/// never observes a half-written record: a concurrent or killed writer
/// leaves either the old record or the new one.
#[derive(Debug, Clone)]
pub struct SessionStore {
    paths: SessionPaths,
}

impl SessionStore {
    pub fn new(paths: SessionPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &SessionPaths {
        &self.paths
    }

    /// Loads the current record, `Ok(None)` when none has been persisted.
    ///
    /// Unreadable or unparsable contents surface as
    /// [`AutomationError::StoreCorrupt`]; callers recover by discarding the
    /// store and creating a fresh session.
    pub fn load(&self) -> Result<Option<SessionRecord>> {
        let path = self.paths.record_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(AutomationError::StoreCorrupt(err.to_string())),
        };

        let value: serde_json::Value = serde_json::from_str(&content)
            .map_err(|err| AutomationError::StoreCorrupt(err.to_string()))?;
        let schema_version = value
            .get("schema_version")
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        if schema_version != SESSION_RECORD_SCHEMA_VERSION as u64 {
            return Err(AutomationError::StoreCorrupt(format!(
                "unsupported session record schema_version {schema_version} (expected {SESSION_RECORD_SCHEMA_VERSION})"
            )));
        }

        let record: SessionRecord = serde_json::from_value(value)
            .map_err(|err| AutomationError::StoreCorrupt(err.to_string()))?;
        Ok(Some(record))
    }

    /// Atomically persists `record`, replacing any prior one.
    pub fn save(&self, record: &SessionRecord) -> Result<()> {
        let path = self.paths.record_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = tmp_path(&path);
        fs::write(&tmp, serde_json::to_string_pretty(record)?)?;
        fs::rename(&tmp, &path)?;
        debug!(target = "ec.session", path = %path.display(), "saved session record");
        Ok(())
    }

    /// Removes the current record; an absent record is not an error.
    pub fn clear(&self) -> Result<()> {
        let path = self.paths.record_path();
        remove_if_present(&tmp_path(&path))?;
        remove_if_present(&path)
    }

    /// Takes the exclusive cross-process lock, blocking until available.
    ///
    /// Held across the whole load/probe/create/persist sequence so two
    /// overlapping invocations cannot both launch a browser.
    pub fn lock(&self) -> Result<StoreGuard> {
        StoreGuard::take(self.paths.lock_path(), true)
    }

    /// Non-blocking variant of [`SessionStore::lock`].
    pub fn try_lock(&self) -> Result<Option<StoreGuard>> {
        match StoreGuard::take(self.paths.lock_path(), false) {
            Ok(guard) => Ok(Some(guard)),
            Err(AutomationError::Io(err)) if err.kind() == ErrorKind::WouldBlock => Ok(None),
            Err(err) => Err(err),
        }
    }
}

fn tmp_path(path: &std::path::Path) -> PathBuf {
    path.with_extension("json.tmp")
}

fn remove_if_present(path: &std::path::Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Advisory exclusive lock on the store; released when the guard drops.
#[derive(Debug)]
pub struct StoreGuard {
    file: File,
}

impl StoreGuard {
    fn take(path: PathBuf, blocking: bool) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;
        lock_exclusive(&file, blocking)?;
        Ok(Self { file })
    }
}

impl Drop for StoreGuard {
    fn drop(&mut self) {
        unlock(&self.file);
    }
}

#[cfg(unix)]
fn lock_exclusive(file: &File, blocking: bool) -> Result<()> {
    use std::os::unix::io::AsRawFd;

    let mut flags = libc::LOCK_EX;
    if !blocking {
        flags |= libc::LOCK_NB;
    }
    let rc = unsafe { libc::flock(file.as_raw_fd(), flags) };
    if rc != 0 {
        return Err(std::io::Error::last_os_error().into());
    }
    Ok(())
}

#[cfg(unix)]
fn unlock(file: &File) {
    use std::os::unix::io::AsRawFd;

    unsafe {
        libc::flock(file.as_raw_fd(), libc::LOCK_UN);
    }
}

// Non-unix targets fall back to lock-file presence only; the atomic rename
// in `save` still keeps readers consistent.
#[cfg(not(unix))]
fn lock_exclusive(_file: &File, _blocking: bool) -> Result<()> {
    Ok(())
}

#[cfg(not(unix))]
fn unlock(_file: &File) {}
