use std::path::{Path, PathBuf};

/// On-disk layout for session state.
///
/// Defaults to an XDG-style state directory (`$XDG_STATE_HOME` or
/// `~/.local/state`) under `earthcall/`; `EARTHCALL_STATE_DIR` or an
/// explicit override relocates the whole tree, which keeps concurrent test
/// runs and scripts isolated from the user's real session.
#[derive(Debug, Clone)]
pub struct SessionPaths {
    state_dir: PathBuf,
}

impl SessionPaths {
    pub fn resolve(state_dir: Option<PathBuf>) -> Self {
        let state_dir = state_dir
            .or_else(|| std::env::var_os("EARTHCALL_STATE_DIR").map(PathBuf::from))
            .unwrap_or_else(default_state_dir);
        Self { state_dir }
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    /// The persisted session record.
    pub fn record_path(&self) -> PathBuf {
        self.state_dir.join("session.json")
    }

    /// Sibling lock file guarding the acquire/create/persist sequence.
    pub fn lock_path(&self) -> PathBuf {
        self.state_dir.join("session.lock")
    }

    /// Browser profile (`--user-data-dir`) for the session browser.
    pub fn profile_dir(&self) -> PathBuf {
        self.state_dir.join("profile")
    }
}

fn default_state_dir() -> PathBuf {
    std::env::var_os("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
        })
        .unwrap_or_else(|| PathBuf::from("."))
        .join("earthcall")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_override_wins() {
        let paths = SessionPaths::resolve(Some(PathBuf::from("/tmp/ec-test")));
        assert_eq!(paths.state_dir(), Path::new("/tmp/ec-test"));
        assert_eq!(paths.record_path(), PathBuf::from("/tmp/ec-test/session.json"));
        assert_eq!(paths.lock_path(), PathBuf::from("/tmp/ec-test/session.lock"));
        assert_eq!(paths.profile_dir(), PathBuf::from("/tmp/ec-test/profile"));
    }

    #[test]
    fn default_is_under_an_earthcall_dir() {
        let paths = SessionPaths::resolve(None);
        assert!(paths.record_path().ends_with("earthcall/session.json"));
    }
}
