use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current on-disk schema version for session records.
pub const SESSION_RECORD_SCHEMA_VERSION: u32 = 1;

fn session_record_schema_version() -> u32 {
    SESSION_RECORD_SCHEMA_VERSION
}

/// The addressable representation of a session, persisted by the
/// [`SessionStore`](super::SessionStore) so a later invocation can reattach
/// to the browser an earlier one launched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionRecord {
    /// Record schema version.
    #[serde(default = "session_record_schema_version")]
    pub schema_version: u32,
    /// Unique session identifier.
    pub session_id: String,
    /// Liveness flag; a record is only persisted once the browser answers.
    pub live: bool,
    /// PID of the spawned browser process.
    pub pid: u32,
    /// DevTools port the browser listens on.
    pub debug_port: u16,
    /// Reattachment reference: the CDP WebSocket endpoint.
    pub ws_endpoint: String,
    /// Whether the browser was launched headless.
    pub headless: bool,
    /// Unix epoch seconds when the session was created.
    pub created_at: u64,
    /// Unix epoch seconds of the last acquire/release.
    pub last_activity: u64,
}

impl SessionRecord {
    pub fn new(ws_endpoint: String, debug_port: u16, pid: u32, headless: bool) -> Self {
        let now = now_ts();
        Self {
            schema_version: SESSION_RECORD_SCHEMA_VERSION,
            session_id: Uuid::new_v4().to_string(),
            live: true,
            pid,
            debug_port,
            ws_endpoint,
            headless,
            created_at: now,
            last_activity: now,
        }
    }

    /// Bumps `last_activity` to now.
    pub fn touch(&mut self) {
        self.last_activity = now_ts();
    }

    /// Fast liveness probe: whether the recorded browser PID still exists.
    ///
    /// Advisory only; the reattachment probe is authoritative. PIDs can be
    /// recycled, and non-unix targets cannot probe cheaply, so a `true` here
    /// still has to be confirmed by a successful connect.
    pub fn is_alive(&self) -> bool {
        pid_is_alive(self.pid)
    }
}

#[cfg(unix)]
fn pid_is_alive(pid: u32) -> bool {
    if pid == 0 {
        return false;
    }
    // Signal 0 probes existence without delivering anything.
    unsafe { libc::kill(pid as libc::pid_t, 0) == 0 }
}

#[cfg(not(unix))]
fn pid_is_alive(_pid: u32) -> bool {
    true
}

/// Current Unix timestamp in seconds.
pub(crate) fn now_ts() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SessionRecord {
        SessionRecord::new("ws://127.0.0.1:9222/devtools/browser/abc".into(), 9222, 4242, true)
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = sample();
        let json = serde_json::to_string_pretty(&record).unwrap();
        let loaded: SessionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn new_record_is_live_with_fresh_timestamps() {
        let record = sample();
        assert!(record.live);
        assert_eq!(record.created_at, record.last_activity);
        assert!(record.created_at > 0);
        assert_eq!(record.schema_version, SESSION_RECORD_SCHEMA_VERSION);
    }

    #[test]
    fn touch_never_moves_last_activity_backwards() {
        let mut record = sample();
        let before = record.last_activity;
        record.touch();
        assert!(record.last_activity >= before);
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(sample().session_id, sample().session_id);
    }

    #[cfg(unix)]
    #[test]
    fn own_pid_is_alive() {
        let mut record = sample();
        record.pid = std::process::id();
        assert!(record.is_alive());
    }

    #[cfg(unix)]
    #[test]
    fn pid_zero_is_not_alive() {
        let mut record = sample();
        record.pid = 0;
        assert!(!record.is_alive());
    }
}
