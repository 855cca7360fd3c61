use thiserror::Error;

pub type Result<T> = std::result::Result<T, AutomationError>;

/// Error taxonomy for the agent.
///
/// `StoreCorrupt` and `StaleSession` are recovered inside the session layer
/// and normally never reach a caller; the rest map to process exit codes in
/// the CLI crate.
#[derive(Debug, Error)]
pub enum AutomationError {
    #[error("{0}")]
    Usage(String),

    #[error("no window matching: {fragment}")]
    WindowNotFound { fragment: String },

    #[error("no element with visible text: {text}")]
    ElementNotFound { text: String },

    #[error("no active page; run open-url first")]
    NoActivePage,

    #[error("timeout after {ms}ms waiting for: {operation}")]
    Timeout { ms: u64, operation: String },

    #[error("browser launch failed: {0}")]
    BrowserLaunch(String),

    #[error("navigation failed: {url}")]
    Navigation {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("session store unreadable: {0}")]
    StoreCorrupt(String),

    #[error("stale session: {0}")]
    StaleSession(String),

    #[error("{provider} provider failed: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Cdp(#[from] chromiumoxide::error::CdpError),
}

impl AutomationError {
    pub fn provider(provider: &'static str, message: impl Into<String>) -> Self {
        AutomationError::Provider {
            provider,
            message: message.into(),
        }
    }
}
