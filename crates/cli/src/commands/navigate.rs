use std::time::Duration;

use earthcall::{ActiveSession, AutomationError, Result, SessionManager};
use tracing::{debug, info};

/// Opens `url` on the session's page, creating or reattaching to the
/// session browser as needed, and leaves everything running for the next
/// invocation.
pub async fn execute(url: &str, timeout_ms: u64, manager: &SessionManager) -> Result<()> {
    let url = parse_url(url)?;
    info!(target = "ec", %url, "open url");

    let session = manager.acquire().await?;
    debug!(target = "ec", source = ?session.source(), "session acquired");

    let outcome = open(&session, url.as_str(), timeout_ms).await;
    // Keep-alive release even on failure; the command error takes precedence.
    let released = manager.release(session, true).await;
    outcome.and(released)
}

async fn open(session: &ActiveSession, url: &str, timeout_ms: u64) -> Result<()> {
    let page = session.open_or_reuse_page().await?;
    session
        .goto(&page, url, Duration::from_millis(timeout_ms))
        .await?;

    let final_url = page.url().await.ok().flatten().unwrap_or_else(|| url.to_string());
    let title = page.get_title().await.ok().flatten().unwrap_or_default();
    if title.is_empty() {
        println!("Opened {final_url}");
    } else {
        println!("Opened {final_url} ({title})");
    }
    Ok(())
}

/// A malformed URL is a usage error and must never touch session state.
fn parse_url(raw: &str) -> Result<url::Url> {
    url::Url::parse(raw).map_err(|err| AutomationError::Usage(format!("invalid url {raw:?}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_urls_parse() {
        assert!(parse_url("https://example.com/login").is_ok());
        assert!(parse_url("data:text/html,<h1>hi</h1>").is_ok());
        assert!(parse_url("file:///tmp/page.html").is_ok());
    }

    #[test]
    fn relative_or_garbage_urls_are_usage_errors() {
        for raw in ["example.com", "not a url", ""] {
            let err = parse_url(raw).unwrap_err();
            assert!(matches!(err, AutomationError::Usage(_)), "{raw}: {err}");
        }
    }
}
