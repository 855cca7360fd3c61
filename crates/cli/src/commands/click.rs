use std::time::Duration;

use earthcall::{ActiveSession, AutomationError, Result, SessionManager};
use tracing::{debug, info};

/// Clicks the first element whose visible text matches, on the page left by
/// a prior `open-url` in the same session.
///
/// Never navigates first: the existing page is the very continuity the
/// session exists to preserve.
pub async fn execute(text: &str, timeout_ms: u64, manager: &SessionManager) -> Result<()> {
    info!(target = "ec", %text, "click by visible text");

    let session = manager.acquire().await?;
    debug!(target = "ec", source = ?session.source(), "session acquired");

    let outcome = click(&session, text, timeout_ms).await;
    // Keep-alive release even on failure; the command error takes precedence.
    let released = manager.release(session, true).await;
    outcome.and(released)
}

async fn click(session: &ActiveSession, text: &str, timeout_ms: u64) -> Result<()> {
    let page = session
        .active_page()
        .await?
        .ok_or(AutomationError::NoActivePage)?;

    session
        .click_by_text(&page, text, Duration::from_millis(timeout_ms))
        .await?;

    println!("Clicked element matching {text:?}");
    Ok(())
}
