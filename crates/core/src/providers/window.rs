use std::time::Duration;

use tracing::debug;

use super::platform;
use crate::error::{AutomationError, Result};

/// Delay after activation for the window manager to finish the focus
/// transition before a following command assumes it has focus.
pub const SETTLE_DELAY: Duration = Duration::from_millis(200);

/// Window enumeration/activation primitive.
pub trait WindowProvider {
    /// Titles of all current top-level windows, in enumeration order.
    fn list_titles(&self) -> Result<Vec<String>>;

    /// Activates the window with exactly this title.
    fn activate(&self, title: &str) -> Result<()>;
}

/// The platform's window provider.
pub fn system_windows() -> impl WindowProvider {
    platform::SystemWindows::new()
}

/// Focuses the first window whose title contains `fragment`
/// (case-insensitive), then waits out the settle delay.
///
/// Returns the matched title. Zero matches is a well-formed failure, not a
/// fatal error.
pub async fn focus_window(provider: &dyn WindowProvider, fragment: &str) -> Result<String> {
    let titles = provider.list_titles()?;
    let Some(title) = first_match(&titles, fragment) else {
        return Err(AutomationError::WindowNotFound {
            fragment: fragment.to_string(),
        });
    };
    let title = title.clone();

    debug!(target = "ec.provider", %title, "activating window");
    provider.activate(&title)?;
    tokio::time::sleep(SETTLE_DELAY).await;
    Ok(title)
}

/// First case-insensitive substring match in enumeration order.
fn first_match<'t>(titles: &'t [String], fragment: &str) -> Option<&'t String> {
    let needle = fragment.to_lowercase();
    titles
        .iter()
        .find(|title| title.to_lowercase().contains(&needle))
}
