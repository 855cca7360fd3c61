use std::time::Duration;

use earthcall::providers::{system_keyboard, KeystrokeProvider};
use earthcall::Result;
use tracing::info;

/// Types into whatever currently holds OS input focus; correctness depends
/// on a preceding `focus-window` or browser click having established it.
pub fn execute(text: &str, delay_ms: u64) -> Result<()> {
    info!(target = "ec", chars = text.chars().count(), "type text");

    let keyboard = system_keyboard();
    keyboard.type_text(text, Duration::from_millis(delay_ms))?;
    Ok(())
}
