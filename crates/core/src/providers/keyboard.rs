use std::time::Duration;

use super::platform;
use crate::error::Result;

/// Default per-character pacing, matching human-ish typing speed.
pub const DEFAULT_KEY_DELAY: Duration = Duration::from_millis(20);

/// Keystroke-injection primitive.
///
/// Sends literal keystrokes to whatever currently holds OS input focus; it
/// never (re)focuses anything itself.
pub trait KeystrokeProvider {
    fn type_text(&self, text: &str, per_char_delay: Duration) -> Result<()>;
}

/// The platform's keystroke provider.
pub fn system_keyboard() -> impl KeystrokeProvider {
    platform::SystemKeyboard::new()
}
