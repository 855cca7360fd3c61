//! Fallback adapters for platforms without window/keystroke tooling.

use std::time::Duration;

use crate::error::{AutomationError, Result};
use crate::providers::keyboard::KeystrokeProvider;
use crate::providers::window::WindowProvider;

pub(crate) struct UnsupportedWindows;

impl UnsupportedWindows {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl WindowProvider for UnsupportedWindows {
    fn list_titles(&self) -> Result<Vec<String>> {
        Err(AutomationError::provider(
            "window",
            "window control is not supported on this platform",
        ))
    }

    fn activate(&self, _title: &str) -> Result<()> {
        Err(AutomationError::provider(
            "window",
            "window control is not supported on this platform",
        ))
    }
}

pub(crate) struct UnsupportedKeyboard;

impl UnsupportedKeyboard {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl KeystrokeProvider for UnsupportedKeyboard {
    fn type_text(&self, _text: &str, _per_char_delay: Duration) -> Result<()> {
        Err(AutomationError::provider(
            "keystroke",
            "keystroke injection is not supported on this platform",
        ))
    }
}
