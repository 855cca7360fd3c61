//! Capability providers: window control and keystroke injection.
//!
//! The agent depends on these primitives but does not implement them; each
//! platform adapter is a thin shell around the system's own tooling, behind
//! a trait seam so command logic stays testable with mocks.

pub mod keyboard;
pub mod platform;
pub mod window;

pub use keyboard::{system_keyboard, KeystrokeProvider, DEFAULT_KEY_DELAY};
pub use window::{focus_window, system_windows, WindowProvider, SETTLE_DELAY};
