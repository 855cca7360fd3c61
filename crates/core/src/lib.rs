//! Core library for the earthcall desktop-automation agent.
//!
//! Each CLI invocation is an independent process, yet browser-touching
//! commands must operate on the same live browser instance. This crate
//! provides the pieces that make that hold: a durable [`SessionStore`], a
//! [`SessionManager`] that reattaches to or creates the session browser,
//! a [`BrowserSession`] handle over the DevTools protocol, and the window
//! and keystroke capability providers.

pub mod browser;
pub mod error;
pub mod providers;
pub mod session;

pub use browser::{BrowserSession, LaunchOptions};
pub use error::{AutomationError, Result};
pub use session::{
    ActiveSession, SessionManager, SessionPaths, SessionRecord, SessionSource, SessionStore,
};

// Command flows hold pages across calls; re-exported so callers do not need
// a direct chromiumoxide dependency.
pub use chromiumoxide::Page;
