//! Browser capability provider over the Chrome DevTools protocol.
//!
//! The session browser is spawned detached with a remote-debugging port so
//! it outlives the invocation that launched it; every invocation (including
//! the launching one) talks to it through [`chromiumoxide::Browser::connect`]
//! against the recorded WebSocket endpoint.

mod js;
mod session;

pub use session::{BrowserSession, LaunchOptions};
