//! Platform adapters for the window and keystroke providers.
//!
//! Each adapter shells out to the platform's own automation tooling
//! (`wmctrl`/`xdotool` on Linux, System Events on macOS, PowerShell on
//! Windows) rather than binding native APIs; the agent only needs the
//! narrow operations the traits name.

pub mod escape;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub(crate) use linux::{WmctrlWindows as SystemWindows, XdotoolKeyboard as SystemKeyboard};

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
pub(crate) use macos::{OsascriptKeyboard as SystemKeyboard, OsascriptWindows as SystemWindows};

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
pub(crate) use windows::{
    PowershellKeyboard as SystemKeyboard, PowershellWindows as SystemWindows,
};

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
mod unsupported;
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub(crate) use unsupported::{
    UnsupportedKeyboard as SystemKeyboard, UnsupportedWindows as SystemWindows,
};
