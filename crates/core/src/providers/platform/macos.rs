//! macOS adapters over `osascript` and System Events.

use std::process::Command;
use std::time::Duration;

use super::escape::applescript_quote;
use crate::error::{AutomationError, Result};
use crate::providers::keyboard::KeystrokeProvider;
use crate::providers::window::WindowProvider;

pub(crate) struct OsascriptWindows;

impl OsascriptWindows {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl WindowProvider for OsascriptWindows {
    fn list_titles(&self) -> Result<Vec<String>> {
        // System Events joins the titles with ", "; titles containing that
        // separator split apart. Acceptable at the adapter boundary.
        let script = r#"tell application "System Events" to get title of every window of (every process whose visible is true)"#;
        let output = run_osascript(script)?;
        Ok(output
            .trim()
            .split(", ")
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn activate(&self, title: &str) -> Result<()> {
        let quoted = applescript_quote(title);
        let script = format!(
            r#"tell application "System Events"
    repeat with proc in (every process whose visible is true)
        repeat with w in (every window of proc)
            if title of w is "{quoted}" then
                set frontmost of proc to true
                perform action "AXRaise" of w
                return
            end if
        end repeat
    end repeat
end tell"#
        );
        run_osascript(&script)?;
        Ok(())
    }
}

pub(crate) struct OsascriptKeyboard;

impl OsascriptKeyboard {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl KeystrokeProvider for OsascriptKeyboard {
    fn type_text(&self, text: &str, per_char_delay: Duration) -> Result<()> {
        let quoted = applescript_quote(text);
        let delay = per_char_delay.as_secs_f64();
        let script = format!(
            r#"set chars to every character of "{quoted}"
repeat with c in chars
    tell application "System Events" to keystroke (c as string)
    delay {delay}
end repeat"#
        );
        run_osascript(&script)?;
        Ok(())
    }
}

fn run_osascript(script: &str) -> Result<String> {
    let output = Command::new("osascript")
        .args(["-e", script])
        .output()
        .map_err(|err| AutomationError::provider("window", format!("osascript: {err}")))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AutomationError::provider(
            "window",
            format!("osascript exited with {}: {}", output.status, stderr.trim()),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
