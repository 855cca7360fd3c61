//! Linux adapters: `wmctrl` for window control, `xdotool` for typing.

use std::process::Command;
use std::time::Duration;

use crate::error::{AutomationError, Result};
use crate::providers::keyboard::KeystrokeProvider;
use crate::providers::window::WindowProvider;

pub(crate) struct WmctrlWindows;

impl WmctrlWindows {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl WindowProvider for WmctrlWindows {
    fn list_titles(&self) -> Result<Vec<String>> {
        let output = run("window", Command::new("wmctrl").arg("-l"))?;
        Ok(parse_wmctrl_list(&output))
    }

    fn activate(&self, title: &str) -> Result<()> {
        run("window", Command::new("wmctrl").args(["-a", title]))?;
        Ok(())
    }
}

pub(crate) struct XdotoolKeyboard;

impl XdotoolKeyboard {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl KeystrokeProvider for XdotoolKeyboard {
    fn type_text(&self, text: &str, per_char_delay: Duration) -> Result<()> {
        let delay = per_char_delay.as_millis().to_string();
        run(
            "keystroke",
            Command::new("xdotool").args(["type", "--delay", &delay, "--", text]),
        )?;
        Ok(())
    }
}

/// Runs a provider command, mapping spawn failures and non-zero exits to
/// `Provider` errors carrying the tool's stderr.
fn run(provider: &'static str, cmd: &mut Command) -> Result<String> {
    let tool = cmd.get_program().to_string_lossy().into_owned();
    let output = cmd
        .output()
        .map_err(|err| AutomationError::provider(provider, format!("{tool}: {err}")))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AutomationError::provider(
            provider,
            format!("{tool} exited with {}: {}", output.status, stderr.trim()),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Extracts the title column from `wmctrl -l` output.
///
/// Lines look like `0x04000003 -1 host Title with spaces`; the title is
/// everything past the third whitespace run.
fn parse_wmctrl_list(output: &str) -> Vec<String> {
    output.lines().filter_map(title_field).map(str::to_string).collect()
}

fn title_field(line: &str) -> Option<&str> {
    let mut rest = line.trim_start();
    for _ in 0..3 {
        let idx = rest.find(char::is_whitespace)?;
        rest = rest[idx..].trim_start();
    }
    (!rest.is_empty()).then_some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wmctrl_lines_parse_to_titles() {
        let output = "\
0x04000003 -1 host Desktop
0x04800003  0 host Mozilla Firefox
0x05000007  1 host Editor - notes with  spaces
";
        assert_eq!(
            parse_wmctrl_list(output),
            vec![
                "Desktop".to_string(),
                "Mozilla Firefox".to_string(),
                "Editor - notes with  spaces".to_string(),
            ]
        );
    }

    #[test]
    fn short_or_empty_lines_are_skipped() {
        assert!(parse_wmctrl_list("").is_empty());
        assert!(parse_wmctrl_list("0x04000003 -1 host").is_empty());
    }
}
