//! Windows adapters over PowerShell: process window titles, WScript.Shell
//! activation, and SendKeys injection.

use std::process::Command;
use std::time::Duration;

use super::escape::{powershell_single_quote, sendkeys_escape};
use crate::error::{AutomationError, Result};
use crate::providers::keyboard::KeystrokeProvider;
use crate::providers::window::WindowProvider;

pub(crate) struct PowershellWindows;

impl PowershellWindows {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl WindowProvider for PowershellWindows {
    fn list_titles(&self) -> Result<Vec<String>> {
        let script = "Get-Process | Where-Object { $_.MainWindowTitle } | ForEach-Object { $_.MainWindowTitle }";
        let output = run_powershell("window", script)?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn activate(&self, title: &str) -> Result<()> {
        let quoted = powershell_single_quote(title);
        let script = format!(
            "if (-not (New-Object -ComObject WScript.Shell).AppActivate('{quoted}')) {{ exit 1 }}"
        );
        run_powershell("window", &script)?;
        Ok(())
    }
}

pub(crate) struct PowershellKeyboard;

impl PowershellKeyboard {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl KeystrokeProvider for PowershellKeyboard {
    // SendKeys has no per-character pacing; the whole string is sent in one
    // call and the delay only bounds the overall rate.
    fn type_text(&self, text: &str, _per_char_delay: Duration) -> Result<()> {
        let payload = powershell_single_quote(&sendkeys_escape(text));
        let script = format!(
            "Add-Type -AssemblyName System.Windows.Forms; [System.Windows.Forms.SendKeys]::SendWait('{payload}')"
        );
        run_powershell("keystroke", &script)?;
        Ok(())
    }
}

fn run_powershell(provider: &'static str, script: &str) -> Result<String> {
    let output = Command::new("powershell")
        .args(["-NoProfile", "-NonInteractive", "-Command", script])
        .output()
        .map_err(|err| AutomationError::provider(provider, format!("powershell: {err}")))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AutomationError::provider(
            provider,
            format!("powershell exited with {}: {}", output.status, stderr.trim()),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
