//! Quoting helpers for the subprocess adapters.
//!
//! Kept platform-independent so they stay under test on every target.

/// Escapes a string for interpolation into a double-quoted AppleScript
/// literal.
pub fn applescript_quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
    out
}

/// Escapes a string for interpolation into a single-quoted PowerShell
/// literal.
pub fn powershell_single_quote(text: &str) -> String {
    text.replace('\'', "''")
}

/// Escapes SendKeys metacharacters so text is typed literally.
pub fn sendkeys_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '+' | '^' | '%' | '~' | '(' | ')' | '{' | '}' | '[' | ']' => {
                out.push('{');
                out.push(ch);
                out.push('}');
            }
            _ => out.push(ch),
        }
    }
    out
}
