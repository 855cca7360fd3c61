//! Exit-status mapping for the agent's error taxonomy.

use earthcall::AutomationError;

/// 0 = success, 1 = well-formed failure (no match, timeout, no active
/// page), 2 = malformed invocation.
///
/// clap reports its own parse failures with exit code 2 before dispatch
/// runs; this covers errors raised past parsing.
pub fn exit_code(err: &AutomationError) -> i32 {
    match err {
        AutomationError::Usage(_) => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_exit_2() {
        assert_eq!(exit_code(&AutomationError::Usage("bad url".into())), 2);
    }

    #[test]
    fn well_formed_failures_exit_1() {
        assert_eq!(
            exit_code(&AutomationError::WindowNotFound {
                fragment: "zzz".into()
            }),
            1
        );
        assert_eq!(
            exit_code(&AutomationError::ElementNotFound { text: "Buy".into() }),
            1
        );
        assert_eq!(exit_code(&AutomationError::NoActivePage), 1);
        assert_eq!(
            exit_code(&AutomationError::Timeout {
                ms: 2000,
                operation: "navigation".into()
            }),
            1
        );
    }
}
