use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "earthcall")]
#[command(about = "Earthcall agent - scriptable desktop and browser automation")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Run the session browser with a visible window
    #[arg(long, global = true)]
    pub headful: bool,

    /// Override the session state directory (also: EARTHCALL_STATE_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Focus the first window whose title contains the fragment
    FocusWindow {
        /// Case-insensitive title fragment
        title_part: String,
    },

    /// Open a URL in the session browser
    OpenUrl {
        /// Absolute URL to navigate to
        url: String,
        /// Navigation timeout in milliseconds
        #[arg(long, default_value_t = 15_000)]
        timeout_ms: u64,
    },

    /// Click the first element whose visible text matches
    ClickText {
        /// Case-insensitive visible-text fragment
        text: String,
        /// How long to wait for a matching element (ms)
        #[arg(long, default_value_t = 5_000)]
        timeout_ms: u64,
    },

    /// Type literal text into whatever currently holds input focus
    Type {
        /// Text to type
        text: String,
        /// Delay between keystrokes (ms)
        #[arg(long, default_value_t = 20)]
        delay_ms: u64,
    },

    /// Session lifecycle and inspection
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum SessionAction {
    /// Show the persisted session record and its liveness
    Status,
    /// Remove the persisted session record without touching the browser
    Clear,
    /// Shut down the session browser and remove the record
    Stop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_focus_window() {
        let cli = Cli::try_parse_from(["earthcall", "focus-window", "Notepad"]).unwrap();
        match cli.command {
            Commands::FocusWindow { title_part } => assert_eq!(title_part, "Notepad"),
            _ => panic!("expected focus-window"),
        }
    }

    #[test]
    fn parse_open_url_with_timeout() {
        let cli = Cli::try_parse_from([
            "earthcall",
            "open-url",
            "https://example.com",
            "--timeout-ms",
            "3000",
        ])
        .unwrap();
        match cli.command {
            Commands::OpenUrl { url, timeout_ms } => {
                assert_eq!(url, "https://example.com");
                assert_eq!(timeout_ms, 3000);
            }
            _ => panic!("expected open-url"),
        }
    }

    #[test]
    fn parse_click_text_default_timeout() {
        let cli = Cli::try_parse_from(["earthcall", "click-text", "Sign in"]).unwrap();
        match cli.command {
            Commands::ClickText { text, timeout_ms } => {
                assert_eq!(text, "Sign in");
                assert_eq!(timeout_ms, 5_000);
            }
            _ => panic!("expected click-text"),
        }
    }

    #[test]
    fn parse_type_with_delay() {
        let cli =
            Cli::try_parse_from(["earthcall", "type", "hello world", "--delay-ms", "5"]).unwrap();
        match cli.command {
            Commands::Type { text, delay_ms } => {
                assert_eq!(text, "hello world");
                assert_eq!(delay_ms, 5);
            }
            _ => panic!("expected type"),
        }
    }

    #[test]
    fn parse_session_subcommands() {
        let cli = Cli::try_parse_from(["earthcall", "session", "status"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Session {
                action: SessionAction::Status
            }
        ));

        let cli = Cli::try_parse_from(["earthcall", "session", "stop"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Session {
                action: SessionAction::Stop
            }
        ));
    }

    #[test]
    fn global_flags_apply_anywhere() {
        let cli = Cli::try_parse_from([
            "earthcall",
            "open-url",
            "https://example.com",
            "--headful",
            "-v",
            "--state-dir",
            "/tmp/ec",
        ])
        .unwrap();
        assert!(cli.headful);
        assert_eq!(cli.verbose, 1);
        assert_eq!(cli.state_dir.as_deref(), Some(std::path::Path::new("/tmp/ec")));
    }

    #[test]
    fn unknown_command_fails_to_parse() {
        assert!(Cli::try_parse_from(["earthcall", "frob-widget", "x"]).is_err());
    }

    #[test]
    fn missing_argument_fails_to_parse() {
        assert!(Cli::try_parse_from(["earthcall", "click-text"]).is_err());
        assert!(Cli::try_parse_from(["earthcall", "focus-window"]).is_err());
    }
}
