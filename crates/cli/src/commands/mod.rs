mod click;
mod focus;
mod navigate;
mod session;
mod type_text;

use earthcall::{LaunchOptions, Result, SessionManager, SessionPaths, SessionStore};

use crate::cli::{Cli, Commands, SessionAction};

pub async fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        verbose: _,
        headful,
        state_dir,
        command,
    } = cli;

    let paths = SessionPaths::resolve(state_dir);

    match command {
        // focus-window and type never touch the browser session
        Commands::FocusWindow { title_part } => focus::execute(&title_part).await,
        Commands::Type { text, delay_ms } => type_text::execute(&text, delay_ms),
        Commands::OpenUrl { url, timeout_ms } => {
            navigate::execute(&url, timeout_ms, &manager(paths, headful)).await
        }
        Commands::ClickText { text, timeout_ms } => {
            click::execute(&text, timeout_ms, &manager(paths, headful)).await
        }
        Commands::Session { action } => match action {
            SessionAction::Status => session::status(&SessionStore::new(paths)),
            SessionAction::Clear => session::clear(&SessionStore::new(paths)),
            SessionAction::Stop => session::stop(&manager(paths, headful)).await,
        },
    }
}

fn manager(paths: SessionPaths, headful: bool) -> SessionManager {
    let launch = LaunchOptions {
        headless: !headful,
        profile_dir: paths.profile_dir(),
        executable: None,
    };
    SessionManager::new(SessionStore::new(paths), launch)
}
