use clap::Parser;
use earthcall_cli::{cli::Cli, commands, error, logging};
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(err) = commands::dispatch(cli).await {
        error!(target = "ec", error = %err, "command failed");
        std::process::exit(error::exit_code(&err));
    }
}
