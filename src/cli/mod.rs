//! CLI module for leadhub
//!
//! Provides command-line access to:
//! - login / register / logout / whoami: the session lifecycle
//! - open: route resolution through the guard
//! - leads / admin: lead management

mod args;
mod commands;
mod errors;
mod io;

pub use args::{AdminAction, Cli, Command, FilterArgs, LeadsAction};
pub use commands::{run_command, Context};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{confirm, write_error, write_response};

use crate::config::ClientConfig;
use crate::observability::init_logging;

/// Parse arguments, run one command and print its JSON response.
///
/// Errors are written to stdout as an error envelope and also returned so
/// the caller can set the exit status.
pub async fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    match execute(cli).await {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

async fn execute(cli: Cli) -> CliResult<serde_json::Value> {
    let config = ClientConfig::load(&cli.config)?;

    if let Err(e) = init_logging(config.log_format) {
        eprintln!("{}", e);
    }

    let ctx = Context::open(&config)?;
    run_command(&ctx, cli.command).await
}
