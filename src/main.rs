//! leadhub CLI entry point
//!
//! Parses arguments and dispatches through `cli::run`. The JSON response is
//! already on stdout when this sees an error; it only sets the exit status.

use leadhub::cli;

#[tokio::main]
async fn main() {
    if cli::run().await.is_err() {
        std::process::exit(1);
    }
}
