//! mdsplit - split the FIDO metadata blob into per-authenticator files
//!
//! Runs once against fixed locations: `./cache/` for the blob and `./output/`
//! for the entries. Exits non-zero on any fatal error.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing::Level;

use mdsplit::cli::Cli;
use mdsplit::{MdsSync, SyncConfig};

/// Sends log output to stderr at INFO level
fn init_logging() {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let _cli = Cli::parse();
    init_logging();

    let sync = MdsSync::new(SyncConfig::default());
    match sync.run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error in main process: {}", e);
            ExitCode::FAILURE
        }
    }
}
