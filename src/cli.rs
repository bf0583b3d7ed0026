//! Command-line interface for mdsplit
//!
//! The tool takes no options; clap only provides `--help` and `--version`.

use clap::Parser;

/// Fetch the FIDO metadata blob and split it into one JSON file per authenticator
///
/// The blob is cached in ./cache/mds-blob.json and only downloaded again once
/// its nextUpdate date has passed. Entries are written to ./output/ under a
/// snake_case name derived from their description.
///
/// The blob's signature is not verified.
#[derive(Parser, Debug)]
#[command(name = "mdsplit")]
#[command(about = "Split the FIDO metadata blob into per-authenticator JSON files")]
#[command(version)]
pub struct Cli {}
