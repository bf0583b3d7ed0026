//! mdsplit library
//!
//! Fetches the FIDO Metadata Service blob, keeps a single cached copy until
//! its `nextUpdate` date, and writes each authenticator entry to its own
//! JSON file.

pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod data;
pub mod freshness;
pub mod output;
pub mod sanitize;
pub mod sync;
pub mod token;

pub use config::SyncConfig;
pub use sync::{BlobSource, MdsSync, SyncError, SyncReport};
