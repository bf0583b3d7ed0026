//! Single-slot cache for the raw MDS blob
//!
//! The cache holds exactly one token, rewritten wholesale after every
//! successful fetch. Read failures never reach the caller as errors: an
//! unreadable cache is treated the same as no cache.

mod store;

pub use store::{CacheRead, CacheStore, StorageError};
