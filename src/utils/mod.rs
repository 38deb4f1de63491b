//! Shared utilities: input discovery.

pub mod discovery;

pub use discovery::{discover_logs, DiscoveryError};
