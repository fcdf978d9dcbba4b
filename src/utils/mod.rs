//! Configuration utilities.

/// Environment-based server configuration.
pub mod config;

pub use config::Config;
