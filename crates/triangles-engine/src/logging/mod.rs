//! Logging setup.
//!
//! Code logs through the `log` facade; this module only installs the
//! `env_logger` backend for the binary.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
