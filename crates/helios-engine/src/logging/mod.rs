//! Logging utilities.
//!
//! Centralizes logger initialization. The crate logs through the standard
//! `log` facade; nothing here imposes a backend on library users.

mod init;

pub use init::{init_logging, LoggingConfig};
