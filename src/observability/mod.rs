//! Structured logging setup.
//!
//! The crate logs through `tracing` macros and spans. This module installs the
//! subscriber that decides where those go.
//!
//! # Configuration
//!
//! Log level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in [`Config`](crate::Config)
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `file_writer`: size-rotating log file with backup retention

mod file_writer;
mod init;

pub use file_writer::{LogWriter, RotatingFile};
pub use init::init_tracing;
