//! Logger setup for applications embedding the compositor.
//!
//! The library itself only talks to the `log` facade; binaries call
//! [`init_logging`] once at startup.

mod init;

pub use init::{init_logging, LoggingConfig};
