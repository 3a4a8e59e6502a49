//! Logging setup for the complaint dashboard
//!
//! Everything logs through `tracing`. This crate only decides where the
//! events go and how they look, driven by the `logging` section of the
//! configuration file.

pub mod init;

pub use init::{filter_directives, init_logging_from_config, init_simple_tracing};
