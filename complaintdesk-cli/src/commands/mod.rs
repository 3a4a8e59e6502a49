//! CLI command implementations

pub mod access;
pub mod config;
pub mod records;
