//! Core infrastructure: errors, configuration, and path utilities.

pub mod config;
pub mod errors;
pub mod paths;
