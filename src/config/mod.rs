//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, etc.)
//! - Checker configuration types
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    CaaCheckConfig, Cli, Config, HttpCheckConfig, LogFormat, LogLevel, OutputFormat,
    ValidationMethod,
};
