//! Error handling.
//!
//! This module provides:
//! - Error type definitions for initialization, DNS, CAA and fetch failures
//! - Helpers that turn transport error chains into report text
//!
//! Errors here mean "the check could not run". Findings about the domain are
//! [`Problem`](crate::Problem)s and never travel through these types.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{describe_error_chain, is_protocol_mismatch};
pub use types::{CaaError, DnsError, FetchError, InitializationError, RedirectViolation};
