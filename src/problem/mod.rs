//! Diagnostic findings.
//!
//! Every checker reports domain misconfigurations as [`Problem`] values. The
//! constructors below are shared by more than one checker; checker-specific
//! findings live next to the checker that produces them.

mod types;

pub use types::{Problem, Severity};

impl Problem {
    /// A failure of the tooling itself rather than of the domain.
    pub fn internal(message: impl Into<String>, severity: Severity) -> Self {
        Problem::new(
            "InternalProblem",
            "An internal error occurred while checking the domain",
            message,
            severity,
        )
    }

    /// A DNS query needed by a check could not be answered.
    pub fn dns_lookup_failed(name: &str, record_type: &str, detail: impl Into<String>) -> Self {
        Problem::new(
            "DNSLookupFailed",
            format!("A fatal issue occurred during the DNS lookup process for {name}/{record_type}."),
            detail,
            Severity::Fatal,
        )
    }
}
