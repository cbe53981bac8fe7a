//! Diagnostic report types.

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter};

/// How strongly a finding blocks certificate issuance.
///
/// Ordered from least to most severe, so `max()` over a set of problems yields
/// the worst one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr, EnumIter, Serialize,
)]
pub enum Severity {
    /// Internal tooling problem, unrelated to the domain itself
    Debug,
    /// Advisory
    Warning,
    /// Likely to block issuance
    Error,
    /// Issuance will not succeed until resolved
    Fatal,
}

/// A single finding produced by a checker.
///
/// Problems are plain data: once built they are only read, by the report
/// layer or by callers inspecting results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    name: &'static str,
    explanation: String,
    detail: String,
    severity: Severity,
}

impl Problem {
    pub fn new(
        name: &'static str,
        explanation: impl Into<String>,
        detail: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            name,
            explanation: explanation.into(),
            detail: detail.into(),
            severity,
        }
    }

    /// Machine-stable identifier of the finding category.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// What the finding means for the domain owner.
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Concrete evidence: raw error text or the literal DNS records involved.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Whether the finding is expected to stop issuance (`Error` or `Fatal`).
    pub fn is_blocking(&self) -> bool {
        self.severity >= Severity::Error
    }
}
