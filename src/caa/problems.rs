//! Findings produced by the CAA evaluator.

use crate::dns::CaaRecord;
use crate::problem::{Problem, Severity};

/// Renders records one per line, as they are shown in problem details.
pub fn collate_records(records: &[&CaaRecord]) -> String {
    records
        .iter()
        .map(|record| record.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn caa_critical_unknown(
    domain: &str,
    wildcard: bool,
    records: &[&CaaRecord],
    issuer_domain: &str,
) -> Problem {
    Problem::new(
        "CaaCriticalUnknown",
        format!(
            "CAA record(s) exist on {domain} (wildcard={wildcard}) that are marked as critical \
             but are unknown to the CA ({issuer_domain}). These record(s) as shown in the detail \
             must be removed, or marked as non-critical, before a certificate can be issued."
        ),
        collate_records(records),
        Severity::Fatal,
    )
}

pub fn caa_issuance_not_allowed(
    domain: &str,
    wildcard: bool,
    records: &[&CaaRecord],
    issuer_domain: &str,
) -> Problem {
    Problem::new(
        "CaaIssuanceNotAllowed",
        format!(
            "No CAA record on {domain} (wildcard={wildcard}) contains the issuance domain \
             \"{issuer_domain}\". You must either add an additional record to include \
             \"{issuer_domain}\" or remove every existing CAA record. A list of the CAA records \
             are provided in the details."
        ),
        collate_records(records),
        Severity::Fatal,
    )
}
