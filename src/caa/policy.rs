//! Evaluation of the CAA record set found at one name.

use crate::dns::CaaRecord;
use crate::problem::Problem;

use super::problems::{caa_critical_unknown, caa_issuance_not_allowed};

/// CAA records at one name, sorted by tag.
#[derive(Debug, Default)]
pub struct CaaPolicy<'a> {
    pub issue: Vec<&'a CaaRecord>,
    pub issuewild: Vec<&'a CaaRecord>,
    pub critical_unknown: Vec<&'a CaaRecord>,
}

impl<'a> CaaPolicy<'a> {
    /// Sorts records into `issue`, `issuewild` and unknown-critical sets.
    ///
    /// `iodef` records and non-critical unknown tags are ignored.
    pub fn classify(records: &'a [CaaRecord]) -> Self {
        let mut policy = Self::default();
        for record in records {
            match record.tag.to_ascii_lowercase().as_str() {
                "issue" => policy.issue.push(record),
                "issuewild" => policy.issuewild.push(record),
                "iodef" => {}
                _ if record.is_critical() => policy.critical_unknown.push(record),
                _ => {}
            }
        }
        policy
    }

    /// The records that decide issuance for this request.
    ///
    /// `issuewild` overrides `issue` for wildcard names when present; otherwise
    /// `issue` applies.
    pub fn applicable(&self, wildcard: bool) -> &[&'a CaaRecord] {
        if wildcard && !self.issuewild.is_empty() {
            &self.issuewild
        } else {
            &self.issue
        }
    }
}

/// Decides whether the CAA records published at `domain` let `issuer_domain` issue.
///
/// Returns `None` when issuance is permitted.
pub fn evaluate_caa_records(
    domain: &str,
    wildcard: bool,
    records: &[CaaRecord],
    issuer_domain: &str,
) -> Option<Problem> {
    let policy = CaaPolicy::classify(records);

    if !policy.critical_unknown.is_empty() {
        return Some(caa_critical_unknown(
            domain,
            wildcard,
            &policy.critical_unknown,
            issuer_domain,
        ));
    }

    if policy.issue.is_empty() && !wildcard {
        return None;
    }

    let applicable = policy.applicable(wildcard);
    if applicable
        .iter()
        .any(|record| extract_issuer_domain(&record.value) == issuer_domain)
    {
        return None;
    }

    Some(caa_issuance_not_allowed(
        domain,
        wildcard,
        applicable,
        issuer_domain,
    ))
}

/// Returns the issuer domain of an `issue`/`issuewild` value.
///
/// The value has the form `issuer.tld; key=value; ...`; everything before the
/// first `;` with surrounding spaces and tabs removed is the issuer.
pub fn extract_issuer_domain(value: &str) -> &str {
    value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim_matches([' ', '\t'])
}
