//! CAA authorization evaluator.
//!
//! Decides whether an issuer may issue for a domain by walking the name
//! hierarchy: the first name (from the domain itself up to its public suffix)
//! that publishes any CAA record decides, and a domain with no CAA records
//! anywhere on that path is unrestricted.

mod policy;
mod problems;

use crate::dns::{CaaRecord, DnsLookup, RecordType, ResourceRecord};
use crate::domain::{caa_search_path, public_suffix, strip_wildcard};
use crate::error_handling::{CaaError, DnsError};
use crate::problem::Problem;

// Re-export public API
pub use policy::{evaluate_caa_records, extract_issuer_domain, CaaPolicy};
pub use problems::{caa_critical_unknown, caa_issuance_not_allowed, collate_records};

/// Checks the CAA policy governing `domain` for `issuer_domain`.
///
/// `domain` may carry a leading `*.`, which makes it a wildcard request:
/// `issuewild` records then take precedence over `issue` records, at whichever
/// level the policy is found.
///
/// A failed lookup is reported as a `DNSLookupFailed` finding and ends the
/// walk.
///
/// # Errors
///
/// Returns `CaaError::InvalidDomain` for names without a public suffix and
/// `CaaError::Lookup` when the collaborator rejects a name outright.
pub async fn check_caa<L: DnsLookup>(
    lookup: &L,
    domain: &str,
    issuer_domain: &str,
) -> Result<Vec<Problem>, CaaError> {
    let (name, wildcard) = strip_wildcard(domain);
    if name.is_empty() || public_suffix(name).is_none() {
        return Err(CaaError::InvalidDomain {
            domain: domain.to_string(),
            reason: "no public suffix".to_string(),
        });
    }

    let mut problems = Vec::new();
    for level in caa_search_path(name) {
        let records = match lookup.lookup(level, RecordType::CAA).await {
            Ok(records) => records,
            Err(DnsError::Resolve(detail)) => {
                log::warn!("CAA lookup for {level} failed: {detail}");
                problems.push(Problem::dns_lookup_failed(level, "CAA", detail));
                return Ok(problems);
            }
            Err(source) => {
                return Err(CaaError::Lookup {
                    domain: level.to_string(),
                    source,
                })
            }
        };

        let caa: Vec<CaaRecord> = records
            .into_iter()
            .filter_map(|record| match record {
                ResourceRecord::Caa(caa) => Some(caa),
                _ => None,
            })
            .collect();

        if !caa.is_empty() {
            log::debug!(
                "Found {} CAA record(s) at {level} (wildcard={wildcard})",
                caa.len()
            );
            problems.extend(evaluate_caa_records(level, wildcard, &caa, issuer_domain));
            return Ok(problems);
        }
        log::debug!("No CAA records at {level}");
    }

    Ok(problems)
}
