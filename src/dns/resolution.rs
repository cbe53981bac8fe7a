//! Address resolution through the DNS-lookup collaborator.

use std::net::IpAddr;

use hickory_resolver::proto::rr::RecordType;

use super::lookup::DnsLookup;
use super::records::ResourceRecord;
use crate::error_handling::DnsError;

/// Resolved addresses of a host, split by family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAddresses {
    pub ipv6: Vec<IpAddr>,
    pub ipv4: Vec<IpAddr>,
}

impl ResolvedAddresses {
    pub fn is_empty(&self) -> bool {
        self.ipv6.is_empty() && self.ipv4.is_empty()
    }

    /// All addresses, AAAA first (the family a CA's validation agent prefers).
    pub fn all(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.ipv6.iter().chain(self.ipv4.iter()).copied()
    }
}

/// Resolves the AAAA and A records of `host`.
///
/// # Errors
///
/// Returns the first lookup failure together with the record type that failed.
pub async fn resolve_host_addresses<L: DnsLookup>(
    host: &str,
    lookup: &L,
) -> Result<ResolvedAddresses, (RecordType, DnsError)> {
    let ipv6 = lookup
        .lookup(host, RecordType::AAAA)
        .await
        .map_err(|e| (RecordType::AAAA, e))?
        .into_iter()
        .filter_map(|record| match record {
            ResourceRecord::Aaaa(address) => Some(IpAddr::V6(address)),
            _ => None,
        })
        .collect();
    let ipv4 = lookup
        .lookup(host, RecordType::A)
        .await
        .map_err(|e| (RecordType::A, e))?
        .into_iter()
        .filter_map(|record| match record {
            ResourceRecord::A(address) => Some(IpAddr::V4(address)),
            _ => None,
        })
        .collect();
    Ok(ResolvedAddresses { ipv6, ipv4 })
}
