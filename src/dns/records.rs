//! Resource record types handed out by the DNS-lookup collaborator.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use serde::Serialize;

use crate::config::{CAA_FLAG_CRITICAL, CAA_FLAG_LEGACY_CRITICAL};

/// One answer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRecord {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Caa(CaaRecord),
}

/// A CAA record as published at `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaaRecord {
    pub name: String,
    pub flags: u8,
    pub tag: String,
    pub value: String,
}

impl CaaRecord {
    pub fn new(
        name: impl Into<String>,
        flags: u8,
        tag: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            flags,
            tag: tag.into(),
            value: value.into(),
        }
    }

    /// Whether an unknown tag on this record must block issuance.
    ///
    /// Both the RFC 8659 issuer-critical bit and the low-order bit count.
    pub fn is_critical(&self) -> bool {
        self.flags & (CAA_FLAG_CRITICAL | CAA_FLAG_LEGACY_CRITICAL) != 0
    }

    /// Decodes CAA rdata in its wire layout: flags octet, tag length, tag, value.
    ///
    /// The flags octet is kept as published. Returns `None` for truncated
    /// rdata or an empty tag.
    pub fn from_wire(name: &str, rdata: &[u8]) -> Option<Self> {
        let (&flags, rest) = rdata.split_first()?;
        let (&tag_len, rest) = rest.split_first()?;
        let tag_len = usize::from(tag_len);
        if tag_len == 0 || rest.len() < tag_len {
            return None;
        }
        let (tag, value) = rest.split_at(tag_len);
        Some(Self::new(
            name.trim_end_matches('.'),
            flags,
            String::from_utf8_lossy(tag),
            String::from_utf8_lossy(value),
        ))
    }
}

impl fmt::Display for CaaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.\tIN\tCAA\t{} {} \"{}\"",
            self.name, self.flags, self.tag, self.value
        )
    }
}
