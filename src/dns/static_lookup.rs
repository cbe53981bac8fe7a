//! In-memory DNS answers.
//!
//! `StaticLookup` serves a fixed table of records and remembers every query it
//! receives, which makes checker runs reproducible without a network.

use std::collections::HashMap;
use std::sync::Mutex;

use hickory_resolver::proto::rr::RecordType;

use super::lookup::DnsLookup;
use super::records::{CaaRecord, ResourceRecord};
use crate::error_handling::DnsError;

#[derive(Default)]
pub struct StaticLookup {
    answers: HashMap<(String, RecordType), Result<Vec<ResourceRecord>, DnsError>>,
    queries: Mutex<Vec<(String, RecordType)>>,
}

impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a CAA record published at `name`.
    pub fn with_caa(mut self, name: &str, flags: u8, tag: &str, value: &str) -> Self {
        let record = ResourceRecord::Caa(CaaRecord::new(name, flags, tag, value));
        self.push(name, RecordType::CAA, record);
        self
    }

    pub fn with_a(mut self, name: &str, address: std::net::Ipv4Addr) -> Self {
        self.push(name, RecordType::A, ResourceRecord::A(address));
        self
    }

    pub fn with_aaaa(mut self, name: &str, address: std::net::Ipv6Addr) -> Self {
        self.push(name, RecordType::AAAA, ResourceRecord::Aaaa(address));
        self
    }

    /// Makes every `record_type` query for `name` fail.
    pub fn with_failure(mut self, name: &str, record_type: RecordType, error: DnsError) -> Self {
        self.answers
            .insert((name.to_string(), record_type), Err(error));
        self
    }

    /// Names queried so far, in order, for the given record type.
    pub fn queried(&self, record_type: RecordType) -> Vec<String> {
        self.queries
            .lock()
            .map(|queries| {
                queries
                    .iter()
                    .filter(|(_, t)| *t == record_type)
                    .map(|(name, _)| name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn push(&mut self, name: &str, record_type: RecordType, record: ResourceRecord) {
        let entry = self
            .answers
            .entry((name.to_string(), record_type))
            .or_insert_with(|| Ok(Vec::new()));
        if let Ok(records) = entry {
            records.push(record);
        }
    }
}

impl DnsLookup for StaticLookup {
    async fn lookup(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<ResourceRecord>, DnsError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push((name.to_string(), record_type));
        }
        self.answers
            .get(&(name.to_string(), record_type))
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
