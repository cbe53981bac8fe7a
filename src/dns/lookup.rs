//! The DNS-lookup collaborator consumed by the checkers.

use std::future::Future;
use std::sync::Arc;

use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::name_server::{NameServerPool, TokioConnectionProvider};
use hickory_resolver::proto::op::{Message, Query};
use hickory_resolver::proto::rr::{Name, RData, RecordType};
use hickory_resolver::proto::xfer::{DnsHandle, FirstAnswer};
use hickory_resolver::TokioAsyncResolver;

use super::records::ResourceRecord;
use super::wire::caa_records_from_message;
use crate::error_handling::DnsError;

/// Answers `(name, record type)` queries.
///
/// Implementations own their caching, retry and timeout behavior. A name with
/// no records of the requested type yields `Ok` with an empty set.
pub trait DnsLookup: Send + Sync {
    fn lookup(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> impl Future<Output = Result<Vec<ResourceRecord>, DnsError>> + Send;
}

/// [`DnsLookup`] backed by hickory.
///
/// Address queries go through the shared caching resolver. CAA queries go
/// through the name-server pool, whose responses keep their raw bytes.
#[derive(Clone)]
pub struct HickoryLookup {
    resolver: Arc<TokioAsyncResolver>,
    name_servers: NameServerPool<TokioConnectionProvider>,
}

impl HickoryLookup {
    pub fn new(
        resolver: Arc<TokioAsyncResolver>,
        name_servers: NameServerPool<TokioConnectionProvider>,
    ) -> Self {
        Self {
            resolver,
            name_servers,
        }
    }

    async fn lookup_caa(&self, name: &str) -> Result<Vec<ResourceRecord>, DnsError> {
        let mut query_name = Name::from_ascii(name).map_err(|e| DnsError::InvalidName {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        query_name.set_fqdn(true);

        let mut message = Message::new();
        message
            .set_recursion_desired(true)
            .add_query(Query::query(query_name, RecordType::CAA));

        let response = match self.name_servers.send(message).first_answer().await {
            Ok(response) => response,
            Err(e) => return no_records_or_error(e, name, RecordType::CAA),
        };
        let records = caa_records_from_message(name, response.as_buffer()).map_err(|e| {
            log::warn!("Failed to decode CAA response for {name}: {e}");
            DnsError::Resolve(e.to_string())
        })?;
        log::debug!("CAA lookup for {name} returned {} record(s)", records.len());
        Ok(records.into_iter().map(ResourceRecord::Caa).collect())
    }
}

fn no_records_or_error(
    e: ResolveError,
    name: &str,
    record_type: RecordType,
) -> Result<Vec<ResourceRecord>, DnsError> {
    match e.kind() {
        // NXDOMAIN and NODATA are answers, not failures
        ResolveErrorKind::NoRecordsFound { .. } => Ok(Vec::new()),
        _ => {
            log::warn!("Failed to lookup {record_type} records for {name}: {e}");
            Err(DnsError::Resolve(e.to_string()))
        }
    }
}

impl DnsLookup for HickoryLookup {
    async fn lookup(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<ResourceRecord>, DnsError> {
        if name.is_empty() {
            return Err(DnsError::InvalidName {
                name: name.to_string(),
                reason: "empty name".to_string(),
            });
        }
        if record_type == RecordType::CAA {
            return self.lookup_caa(name).await;
        }

        match self.resolver.lookup(name, record_type).await {
            Ok(lookup) => {
                let records: Vec<ResourceRecord> = lookup
                    .iter()
                    .filter_map(|rdata| match rdata {
                        RData::A(a) => Some(ResourceRecord::A(a.0)),
                        RData::AAAA(aaaa) => Some(ResourceRecord::Aaaa(aaaa.0)),
                        _ => None,
                    })
                    .collect();
                log::debug!("{record_type} lookup for {name} returned {} record(s)", records.len());
                Ok(records)
            }
            Err(e) => no_records_or_error(e, name, record_type),
        }
    }
}
