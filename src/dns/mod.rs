//! DNS lookups.
//!
//! The checkers never talk to a resolver directly. They consume the
//! [`DnsLookup`] collaborator, which has two implementations:
//! - `HickoryLookup` - real queries through `hickory-resolver`, with CAA
//!   answers decoded from the raw response
//! - `StaticLookup` - fixed in-memory answers
//!
//! Resource records are exposed as crate types so callers and tests do not
//! depend on hickory's rdata representation.

mod lookup;
mod records;
mod resolution;
mod static_lookup;
mod wire;

// Re-export public API
pub use hickory_resolver::proto::rr::RecordType;
pub use lookup::{DnsLookup, HickoryLookup};
pub use records::{CaaRecord, ResourceRecord};
pub use resolution::{resolve_host_addresses, ResolvedAddresses};
pub use static_lookup::StaticLookup;
pub use wire::caa_records_from_message;
