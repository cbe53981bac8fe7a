//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver and the
//! name-server pool with proper timeout configuration.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::{NameServerPool, TokioConnectionProvider};
use hickory_resolver::TokioAsyncResolver;

use crate::config::{DNS_ATTEMPTS, DNS_TIMEOUT_SECS};

fn resolver_opts() -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = DNS_ATTEMPTS;
    // Names are always absolute; never append search domains
    opts.ndots = 0;
    opts
}

/// Initializes the DNS resolver used for address lookups.
///
/// Uses the default upstream configuration with short timeouts so a slow or
/// unresponsive DNS server turns into a `DNSLookupFailed` finding quickly
/// instead of stalling the run.
///
/// # Returns
///
/// A configured `TokioAsyncResolver` wrapped in `Arc` for sharing across tasks.
pub fn init_resolver() -> Arc<TokioAsyncResolver> {
    Arc::new(TokioAsyncResolver::tokio(ResolverConfig::default(), resolver_opts()))
}

/// Initializes the name-server pool used for CAA queries.
///
/// Same upstreams and timeouts as [`init_resolver`]. The pool hands back the
/// raw response bytes, which CAA decoding needs to see the whole flags octet.
pub fn init_name_server_pool() -> NameServerPool<TokioConnectionProvider> {
    let name_servers = NameServerConfigGroup::from(ResolverConfig::default().name_servers().to_vec());
    NameServerPool::from_config(name_servers, resolver_opts(), TokioConnectionProvider::default())
}
