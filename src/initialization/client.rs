//! HTTP client initialization.
//!
//! The validation client is built per fetch because it is bound to one
//! resolved address.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::HttpCheckConfig;
use crate::error_handling::InitializationError;
use crate::http01::PinnedResolver;

/// Initializes the HTTP client used for one validation fetch.
///
/// Creates a `reqwest::Client` configured like a CA's validation agent:
/// - Every connection dials `address` (hostnames are never re-resolved)
/// - Redirects disabled, so each hop goes through the redirect policy
/// - TLS certificate verification disabled
/// - HTTP/1.1 only, no proxies
/// - Connect and request timeouts from `config`
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails,
/// e.g. for a user agent that is not a valid header value.
pub fn init_validation_client(
    config: &HttpCheckConfig,
    address: IpAddr,
) -> Result<reqwest::Client, InitializationError> {
    let resolver = PinnedResolver::new(SocketAddr::new(address, config.port));
    ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .dns_resolver(Arc::new(resolver))
        .danger_accept_invalid_certs(true)
        .http1_only()
        .no_proxy()
        .connect_timeout(config.timeout)
        .timeout(config.timeout)
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(InitializationError::from)
}
