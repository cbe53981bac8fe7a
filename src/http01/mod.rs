//! HTTP-01 validation-fetch simulator.
//!
//! Replays the request a CA's validation agent makes for an HTTP-01 challenge
//! against one specific resolved address:
//! - `GET http://<domain>/.well-known/acme-challenge/letsdebug-test`
//! - every connection, redirects included, dials the given address
//! - TLS certificates are not verified
//! - redirects are checked hop by hop against the agent's policy
//! - one deadline covers the whole fetch
//!
//! Failures are classified into [`Problem`]s by [`translate_http_error`].

mod pinned_resolver;
mod problems;
mod redirects;
mod types;

use std::net::{IpAddr, SocketAddr};

use reqwest::Url;

use crate::config::{HttpCheckConfig, CHALLENGE_PATH};
use crate::error_handling::FetchError;
use crate::initialization::init_validation_client;
use crate::problem::{Problem, Severity};

// Re-export public API
pub use pinned_resolver::PinnedResolver;
pub use problems::{
    a_not_working, aaaa_not_working, bad_redirect, redirect_missing_trailing_slash,
    translate_http_error, webserver_misconfiguration,
};
pub use redirects::{
    check_redirect, follow_redirects, pin_url, redirect_location, RedirectTarget,
};
pub use types::HttpCheckResult;

/// Runs one simulated HTTP-01 validation fetch of `domain` against `address`.
///
/// Returns what was observed and, if the fetch failed, the finding describing
/// why. The result carries the last response received even on failure.
///
/// # Example
///
/// ```no_run
/// use acme_preflight::{check_http, HttpCheckConfig};
///
/// # async fn example() {
/// let (result, problem) = check_http(
///     "example.com",
///     "93.184.215.14".parse().unwrap(),
///     &HttpCheckConfig::default(),
/// )
/// .await;
/// println!("{result}: {:?}", problem.map(|p| p.name()));
/// # }
/// ```
pub async fn check_http(
    domain: &str,
    address: IpAddr,
    config: &HttpCheckConfig,
) -> (HttpCheckResult, Option<Problem>) {
    // IPv4-mapped IPv6 addresses are dialed and reported as IPv4
    let address = address.to_canonical();
    let mut result = HttpCheckResult::new(address);

    let start = match Url::parse(&format!("http://{domain}{CHALLENGE_PATH}")) {
        Ok(url) => url,
        Err(e) => {
            return (
                result,
                Some(Problem::internal(
                    format!("Failed to construct validation request: {e}"),
                    Severity::Error,
                )),
            )
        }
    };

    let client = match init_validation_client(config, address) {
        Ok(client) => client,
        Err(e) => {
            return (
                result,
                Some(Problem::internal(
                    format!("Failed to construct validation client: {e}"),
                    Severity::Error,
                )),
            )
        }
    };

    let pinned = SocketAddr::new(address, config.port);
    let fetch = follow_redirects(&client, start.clone(), pinned, config.max_redirects, &mut result);
    let outcome = match tokio::time::timeout(config.timeout, fetch).await {
        Ok(outcome) => outcome,
        Err(_) => Err(FetchError::Timeout {
            url: start.to_string(),
            after: config.timeout,
        }),
    };

    match outcome {
        Ok(()) => {
            log::debug!("Validation fetch of {domain} via {address} completed: {result}");
            (result, None)
        }
        Err(e) => {
            log::debug!("Validation fetch of {domain} via {address} failed: {e}");
            let problem = translate_http_error(domain, address, &e);
            (result, Some(problem))
        }
    }
}

#[cfg(test)]
mod tests;
