//! Error type definitions.
//!
//! Domain misconfigurations are reported as [`Problem`](crate::Problem)s, not
//! errors. The types here cover the cases where a check could not run, plus the
//! typed outcomes of the validation fetch that are later translated into
//! problems.

use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

use super::categorization::describe_error_chain;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failure of the DNS-lookup collaborator.
///
/// An empty answer (NXDOMAIN or NODATA) is not an error; lookups return an
/// empty record set for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsError {
    /// The name cannot be queried at all.
    #[error("invalid domain name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// The query was sent but no usable answer came back (timeout, SERVFAIL, ...).
    #[error("{0}")]
    Resolve(String),
}

/// The CAA evaluator could not complete.
#[derive(Error, Debug)]
pub enum CaaError {
    /// The input is not a domain name CAA can be evaluated for.
    #[error("cannot check CAA for {domain:?}: {reason}")]
    InvalidDomain { domain: String, reason: String },

    /// A lookup failed in a way that is not a finding about the domain.
    #[error("error checking caa record on domain: {domain}")]
    Lookup {
        domain: String,
        #[source]
        source: DnsError,
    },
}

/// A redirect rejected by the validation agent's redirect policy.
///
/// The display text is reported verbatim as the problem detail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RedirectViolation {
    #[error("Too many ({count}) redirects, last redirect was to: {url}")]
    TooManyRedirects { count: usize, url: String },

    #[error("Bad port number provided when fetching {url}: {port}")]
    BadPort { url: String, port: u16 },

    #[error("Bad scheme provided when fetching {url}: {scheme}")]
    BadScheme { url: String, scheme: String },

    #[error(
        "It appears that a redirect was generated by your web server that is missing a trailing \
         slash after your domain name: {url}. Check your web server configuration and .htaccess \
         for Redirect/RedirectMatch/RewriteRule."
    )]
    MissingTrailingSlash { url: String },
}

/// Why a validation fetch did not complete.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The redirect policy rejected a hop.
    #[error(transparent)]
    Redirect(#[from] RedirectViolation),

    /// Connection, TLS or protocol failure. The message carries the whole cause chain.
    #[error("{}", describe_error_chain(.0))]
    Transport(ReqwestError),

    /// A redirect response carried a `Location` that is not a usable URL.
    #[error("failed to parse Location header {location:?}: {reason}")]
    InvalidLocation { location: String, reason: String },

    /// The overall deadline elapsed.
    #[error("Get {url:?}: timed out after {}s", .after.as_secs_f64())]
    Timeout { url: String, after: Duration },
}
