//! Configuration constants.
//!
//! This module defines the operational parameters of the checkers: timeouts,
//! redirect limits, the challenge path and the default issuer.

// Validation request shape
/// Path requested on every validation fetch.
///
/// The token is a fixed placeholder; no real challenge is ever provisioned.
pub const CHALLENGE_PATH: &str = "/.well-known/acme-challenge/letsdebug-test";

/// Default User-Agent string for validation requests.
pub const DEFAULT_USER_AGENT: &str = concat!("acme_preflight/", env!("CARGO_PKG_VERSION"));

// Network operation timeouts
/// Overall timeout in seconds for one validation fetch, including every redirect hop.
/// The same bound applies to each TCP dial.
pub const HTTP_TIMEOUT_SECS: u64 = 10;
/// DNS query timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// Attempts per DNS query before the resolver gives up
pub const DNS_ATTEMPTS: usize = 2;

// Redirect handling
/// Maximum number of redirect hops a validation agent follows.
/// The hop after this one is rejected.
pub const MAX_REDIRECTS: usize = 10;
/// Explicit ports a redirect target may carry.
pub const ALLOWED_REDIRECT_PORTS: [u16; 2] = [80, 443];
/// Status codes that are followed as redirects (when a `Location` is present).
pub const REDIRECT_STATUS_CODES: [u16; 5] = [301, 302, 303, 307, 308];

// CAA
/// Issuer domain checked against CAA `issue`/`issuewild` records by default.
pub const DEFAULT_ISSUER_DOMAIN: &str = "letsencrypt.org";
/// Issuer-critical flag (RFC 8659 "bit 0", the most significant bit).
pub const CAA_FLAG_CRITICAL: u8 = 0b1000_0000;
/// Low-order flag bit, which some tooling historically treated as the critical bit.
pub const CAA_FLAG_LEGACY_CRITICAL: u8 = 0b0000_0001;

// TLS failure signatures
/// Error-text fragments produced when a TLS client receives a plaintext HTTP
/// answer. Matching is case-insensitive over the whole error chain.
pub const PROTOCOL_MISMATCH_SIGNATURES: [&str; 4] = [
    "server gave http response to https client",
    "invalidcontenttype",
    "received corrupt message",
    "wrong version number",
];
