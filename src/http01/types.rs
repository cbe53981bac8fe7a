//! Validation fetch result type.

use std::fmt;
use std::net::IpAddr;

use reqwest::header::{HeaderMap, SERVER};
use serde::Serialize;

/// What one validation fetch observed.
///
/// Status and `Server` header describe the last response received, which may
/// be a redirect that the policy then rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpCheckResult {
    /// Final HTTP status, `None` if no response arrived
    pub status_code: Option<u16>,
    /// Value of the `Server` response header
    pub server_header: Option<String>,
    /// Address that was dialed
    pub ip: IpAddr,
}

impl HttpCheckResult {
    pub fn new(ip: IpAddr) -> Self {
        Self {
            status_code: None,
            server_header: None,
            ip,
        }
    }

    /// True when no response was received at all.
    pub fn is_zero(&self) -> bool {
        self.status_code.is_none()
    }

    pub(crate) fn record_response(&mut self, status: u16, headers: &HeaderMap) {
        self.status_code = Some(status);
        self.server_header = headers
            .get(SERVER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
    }
}

impl fmt::Display for HttpCheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let address_type = match self.ip {
            IpAddr::V4(_) => "IPv4",
            IpAddr::V6(_) => "IPv6",
        };
        write!(
            f,
            "[Address Type={},Response Code={},Server={}]",
            address_type,
            self.status_code.unwrap_or(0),
            self.server_header.as_deref().unwrap_or("")
        )
    }
}
