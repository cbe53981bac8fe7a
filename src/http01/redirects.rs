//! Redirect following under a validation agent's policy.
//!
//! Redirects are followed manually (the client never follows them itself), so
//! every hop passes through [`check_redirect`] and a rejection comes back as a
//! typed [`RedirectViolation`] together with the response that caused it.

use std::net::SocketAddr;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, HOST, LOCATION};
use reqwest::Url;
use url::Host;

use super::types::HttpCheckResult;
use crate::config::{ALLOWED_REDIRECT_PORTS, REDIRECT_STATUS_CODES};
use crate::error_handling::{FetchError, RedirectViolation};

/// Where a redirect points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub url: Url,
    /// Port written in the `Location` header. Unlike [`Url::port`] this keeps
    /// a port equal to the scheme default, e.g. the `21` of `ftp://host:21/`.
    pub explicit_port: Option<u16>,
}

impl RedirectTarget {
    /// Resolves `location` against `current`.
    pub fn resolve(current: &Url, location: &str) -> Result<Self, url::ParseError> {
        let url = current.join(location)?;
        let explicit_port = url.port().or_else(|| authority_port(location.trim()));
        Ok(Self { url, explicit_port })
    }
}

impl From<Url> for RedirectTarget {
    fn from(url: Url) -> Self {
        let explicit_port = url.port();
        Self { url, explicit_port }
    }
}

/// Port in the authority of an absolute or scheme-relative reference.
fn authority_port(location: &str) -> Option<u16> {
    let rest = match location.split_once("://") {
        Some((scheme, rest))
            if !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) =>
        {
            rest
        }
        _ => location.strip_prefix("//")?,
    };
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);
    let (_, port) = host_port.rsplit_once(':')?;
    // `[::1]` has colons but no port
    if port.contains(']') {
        return None;
    }
    port.parse().ok()
}

/// Applies the redirect policy to the target of redirect number `hop` (1-based).
///
/// Rules are checked in order and the first violation wins: hop count, explicit
/// port, scheme, and a hostname ending in `.well-known`.
pub fn check_redirect(
    target: &RedirectTarget,
    hop: usize,
    max_redirects: usize,
) -> Result<(), RedirectViolation> {
    let RedirectTarget { url: target, explicit_port } = target;
    if hop > max_redirects {
        return Err(RedirectViolation::TooManyRedirects {
            count: hop - 1,
            url: target.to_string(),
        });
    }

    if let Some(port) = *explicit_port {
        if !ALLOWED_REDIRECT_PORTS.contains(&port) {
            return Err(RedirectViolation::BadPort {
                url: target.to_string(),
                port,
            });
        }
    }

    let scheme = target.scheme().to_ascii_lowercase();
    if scheme != "http" && scheme != "https" {
        return Err(RedirectViolation::BadScheme {
            url: target.to_string(),
            scheme,
        });
    }

    // domain.tld.well-known/acme-challenge: the slash after the host was lost
    if target
        .host_str()
        .is_some_and(|host| host.ends_with(".well-known"))
    {
        return Err(RedirectViolation::MissingTrailingSlash {
            url: target.to_string(),
        });
    }

    Ok(())
}

/// Returns the URL a response redirects to, if it is a followable redirect.
///
/// Only 301, 302, 303, 307 and 308 with a `Location` header are followed; a
/// relative location is resolved against `current`.
///
/// # Errors
///
/// Returns `FetchError::InvalidLocation` if the header is not a usable URL.
pub fn redirect_location(
    current: &Url,
    status: u16,
    headers: &HeaderMap,
) -> Result<Option<RedirectTarget>, FetchError> {
    if !REDIRECT_STATUS_CODES.contains(&status) {
        return Ok(None);
    }
    let Some(location) = headers.get(LOCATION) else {
        log::debug!("Redirect status {status} for {current} but no Location header");
        return Ok(None);
    };

    let location = location
        .to_str()
        .map_err(|e| FetchError::InvalidLocation {
            location: String::from_utf8_lossy(location.as_bytes()).into_owned(),
            reason: e.to_string(),
        })?;
    RedirectTarget::resolve(current, location)
        .map(Some)
        .map_err(|e| FetchError::InvalidLocation {
            location: location.to_string(),
            reason: e.to_string(),
        })
}

/// Maps a request URL onto the pinned address.
///
/// Hostnames are left alone because the client's resolver already pins them.
/// IP-literal hosts bypass name resolution, so the URL itself is rewritten to
/// the pinned address and the original authority is returned for the `Host`
/// header.
pub fn pin_url(url: &Url, pinned: SocketAddr) -> (Url, Option<String>) {
    if !matches!(url.host(), Some(Host::Ipv4(_)) | Some(Host::Ipv6(_))) {
        return (url.clone(), None);
    }

    let authority = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => return (url.clone(), None),
    };

    let mut dial = url.clone();
    if dial.set_ip_host(pinned.ip()).is_err() {
        return (url.clone(), None);
    }
    if url.port().is_none() && pinned.port() != 0 {
        // Cannot fail for http(s) URLs with a host
        let _ = dial.set_port(Some(pinned.port()));
    }
    (dial, Some(authority))
}

/// Fetches `start`, following redirects under the policy until a final response.
///
/// `result` is updated after every response, so it holds the last response
/// seen even when an error is returned.
pub async fn follow_redirects(
    client: &reqwest::Client,
    start: Url,
    pinned: SocketAddr,
    max_redirects: usize,
    result: &mut HttpCheckResult,
) -> Result<(), FetchError> {
    let mut current = start;
    let mut hop = 0usize;

    loop {
        let (dial, host_header) = pin_url(&current, pinned);
        let mut request = client
            .get(dial)
            .header(ACCEPT, HeaderValue::from_static("*/*"));
        if let Some(authority) = host_header {
            request = request.header(HOST, authority);
        }

        let response = request.send().await.map_err(FetchError::Transport)?;
        let status = response.status().as_u16();
        result.record_response(status, response.headers());
        log::debug!("GET {current} via {} -> {status}", pinned.ip());

        let Some(next) = redirect_location(&current, status, response.headers())? else {
            return Ok(());
        };

        hop += 1;
        check_redirect(&next, hop, max_redirects)?;
        log::debug!("Following redirect {hop} from {current} to {}", next.url);
        current = next.url;
    }
}
