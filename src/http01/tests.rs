// HTTP-01 simulator unit tests.

use super::*;
use crate::error_handling::RedirectViolation;
use reqwest::header::{HeaderMap, HeaderValue, LOCATION, SERVER};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;

fn url(s: &str) -> Url {
    Url::parse(s).unwrap_or_else(|_| panic!("Invalid URL in test: {}", s))
}

fn target(s: &str) -> RedirectTarget {
    RedirectTarget::from(url(s))
}

fn location_headers(location: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(LOCATION, HeaderValue::from_str(location).unwrap());
    headers
}

fn v4() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1))
}

fn v6() -> IpAddr {
    IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1))
}

#[test]
fn test_check_redirect_allows_up_to_max() {
    let target = target("http://example.com/next");
    for hop in 1..=10 {
        assert_eq!(check_redirect(&target, hop, 10), Ok(()), "hop {hop}");
    }
}

#[test]
fn test_check_redirect_rejects_hop_after_max() {
    let target = target("http://example.com/hop/11");
    assert_eq!(
        check_redirect(&target, 11, 10),
        Err(RedirectViolation::TooManyRedirects {
            count: 10,
            url: "http://example.com/hop/11".to_string(),
        })
    );
}

#[test]
fn test_check_redirect_ports() {
    assert!(check_redirect(&target("http://example.com:80/"), 1, 10).is_ok());
    assert!(check_redirect(&target("http://example.com:443/"), 1, 10).is_ok());
    assert!(check_redirect(&target("https://example.com:443/"), 1, 10).is_ok());
    assert_eq!(
        check_redirect(&target("http://example.com:8080/x"), 1, 10),
        Err(RedirectViolation::BadPort {
            url: "http://example.com:8080/x".to_string(),
            port: 8080,
        })
    );
}

#[test]
fn test_check_redirect_schemes() {
    assert!(check_redirect(&target("HTTPS://example.com/"), 1, 10).is_ok());
    assert_eq!(
        check_redirect(&target("ftp://example.com/file"), 1, 10),
        Err(RedirectViolation::BadScheme {
            url: "ftp://example.com/file".to_string(),
            scheme: "ftp".to_string(),
        })
    );
}

#[test]
fn test_check_redirect_missing_trailing_slash() {
    let target = target("http://example.com.well-known/acme-challenge/letsdebug-test");
    assert_eq!(
        check_redirect(&target, 1, 10),
        Err(RedirectViolation::MissingTrailingSlash {
            url: "http://example.com.well-known/acme-challenge/letsdebug-test".to_string(),
        })
    );
}

#[test]
fn test_check_redirect_first_violation_wins() {
    // Too many redirects is checked before anything else
    let target = target("ftp://example.com:2121/");
    assert!(matches!(
        check_redirect(&target, 11, 10),
        Err(RedirectViolation::TooManyRedirects { .. })
    ));
    // Port before scheme
    assert!(matches!(
        check_redirect(&target, 1, 10),
        Err(RedirectViolation::BadPort { port: 2121, .. })
    ));
}

#[test]
fn test_redirect_location_relative_and_absolute() {
    let current = url("http://example.com/.well-known/acme-challenge/letsdebug-test");

    let next = redirect_location(&current, 301, &location_headers("/elsewhere")).unwrap();
    assert_eq!(next, Some(target("http://example.com/elsewhere")));

    let next = redirect_location(
        &current,
        302,
        &location_headers("https://www.example.com/.well-known/acme-challenge/letsdebug-test"),
    )
    .unwrap();
    assert_eq!(
        next,
        Some(target("https://www.example.com/.well-known/acme-challenge/letsdebug-test"))
    );
}

#[test]
fn test_redirect_location_keeps_explicit_default_port() {
    let current = url("http://example.com/.well-known/acme-challenge/letsdebug-test");

    let next = redirect_location(&current, 302, &location_headers("ftp://example.com:21/x"))
        .unwrap()
        .expect("302 with Location is a redirect");
    assert_eq!(next.url.port(), None);
    assert_eq!(next.explicit_port, Some(21));
    // Port is checked before scheme
    assert_eq!(
        check_redirect(&next, 1, 10),
        Err(RedirectViolation::BadPort {
            url: "ftp://example.com/x".to_string(),
            port: 21,
        })
    );

    let next = redirect_location(&current, 302, &location_headers("http://example.com:80/"))
        .unwrap()
        .expect("302 with Location is a redirect");
    assert_eq!(next.explicit_port, Some(80));
    assert!(check_redirect(&next, 1, 10).is_ok());

    // No port written, so the scheme is what gets rejected
    let next = redirect_location(&current, 302, &location_headers("ftp://example.com/x"))
        .unwrap()
        .expect("302 with Location is a redirect");
    assert_eq!(next.explicit_port, None);
    assert!(matches!(
        check_redirect(&next, 1, 10),
        Err(RedirectViolation::BadScheme { .. })
    ));
}

#[test]
fn test_authority_port_ignores_paths_and_ipv6_literals() {
    let current = url("http://example.com/a");
    for (location, port) in [
        ("/x:21", None),
        ("//example.com:21/x", Some(21)),
        ("http://user:pw@example.com/x", None),
        ("http://[2001:db8::1]/x", None),
        ("ftp://[2001:db8::1]:21/x", Some(21)),
        ("http://example.com/x?next=ftp://h:21", None),
    ] {
        let next = RedirectTarget::resolve(&current, location).unwrap();
        assert_eq!(next.explicit_port, port, "{location}");
    }
}

#[test]
fn test_redirect_location_only_follows_redirect_statuses() {
    let current = url("http://example.com/");
    let headers = location_headers("/x");
    for status in [200, 304, 404, 300] {
        assert_eq!(redirect_location(&current, status, &headers).unwrap(), None);
    }
    for status in [301, 302, 303, 307, 308] {
        assert!(redirect_location(&current, status, &headers).unwrap().is_some());
    }
}

#[test]
fn test_redirect_location_without_header() {
    let current = url("http://example.com/");
    assert_eq!(
        redirect_location(&current, 302, &HeaderMap::new()).unwrap(),
        None
    );
}

#[test]
fn test_redirect_location_unparseable() {
    let current = url("http://example.com/");
    let result = redirect_location(&current, 302, &location_headers("http://exa mple.com/"));
    assert!(matches!(result, Err(FetchError::InvalidLocation { .. })));
}

#[test]
fn test_pin_url_leaves_hostnames_alone() {
    let pinned = SocketAddr::new(v4(), 0);
    let original = url("http://other.example.net/path");
    assert_eq!(pin_url(&original, pinned), (original.clone(), None));
}

#[test]
fn test_pin_url_rewrites_ip_literals() {
    let pinned = SocketAddr::new(v4(), 0);
    let (dial, host) = pin_url(&url("http://198.51.100.9/path?q=1"), pinned);
    assert_eq!(dial, url("http://192.0.2.1/path?q=1"));
    assert_eq!(host.as_deref(), Some("198.51.100.9"));

    let pinned = SocketAddr::new(v6(), 0);
    let (dial, host) = pin_url(&url("https://[2001:db8::99]:443/x"), pinned);
    assert_eq!(dial, url("https://[2001:db8::1]/x"));
    assert_eq!(host.as_deref(), Some("[2001:db8::99]"));
}

#[test]
fn test_pin_url_applies_port_override() {
    let pinned = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8081);
    let (dial, host) = pin_url(&url("http://198.51.100.9/"), pinned);
    assert_eq!(dial, url("http://127.0.0.1:8081/"));
    assert_eq!(host.as_deref(), Some("198.51.100.9"));
}

#[test]
fn test_translate_redirect_violation() {
    let violation = RedirectViolation::BadPort {
        url: "http://example.com:8080/".to_string(),
        port: 8080,
    };
    let problem = translate_http_error("example.com", v4(), &FetchError::Redirect(violation));
    assert_eq!(problem.name(), "BadRedirect");
    assert_eq!(problem.severity(), Severity::Error);
    assert_eq!(
        problem.detail(),
        "Bad port number provided when fetching http://example.com:8080/: 8080"
    );
}

#[test]
fn test_translate_missing_trailing_slash_is_specific() {
    let violation = RedirectViolation::MissingTrailingSlash {
        url: "http://example.com.well-known/acme-challenge/x".to_string(),
    };
    let problem = translate_http_error("example.com", v4(), &FetchError::Redirect(violation));
    assert_eq!(problem.name(), "RedirectMissingTrailingSlash");
    assert!(problem.detail().contains("missing a trailing slash"));
}

#[test]
fn test_translate_by_address_family() {
    let timeout = FetchError::Timeout {
        url: "http://example.com/".to_string(),
        after: Duration::from_secs(10),
    };

    let problem = translate_http_error("example.com", v4(), &timeout);
    assert_eq!(problem.name(), "ANotWorking");
    assert!(problem.explanation().contains("192.0.2.1"));
    assert_eq!(problem.detail(), timeout.to_string());

    let problem = translate_http_error("example.com", v6(), &timeout);
    assert_eq!(problem.name(), "AAAANotWorking");
    assert!(problem.explanation().contains("2001:db8::1"));
    assert!(problem.explanation().contains("will not fall back"));
}

#[test]
fn test_translate_protocol_mismatch_text() {
    let error = FetchError::InvalidLocation {
        location: "x".to_string(),
        reason: "http: server gave HTTP response to HTTPS client".to_string(),
    };
    let problem = translate_http_error("example.com", v4(), &error);
    assert_eq!(problem.name(), "WebserverMisconfiguration");
    assert!(problem
        .detail()
        .starts_with("Web server is serving the wrong protocol on the wrong port: "));
    assert!(problem.detail().contains("previous HTTP redirect"));
}

#[test]
fn test_http_check_result_display() {
    let mut result = HttpCheckResult::new(v4());
    assert!(result.is_zero());
    assert_eq!(
        result.to_string(),
        "[Address Type=IPv4,Response Code=0,Server=]"
    );

    let mut headers = HeaderMap::new();
    headers.insert(SERVER, HeaderValue::from_static("nginx"));
    result.record_response(200, &headers);
    assert!(!result.is_zero());
    assert_eq!(
        result.to_string(),
        "[Address Type=IPv4,Response Code=200,Server=nginx]"
    );

    let result = HttpCheckResult::new(v6());
    assert!(result.to_string().starts_with("[Address Type=IPv6,"));
}

#[test]
fn test_record_response_overwrites_server_header() {
    let mut result = HttpCheckResult::new(v4());
    let mut headers = HeaderMap::new();
    headers.insert(SERVER, HeaderValue::from_static("apache"));
    result.record_response(301, &headers);
    result.record_response(200, &HeaderMap::new());
    assert_eq!(result.status_code, Some(200));
    assert_eq!(result.server_header, None);
}

#[tokio::test]
async fn test_check_http_invalid_domain_is_internal_problem() {
    let (result, problem) = check_http("exa mple.com", v4(), &HttpCheckConfig::default()).await;
    assert!(result.is_zero());
    let problem = problem.expect("a malformed domain must be reported");
    assert_eq!(problem.name(), "InternalProblem");
    assert!(problem
        .detail()
        .starts_with("Failed to construct validation request"));
}

#[tokio::test]
async fn test_check_http_client_build_failure_is_internal_problem() {
    let config = HttpCheckConfig {
        user_agent: "bad\nagent".to_string(),
        ..HttpCheckConfig::default()
    };
    let (result, problem) = check_http("example.com", v4(), &config).await;
    assert!(result.is_zero());
    let problem = problem.expect("a client that cannot be built must be reported");
    assert_eq!(problem.name(), "InternalProblem");
    assert!(problem
        .detail()
        .starts_with("Failed to construct validation client: HTTP client initialization error"));
}

#[tokio::test]
async fn test_check_http_canonicalizes_mapped_ipv4() {
    let mapped: IpAddr = "::ffff:127.0.0.1".parse().unwrap();
    let config = HttpCheckConfig {
        timeout: Duration::from_millis(200),
        // Port 1 on loopback is closed on any sane test host
        port: 1,
        ..HttpCheckConfig::default()
    };
    let (result, problem) = check_http("example.com", mapped, &config).await;
    assert_eq!(result.ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
    assert_eq!(problem.map(|p| p.name()), Some("ANotWorking"));
}
