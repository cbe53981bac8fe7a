//! Findings produced by the validation-fetch simulator.

use std::net::IpAddr;

use crate::error_handling::{is_protocol_mismatch, FetchError, RedirectViolation};
use crate::problem::{Problem, Severity};

/// Classifies a failed validation fetch into a finding.
///
/// Redirect-policy rejections are reported as such with the violation text as
/// detail. Otherwise a TLS client answered in plaintext points at the web
/// server setup, and anything else is blamed on the address family that was
/// dialed.
pub fn translate_http_error(domain: &str, address: IpAddr, error: &FetchError) -> Problem {
    if let FetchError::Redirect(violation) = error {
        return match violation {
            RedirectViolation::MissingTrailingSlash { .. } => {
                redirect_missing_trailing_slash(domain, violation.to_string())
            }
            _ => bad_redirect(domain, violation.to_string()),
        };
    }

    let detail = error.to_string();
    if is_protocol_mismatch(&detail) {
        return webserver_misconfiguration(
            domain,
            format!(
                "Web server is serving the wrong protocol on the wrong port: {detail}. \
                 This may be due to a previous HTTP redirect rather than a webserver misconfiguration."
            ),
        );
    }

    match address {
        IpAddr::V6(_) => aaaa_not_working(domain, address, detail),
        IpAddr::V4(_) => a_not_working(domain, address, detail),
    }
}

pub fn webserver_misconfiguration(domain: &str, detail: impl Into<String>) -> Problem {
    Problem::new(
        "WebserverMisconfiguration",
        format!("{domain}'s webserver may be misconfigured."),
        detail,
        Severity::Error,
    )
}

pub fn aaaa_not_working(domain: &str, address: IpAddr, detail: impl Into<String>) -> Problem {
    Problem::new(
        "AAAANotWorking",
        format!(
            "{domain} has an AAAA (IPv6) record ({address}) but a test ACME validation request \
             over port 80 has revealed problems. Let's Encrypt will prefer to use AAAA records, \
             if present, and will not fall back to IPv4 records. You should either ensure that \
             validation requests succeed over IPv6, or remove its AAAA record."
        ),
        detail,
        Severity::Error,
    )
}

pub fn a_not_working(domain: &str, address: IpAddr, detail: impl Into<String>) -> Problem {
    Problem::new(
        "ANotWorking",
        format!(
            "{domain} has an A (IPv4) record ({address}) but a test ACME validation request \
             over port 80 has revealed problems."
        ),
        detail,
        Severity::Error,
    )
}

pub fn bad_redirect(domain: &str, detail: impl Into<String>) -> Problem {
    Problem::new(
        "BadRedirect",
        format!(
            "Sending an ACME HTTP validation request to {domain} results in an unacceptable \
             redirect. This is most likely a misconfiguration of your web server or your web \
             application."
        ),
        detail,
        Severity::Error,
    )
}

pub fn redirect_missing_trailing_slash(domain: &str, detail: impl Into<String>) -> Problem {
    Problem::new(
        "RedirectMissingTrailingSlash",
        format!(
            "Sending an ACME HTTP validation request to {domain} results in a redirect to a \
             hostname ending in \".well-known\". The web server dropped the slash between the \
             domain name and the path while building the redirect."
        ),
        detail,
        Severity::Error,
    )
}
