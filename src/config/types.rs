//! Configuration types and CLI options.
//!
//! This module defines the enums and structs used for command-line parsing and
//! for configuring the two checkers.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::config::constants::{
    DEFAULT_ISSUER_DOMAIN, DEFAULT_USER_AGENT, HTTP_TIMEOUT_SECS, MAX_REDIRECTS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Output format of the diagnostic report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One block per problem, colored by severity
    Plain,
    /// The whole report as a single JSON document
    Json,
}

/// ACME challenge type the domain owner intends to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize)]
pub enum ValidationMethod {
    /// HTTP-01: a file served under `/.well-known/acme-challenge/`
    #[value(name = "http-01")]
    #[serde(rename = "http-01")]
    Http01,
    /// DNS-01: a TXT record under `_acme-challenge`
    #[value(name = "dns-01")]
    #[serde(rename = "dns-01")]
    Dns01,
    /// TLS-ALPN-01: a self-signed certificate negotiated via ALPN
    #[value(name = "tls-alpn-01")]
    #[serde(rename = "tls-alpn-01")]
    TlsAlpn01,
}

impl ValidationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMethod::Http01 => "http-01",
            ValidationMethod::Dns01 => "dns-01",
            ValidationMethod::TlsAlpn01 => "tls-alpn-01",
        }
    }

    /// Whether a CA accepts this method for wildcard names.
    pub fn supports_wildcard(&self) -> bool {
        matches!(self, ValidationMethod::Dns01)
    }
}

impl std::fmt::Display for ValidationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings of the validation-fetch simulator.
#[derive(Debug, Clone)]
pub struct HttpCheckConfig {
    /// User-Agent sent on every request
    pub user_agent: String,
    /// Bound on the whole fetch (all hops) and on each TCP dial
    pub timeout: Duration,
    /// Redirect hops followed before the next one is rejected
    pub max_redirects: usize,
    /// Port every dial is pinned to; `0` keeps the scheme's conventional port
    pub port: u16,
}

impl Default for HttpCheckConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            max_redirects: MAX_REDIRECTS,
            port: 0,
        }
    }
}

/// Settings of the CAA evaluator.
#[derive(Debug, Clone)]
pub struct CaaCheckConfig {
    /// Issuer domain that must be authorized (e.g. `letsencrypt.org`)
    pub issuer_domain: String,
}

impl Default for CaaCheckConfig {
    fn default() -> Self {
        Self {
            issuer_domain: DEFAULT_ISSUER_DOMAIN.to_string(),
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use acme_preflight::{Config, ValidationMethod};
///
/// let config = Config {
///     domain: "example.com".to_string(),
///     method: ValidationMethod::Http01,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Domain to diagnose; may carry a `*.` wildcard prefix
    pub domain: String,

    /// Intended validation method
    pub method: ValidationMethod,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Report output format
    pub output: OutputFormat,

    /// Validation-fetch simulator settings
    pub http: HttpCheckConfig,

    /// CAA evaluator settings
    pub caa: CaaCheckConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: String::new(),
            method: ValidationMethod::Http01,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            output: OutputFormat::Plain,
            http: HttpCheckConfig::default(),
            caa: CaaCheckConfig::default(),
        }
    }
}

/// Command-line arguments of the `acme_preflight` binary.
#[derive(Debug, Parser)]
#[command(
    name = "acme_preflight",
    version,
    about = "Diagnose ACME HTTP-01 and CAA problems before requesting a certificate"
)]
pub struct Cli {
    /// Domain to check (prefix with `*.` for a wildcard name)
    pub domain: String,

    /// Validation method that will be used
    #[arg(long, value_enum, default_value_t = ValidationMethod::Http01)]
    pub method: ValidationMethod,

    /// Issuer domain that CAA records must authorize
    #[arg(long, default_value = DEFAULT_ISSUER_DOMAIN)]
    pub issuer: String,

    /// User-Agent sent with validation requests
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Timeout for one validation fetch, in seconds
    #[arg(long, default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Report output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            domain: cli.domain,
            method: cli.method,
            log_level: cli.log_level,
            log_format: cli.log_format,
            output: cli.output,
            http: HttpCheckConfig {
                user_agent: cli.user_agent,
                timeout: Duration::from_secs(cli.timeout_seconds),
                ..HttpCheckConfig::default()
            },
            caa: CaaCheckConfig {
                issuer_domain: cli.issuer,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_http_check_config_defaults() {
        let config = HttpCheckConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_redirects, 10);
        assert_eq!(config.port, 0);
        assert!(config.user_agent.starts_with("acme_preflight/"));
    }

    #[test]
    fn test_caa_check_config_default_issuer() {
        assert_eq!(CaaCheckConfig::default().issuer_domain, "letsencrypt.org");
    }

    #[test]
    fn test_validation_method_wildcard_support() {
        assert!(ValidationMethod::Dns01.supports_wildcard());
        assert!(!ValidationMethod::Http01.supports_wildcard());
        assert!(!ValidationMethod::TlsAlpn01.supports_wildcard());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["acme_preflight", "example.com"]);
        let config = Config::from(cli);
        assert_eq!(config.domain, "example.com");
        assert_eq!(config.method, ValidationMethod::Http01);
        assert_eq!(config.caa.issuer_domain, "letsencrypt.org");
        assert_eq!(config.http.timeout, Duration::from_secs(10));
        assert_eq!(config.output, OutputFormat::Plain);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "acme_preflight",
            "*.example.com",
            "--method",
            "dns-01",
            "--issuer",
            "pki.goog",
            "--timeout-seconds",
            "3",
            "--output",
            "json",
        ]);
        let config = Config::from(cli);
        assert_eq!(config.domain, "*.example.com");
        assert_eq!(config.method, ValidationMethod::Dns01);
        assert_eq!(config.caa.issuer_domain, "pki.goog");
        assert_eq!(config.http.timeout, Duration::from_secs(3));
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_cli_rejects_unknown_method() {
        let result = Cli::try_parse_from(["acme_preflight", "example.com", "--method", "http"]);
        assert!(result.is_err());
    }
}
