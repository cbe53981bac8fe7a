//! acme_preflight library: find out why certificate issuance would fail
//!
//! This library diagnoses the two checks a certificate authority performs that
//! domain owners most often get wrong:
//! - the HTTP-01 validation fetch, replayed against each resolved address with
//!   the CA's redirect policy ([`check_http`])
//! - CAA authorization, evaluated up the name hierarchy ([`check_caa`])
//!
//! Findings are returned as [`Problem`]s; errors are reserved for checks that
//! could not run.
//!
//! # Example
//!
//! ```no_run
//! use acme_preflight::dns::HickoryLookup;
//! use acme_preflight::initialization::{init_name_server_pool, init_resolver};
//! use acme_preflight::{run_checks, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     domain: "example.com".to_string(),
//!     ..Default::default()
//! };
//! let lookup = HickoryLookup::new(init_resolver(), init_name_server_pool());
//!
//! let report = run_checks(&config, &lookup).await?;
//! for problem in &report.problems {
//!     println!("[{}] {}: {}", problem.severity(), problem.name(), problem.detail());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod caa;
pub mod config;
pub mod dns;
pub mod domain;
pub mod error_handling;
pub mod http01;
pub mod initialization;
pub mod problem;
pub mod report;

// Re-export public API
pub use caa::check_caa;
pub use config::{
    CaaCheckConfig, Cli, Config, HttpCheckConfig, LogFormat, LogLevel, OutputFormat,
    ValidationMethod,
};
pub use error_handling::{CaaError, DnsError, FetchError, RedirectViolation};
pub use http01::{check_http, HttpCheckResult};
pub use problem::{Problem, Severity};
pub use run::{run_checks, DiagnosticReport};

// Orchestration of the individual checkers for one domain
mod run {
    use futures::future::join_all;
    use log::{debug, info};
    use serde::Serialize;

    use crate::caa::check_caa;
    use crate::config::{Config, ValidationMethod};
    use crate::dns::{resolve_host_addresses, DnsLookup, ResolvedAddresses};
    use crate::domain::{normalize_domain, strip_wildcard};
    use crate::error_handling::CaaError;
    use crate::http01::{check_http, HttpCheckResult};
    use crate::problem::{Problem, Severity};

    /// Everything one diagnostic run found.
    #[derive(Debug, Clone, Serialize)]
    pub struct DiagnosticReport {
        /// Normalized domain that was checked
        pub domain: String,
        /// Validation method the checks were selected for
        pub method: ValidationMethod,
        /// Findings, most severe first
        pub problems: Vec<Problem>,
        /// One entry per address the validation fetch was replayed against
        pub http_results: Vec<HttpCheckResult>,
    }

    impl DiagnosticReport {
        /// Whether any finding is expected to stop issuance.
        pub fn is_blocking(&self) -> bool {
            self.problems.iter().any(Problem::is_blocking)
        }

        pub fn worst_severity(&self) -> Option<Severity> {
            self.problems.iter().map(Problem::severity).max()
        }
    }

    /// Runs every checker that applies to `config.domain` and `config.method`.
    ///
    /// - A wildcard name with a method other than dns-01 is reported as
    ///   `MethodNotSuitable`.
    /// - CAA is evaluated for every method.
    /// - For http-01 the validation fetch is replayed against every AAAA and A
    ///   address, concurrently.
    ///
    /// # Errors
    ///
    /// Returns a `CaaError` if the CAA evaluation itself could not run.
    pub async fn run_checks<L: DnsLookup>(
        config: &Config,
        lookup: &L,
    ) -> Result<DiagnosticReport, CaaError> {
        let domain = normalize_domain(&config.domain);
        let (name, wildcard) = strip_wildcard(&domain);
        info!("Checking {domain} for {}", config.method);

        let mut problems = Vec::new();
        let mut http_results = Vec::new();

        if wildcard && !config.method.supports_wildcard() {
            problems.push(method_not_suitable(&domain, config.method));
        }

        problems.extend(check_caa(lookup, &domain, &config.caa.issuer_domain).await?);

        if config.method == ValidationMethod::Http01 && !wildcard {
            match resolve_host_addresses(name, lookup).await {
                Ok(addresses) if addresses.is_empty() => {
                    problems.push(no_records(name));
                }
                Ok(addresses) => {
                    let results = check_addresses(name, &addresses, config).await;
                    for (result, problem) in results {
                        debug!("{name} via {}: {result}", result.ip);
                        http_results.push(result);
                        problems.extend(problem);
                    }
                }
                Err((record_type, e)) => {
                    problems.push(Problem::dns_lookup_failed(
                        name,
                        &record_type.to_string(),
                        e.to_string(),
                    ));
                }
            }
        }

        problems.sort_by(|a, b| b.severity().cmp(&a.severity()));
        Ok(DiagnosticReport {
            domain,
            method: config.method,
            problems,
            http_results,
        })
    }

    async fn check_addresses(
        name: &str,
        addresses: &ResolvedAddresses,
        config: &Config,
    ) -> Vec<(HttpCheckResult, Option<Problem>)> {
        join_all(
            addresses
                .all()
                .map(|address| check_http(name, address, &config.http)),
        )
        .await
    }

    fn method_not_suitable(domain: &str, method: ValidationMethod) -> Problem {
        Problem::new(
            "MethodNotSuitable",
            format!(
                "A wildcard domain name ({domain}) was provided with the {method} validation \
                 method. Wildcard certificates can only be validated using dns-01."
            ),
            "",
            Severity::Fatal,
        )
    }

    fn no_records(name: &str) -> Problem {
        Problem::new(
            "NoRecords",
            format!(
                "No valid A or AAAA records could be ultimately resolved for {name}. This means \
                 that the CA would not be able to connect to your domain to perform HTTP \
                 validation, since it would not know where to connect to."
            ),
            "",
            Severity::Fatal,
        )
    }

}
