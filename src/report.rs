//! Rendering of diagnostic reports.
//!
//! Two formats are supported:
//! - plain text for terminals, with severities colored
//! - a single JSON document for piping to `jq` or other tooling

use colored::*;
use serde_json::json;

use crate::problem::Severity;
use crate::DiagnosticReport;

/// Renders the report as human-readable text.
pub fn render_plain(report: &DiagnosticReport) -> String {
    let mut out = String::new();

    if report.problems.is_empty() {
        out.push_str(&format!(
            "✅ No problems found for {} ({})\n",
            report.domain, report.method
        ));
    } else {
        out.push_str(&format!(
            "Found {} problem{} for {} ({})\n",
            report.problems.len(),
            if report.problems.len() == 1 { "" } else { "s" },
            report.domain,
            report.method
        ));
    }

    for problem in &report.problems {
        out.push('\n');
        out.push_str(&format!(
            "[{}] {}\n",
            colored_severity(problem.severity()),
            problem.name().bold()
        ));
        out.push_str(&format!("  {}\n", problem.explanation()));
        if !problem.detail().is_empty() {
            out.push_str("  Detail:\n");
            for line in problem.detail().lines() {
                out.push_str(&format!("    {line}\n"));
            }
        }
    }

    if !report.http_results.is_empty() {
        out.push_str("\nValidation fetches:\n");
        for result in &report.http_results {
            out.push_str(&format!("  {} {result}\n", result.ip));
        }
    }

    out
}

/// Renders the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns a `serde_json::Error` if serialization fails.
pub fn render_json(report: &DiagnosticReport) -> Result<String, serde_json::Error> {
    let document = json!({
        "domain": report.domain,
        "method": report.method,
        "blocking": report.is_blocking(),
        "worst_severity": report.worst_severity(),
        "problems": report.problems,
        "http_results": report.http_results,
    });
    serde_json::to_string_pretty(&document)
}

fn colored_severity(severity: Severity) -> ColoredString {
    let label = severity.as_ref();
    match severity {
        Severity::Fatal => label.red().bold(),
        Severity::Error => label.red(),
        Severity::Warning => label.yellow(),
        Severity::Debug => label.blue(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Problem;
    use crate::{HttpCheckResult, ValidationMethod};
    use std::net::{IpAddr, Ipv4Addr};

    fn report(problems: Vec<Problem>) -> DiagnosticReport {
        DiagnosticReport {
            domain: "example.com".to_string(),
            method: ValidationMethod::Http01,
            problems,
            http_results: vec![HttpCheckResult::new(IpAddr::V4(Ipv4Addr::new(
                192, 0, 2, 1,
            )))],
        }
    }

    #[test]
    fn test_render_plain_without_problems() {
        let text = render_plain(&report(vec![]));
        assert!(text.contains("No problems found for example.com (http-01)"));
        assert!(text.contains("192.0.2.1 [Address Type=IPv4,Response Code=0,Server=]"));
    }

    #[test]
    fn test_render_plain_lists_problems_with_detail_lines() {
        let text = render_plain(&report(vec![Problem::new(
            "CaaIssuanceNotAllowed",
            "No CAA record allows issuance.",
            "example.com.\tIN\tCAA\t0 issue \"pki.goog\"\nexample.com.\tIN\tCAA\t0 issue \"digicert.com\"",
            Severity::Fatal,
        )]));
        assert!(text.contains("Found 1 problem for example.com"));
        assert!(text.contains("CaaIssuanceNotAllowed"));
        assert!(text.contains("Fatal"));
        assert!(text.contains("  No CAA record allows issuance.\n"));
        assert!(text.contains("    example.com.\tIN\tCAA\t0 issue \"digicert.com\"\n"));
    }

    #[test]
    fn test_render_plain_omits_empty_detail() {
        let text = render_plain(&report(vec![Problem::new(
            "NoRecords",
            "Nothing resolved.",
            "",
            Severity::Fatal,
        )]));
        assert!(!text.contains("Detail:"));
    }

    #[test]
    fn test_render_json() {
        let rendered = render_json(&report(vec![Problem::new(
            "ANotWorking",
            "explained",
            "connection refused",
            Severity::Error,
        )]))
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["domain"], "example.com");
        assert_eq!(value["method"], "http-01");
        assert_eq!(value["blocking"], true);
        assert_eq!(value["worst_severity"], "Error");
        assert_eq!(value["problems"][0]["name"], "ANotWorking");
        assert_eq!(value["http_results"][0]["ip"], "192.0.2.1");
        assert!(value["http_results"][0]["status_code"].is_null());
    }

    #[test]
    fn test_render_json_without_problems() {
        let rendered = render_json(&report(vec![])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["blocking"], false);
        assert!(value["worst_severity"].is_null());
    }
}
