//! Domain name normalization and public-suffix utilities.
//!
//! This module provides the name handling shared by the checkers:
//! - `normalize_domain()` - trims, lowercases and drops the root dot
//! - `strip_wildcard()` - separates a leading `*.` marker from the name
//! - `caa_search_path()` - the names a CAA lookup climbs through, from the
//!   name itself up to its public suffix
//!
//! Public suffixes come from the compiled-in Public Suffix List (`psl`).

/// Normalizes a user-supplied domain name.
///
/// Surrounding whitespace and a trailing root dot are removed and ASCII letters
/// are lowercased, so `"  WWW.Example.COM. "` becomes `"www.example.com"`.
pub fn normalize_domain(domain: &str) -> String {
    domain.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Splits a leading `*.` wildcard marker off a domain name.
///
/// Returns the remaining name and whether the marker was present.
pub fn strip_wildcard(domain: &str) -> (&str, bool) {
    match domain.strip_prefix("*.") {
        Some(rest) => (rest, true),
        None => (domain, false),
    }
}

/// Returns the public suffix of `domain` (e.g. `"co.uk"` for `"example.co.uk"`).
///
/// Names not covered by an explicit rule fall back to their last label.
/// Returns `None` when the name has no suffix at all (e.g. the empty string).
pub fn public_suffix(domain: &str) -> Option<&str> {
    psl::suffix_str(domain)
}

/// Whether `domain` is itself a public suffix, where a CAA walk stops.
///
/// A name without any computable suffix is treated as a boundary too.
pub fn is_public_suffix_boundary(domain: &str) -> bool {
    public_suffix(domain).map_or(true, |suffix| suffix == domain)
}

/// Drops the leftmost label: `a.b.example.com` → `b.example.com`.
pub fn parent_domain(domain: &str) -> Option<&str> {
    domain
        .split_once('.')
        .map(|(_, parent)| parent)
        .filter(|parent| !parent.is_empty())
}

/// Lists the names a CAA evaluation queries, in order.
///
/// The walk starts at `domain` and climbs one label at a time; the public
/// suffix itself is the last name queried.
///
/// ```
/// use acme_preflight::domain::caa_search_path;
///
/// assert_eq!(
///     caa_search_path("a.b.example.com"),
///     vec!["a.b.example.com", "b.example.com", "example.com", "com"]
/// );
/// ```
pub fn caa_search_path(domain: &str) -> Vec<&str> {
    let mut path = vec![domain];
    let mut current = domain;
    while !is_public_suffix_boundary(current) {
        match parent_domain(current) {
            Some(parent) => {
                path.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    path
}
