//! Error text extraction and categorization.
//!
//! Transport errors arrive wrapped several layers deep (reqwest → hyper → io →
//! rustls). The helpers here flatten the chain into the text reported to the
//! user and recognize the failure families the checkers distinguish.

use std::error::Error;

use crate::config::PROTOCOL_MISMATCH_SIGNATURES;

/// Joins an error and all of its sources with `": "`.
///
/// A source whose text is already contained in the accumulated message is
/// skipped, so wrappers that repeat their cause do not produce duplicates.
pub fn describe_error_chain(error: &(dyn Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Whether the error text shows a TLS client talking to a plaintext HTTP peer.
pub fn is_protocol_mismatch(error_text: &str) -> bool {
    let lowered = error_text.to_lowercase();
    PROTOCOL_MISMATCH_SIGNATURES
        .iter()
        .any(|signature| lowered.contains(signature))
}
