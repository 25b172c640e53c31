// src/core/error.rs

use thiserror::Error;

/// Failures that stop an audit or a report export.
///
/// Branch failures (HTTP fetch, TLS handshake, malformed HTML) never appear here: they
/// are carried as data inside the report so the other branch can still complete.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("invalid URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("could not export report: {0}")]
    Export(String),
}

impl AuditError {
    pub fn invalid_url(input: &str, reason: impl Into<String>) -> Self {
        AuditError::InvalidUrl {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
