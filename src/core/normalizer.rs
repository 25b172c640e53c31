// src/core/normalizer.rs

use tracing::{debug, warn};
use url::Url;

use crate::core::error::AuditError;
use crate::core::models::{AuditRequest, NormalizedTarget};

const SECURE_SCHEME_PREFIX: &str = "https://";
const RECOGNIZED_PREFIXES: [&str; 2] = ["http://", "https://"];

/// Turns raw user input into a fetchable URL and its bare host.
///
/// Input without an `http://` or `https://` prefix gets `https://` prepended. The URL
/// string is otherwise kept as written, so normalizing an already-normalized URL returns
/// the same target.
///
/// # Errors
///
/// Returns `AuditError::InvalidUrl` when the input is empty, does not parse, or has no host.
/// No network call may be made for such input.
pub fn normalize(request: &AuditRequest) -> Result<NormalizedTarget, AuditError> {
    let trimmed = request.raw_input.trim();
    if trimmed.is_empty() {
        warn!("Rejected empty audit input.");
        return Err(AuditError::invalid_url(trimmed, "input is empty"));
    }

    let url = if has_recognized_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{}{}", SECURE_SCHEME_PREFIX, trimmed)
    };

    let parsed = Url::parse(&url).map_err(|e| {
        warn!(input = trimmed, error = %e, "Input could not be parsed as a URL.");
        AuditError::invalid_url(trimmed, e.to_string())
    })?;

    let host = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| AuditError::invalid_url(trimmed, "URL has no host"))?
        .to_string();

    debug!(url = %url, host = %host, "Normalized audit target.");
    Ok(NormalizedTarget { url, host })
}

fn has_recognized_scheme(input: &str) -> bool {
    RECOGNIZED_PREFIXES.iter().any(|prefix| {
        input
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(input: &str) -> NormalizedTarget {
        normalize(&AuditRequest::new(input)).expect("input should normalize")
    }

    #[test]
    fn bare_host_gets_secure_scheme() {
        let t = target("example.com");
        assert_eq!(t.url, "https://example.com");
        assert_eq!(t.host, "example.com");
    }

    #[test]
    fn explicit_http_is_left_alone() {
        let t = target("http://example.com");
        assert_eq!(t.url, "http://example.com");
        assert_eq!(t.host, "example.com");
    }

    #[test]
    fn normalization_is_a_fixed_point() {
        for input in ["example.com", "http://example.com/path?q=1", "www.example.org:8443/a", "  example.net  "] {
            let once = target(input);
            let twice = target(&once.url);
            assert_eq!(once, twice, "normalizing {input} twice changed the target");
        }
    }

    #[test]
    fn host_excludes_port_and_path() {
        let t = target("https://sub.example.com:8080/a/b");
        assert_eq!(t.host, "sub.example.com");
    }

    #[test]
    fn scheme_check_ignores_case() {
        let t = target("HTTPS://Example.com");
        assert_eq!(t.url, "HTTPS://Example.com");
        assert_eq!(t.host, "example.com");
    }

    #[test]
    fn unparseable_input_is_invalid_url() {
        for input in ["", "   ", "https://", "http://exa mple.com", "https://[::1"] {
            let err = normalize(&AuditRequest::new(input)).unwrap_err();
            assert!(matches!(err, AuditError::InvalidUrl { .. }), "{input:?} gave {err:?}");
        }
    }
}
