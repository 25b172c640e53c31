//! Static, read-only database of every finding the classifier can emit.
//!
//! Each entry couples a machine-readable code with the human-readable message shown
//! next to the metric, plus a short remediation hint for the presentation layer.

use crate::core::models::Severity;

pub struct FindingDetail {
    /// Machine-readable identifier (e.g. "SEO_TITLE_TOO_SHORT").
    pub code: &'static str,
    pub severity: Severity,
    /// The message attached to the emitted `Finding`.
    pub title: &'static str,
    /// Copied into the `Finding` so the report carries its own fix-it hint.
    pub remediation: &'static str,
}

static FINDINGS: &[FindingDetail] = &[
    // --- SEO: Title ---
    FindingDetail {
        code: "SEO_TITLE_OPTIMAL",
        severity: Severity::Good,
        title: "Title length is optimal",
        remediation: "No action needed.",
    },
    FindingDetail {
        code: "SEO_TITLE_TOO_SHORT",
        severity: Severity::Warning,
        title: "Title is too short (< 30 characters)",
        remediation: "Write a descriptive <title> of 30 to 60 characters that names the page topic.",
    },
    FindingDetail {
        code: "SEO_TITLE_TOO_LONG",
        severity: Severity::Warning,
        title: "Title is too long (> 60 characters)",
        remediation: "Shorten the <title> to at most 60 characters so search results do not truncate it.",
    },
    // --- SEO: Meta Description ---
    FindingDetail {
        code: "SEO_META_DESCRIPTION_OPTIMAL",
        severity: Severity::Good,
        title: "Meta description length is optimal",
        remediation: "No action needed.",
    },
    FindingDetail {
        code: "SEO_META_DESCRIPTION_TOO_SHORT",
        severity: Severity::Warning,
        title: "Meta description is too short (< 120 characters)",
        remediation: "Add a <meta name=\"description\"> summary of 120 to 160 characters.",
    },
    FindingDetail {
        code: "SEO_META_DESCRIPTION_TOO_LONG",
        severity: Severity::Warning,
        title: "Meta description is too long (> 160 characters)",
        remediation: "Trim the meta description to at most 160 characters.",
    },
    // --- Performance ---
    FindingDetail {
        code: "PERF_LOAD_TIME_GOOD",
        severity: Severity::Good,
        title: "Good load time (< 2s)",
        remediation: "No action needed.",
    },
    FindingDetail {
        code: "PERF_LOAD_TIME_AVERAGE",
        severity: Severity::Warning,
        title: "Average load time (2-4s)",
        remediation: "Enable compression and caching, and reduce server response time.",
    },
    FindingDetail {
        code: "PERF_LOAD_TIME_SLOW",
        severity: Severity::Error,
        title: "Slow load time (> 4s)",
        remediation: "Profile the server response and move heavy work off the request path.",
    },
    FindingDetail {
        code: "PERF_PAGE_SIZE_GOOD",
        severity: Severity::Good,
        title: "Good page size (< 1000KB)",
        remediation: "No action needed.",
    },
    FindingDetail {
        code: "PERF_PAGE_SIZE_AVERAGE",
        severity: Severity::Warning,
        title: "Average page size (1000-2000KB)",
        remediation: "Minify inline scripts and styles and move large inline assets to separate files.",
    },
    FindingDetail {
        code: "PERF_PAGE_SIZE_LARGE",
        severity: Severity::Error,
        title: "Large page size (> 2000KB)",
        remediation: "Split the page or lazy-load content; the HTML document alone exceeds 2000KB.",
    },
    // --- Technical ---
    FindingDetail {
        code: "HTTP_STATUS_OK",
        severity: Severity::Good,
        title: "Page responded successfully (2xx)",
        remediation: "No action needed.",
    },
    FindingDetail {
        code: "HTTP_STATUS_REDIRECT",
        severity: Severity::Warning,
        title: "Page responded with an unfollowed redirect (3xx)",
        remediation: "Link directly to the final URL or fix the redirect target.",
    },
    FindingDetail {
        code: "HTTP_STATUS_ERROR",
        severity: Severity::Error,
        title: "Page responded with an error status",
        remediation: "Check the server logs for the failing route.",
    },
    FindingDetail {
        code: "IMG_ALT_COMPLETE",
        severity: Severity::Good,
        title: "All images have alt text",
        remediation: "No action needed.",
    },
    FindingDetail {
        code: "IMG_ALT_MISSING",
        severity: Severity::Warning,
        title: "Some images are missing alt text",
        remediation: "Add a short, descriptive alt attribute to every meaningful <img>.",
    },
    // --- Security ---
    FindingDetail {
        code: "SSL_VALID",
        severity: Severity::Good,
        title: "SSL certificate is valid",
        remediation: "No action needed.",
    },
    FindingDetail {
        code: "SSL_INVALID_OR_NOT_FOUND",
        severity: Severity::Error,
        title: "SSL certificate is invalid or could not be retrieved",
        remediation: "Serve a certificate from a trusted CA on port 443 that matches the host name.",
    },
    FindingDetail {
        code: "SSL_EXPIRY_OK",
        severity: Severity::Good,
        title: "SSL certificate is not close to expiry",
        remediation: "No action needed.",
    },
    FindingDetail {
        code: "SSL_EXPIRING_SOON",
        severity: Severity::Warning,
        title: "SSL certificate expires within 30 days",
        remediation: "Renew the certificate, or automate renewal with an ACME client.",
    },
    FindingDetail {
        code: "SSL_EXPIRED",
        severity: Severity::Error,
        title: "SSL certificate has expired",
        remediation: "Renew the certificate immediately.",
    },
    FindingDetail {
        code: "SSL_EXPIRY_UNAVAILABLE",
        severity: Severity::Error,
        title: "SSL certificate expiry unavailable",
        remediation: "Make the host reachable over TLS on port 443.",
    },
];

/// Code emitted for any HTTP-derived metric when the page could not be fetched.
pub const FETCH_UNAVAILABLE: &str = "FETCH_UNAVAILABLE";

static FETCH_UNAVAILABLE_DETAIL: FindingDetail = FindingDetail {
    code: FETCH_UNAVAILABLE,
    severity: Severity::Error,
    title: "Unavailable: page could not be fetched",
    remediation: "Verify the URL is correct and the server is reachable from the public internet.",
};

/// Looks up the full detail for a finding code.
pub fn get_finding_detail(code: &str) -> Option<&'static FindingDetail> {
    if code == FETCH_UNAVAILABLE {
        return Some(&FETCH_UNAVAILABLE_DETAIL);
    }
    FINDINGS.iter().find(|f| f.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique() {
        let mut seen = HashSet::new();
        for detail in FINDINGS {
            assert!(seen.insert(detail.code), "duplicate code {}", detail.code);
        }
        assert!(!seen.contains(FETCH_UNAVAILABLE));
    }

    #[test]
    fn every_entry_has_message_and_remediation() {
        for detail in FINDINGS {
            assert!(!detail.title.is_empty(), "{} has no message", detail.code);
            assert!(!detail.remediation.is_empty(), "{} has no remediation", detail.code);
        }
    }

    #[test]
    fn lookup_finds_unavailable_marker() {
        let detail = get_finding_detail(FETCH_UNAVAILABLE).expect("marker is registered");
        assert_eq!(detail.severity, Severity::Error);
        assert!(get_finding_detail("NOPE").is_none());
    }
}
