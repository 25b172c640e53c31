// src/core/scanner/mod.rs

pub mod html_extractor;
pub mod http_fetcher;
pub mod ssl_scanner;

use tracing::info;

use crate::core::classifier::classify;
use crate::core::config::AuditConfig;
use crate::core::error::AuditError;
use crate::core::models::{AuditReport, AuditRequest, FetchResult, PageFeatures};
use crate::core::normalizer::normalize;
use self::html_extractor::extract_features;
use self::http_fetcher::fetch_page;
use self::ssl_scanner::validate_certificate;

/// Runs one complete audit of a single URL.
///
/// The HTTP branch (fetch, then feature extraction) and the TLS branch run concurrently
/// with `tokio::join!`, so the audit takes as long as the slower branch rather than the
/// sum of both. Neither branch can fail the audit; their errors end up in the report.
/// Dropping the returned future cancels the in-flight HTTP request.
///
/// # Errors
///
/// Only `AuditError::InvalidUrl`, before any network I/O takes place.
pub async fn run_full_audit(request: &AuditRequest, config: &AuditConfig) -> Result<AuditReport, AuditError> {
    let target = normalize(request)?;
    info!(url = %target.url, host = %target.host, "Starting audit.");

    let ((fetch, features), certificate) = tokio::join!(
        run_http_branch(&target.url, &target.host, config),
        validate_certificate(&target.host, config)
    );

    let findings = classify(&fetch, &features, &certificate);
    let report = AuditReport::new(target, fetch, features, certificate, findings);

    info!(score = report.summary().score, findings = report.findings().len(), "Audit finished.");
    Ok(report)
}

async fn run_http_branch(url: &str, host: &str, config: &AuditConfig) -> (FetchResult, PageFeatures) {
    let fetch = fetch_page(url, config).await;
    let features = extract_features(fetch.body.as_deref(), host);
    (fetch, features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{CertificateInfo, CertificateStatus, Metric, Severity};
    use std::collections::BTreeMap;

    // Builds a report from canned branch results, without network I/O.
    fn assemble_report(
        request: &AuditRequest,
        fetch: FetchResult,
        certificate: CertificateInfo,
    ) -> Result<AuditReport, AuditError> {
        let target = normalize(request)?;
        let features = extract_features(fetch.body.as_deref(), &target.host);
        let findings = classify(&fetch, &features, &certificate);
        Ok(AuditReport::new(target, fetch, features, certificate, findings))
    }

    #[test]
    fn branches_degrade_independently_when_assembled() {
        let html = br#"<title>An example page with a reasonable title</title>
            <a href="https://example.com/a">in</a><a href="https://other.com/b">out</a>"#;
        let fetch = FetchResult::success(200, BTreeMap::new(), html.to_vec(), 0.42);

        let report = assemble_report(&AuditRequest::new("example.com"), fetch, CertificateInfo::unavailable())
            .expect("valid URL");

        assert_eq!(report.target().url, "https://example.com");
        assert_eq!(report.features().internal_links, 1);
        assert_eq!(report.features().external_links, 1);
        assert_eq!(report.certificate().status, CertificateStatus::InvalidOrNotFound);
        assert_eq!(report.finding(Metric::TitleLength).map(|f| f.severity), Some(Severity::Good));
        assert_eq!(report.finding(Metric::CertificateStatus).map(|f| f.severity), Some(Severity::Error));
    }

    #[test]
    fn assembling_rejects_invalid_url() {
        let fetch = FetchResult::failure("unused", 0.0);
        let err = assemble_report(&AuditRequest::new("https://"), fetch, CertificateInfo::unavailable()).unwrap_err();
        assert!(matches!(err, AuditError::InvalidUrl { .. }));
    }
}
