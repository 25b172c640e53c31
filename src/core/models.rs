// src/core/models.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use strum::{Display, EnumIter};

// --- Sentinel Values ---

pub const NO_TITLE: &str = "No title found";
pub const NO_META_DESCRIPTION: &str = "No meta description found";
pub const NOT_AVAILABLE: &str = "N/A";
pub const CONTENT_TYPE_NOT_SPECIFIED: &str = "Not specified";

// The heading levels counted by the extractor, in document order of importance.
pub const HEADING_LEVELS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

// --- Request / Target ---

// The raw user input, exactly as supplied by the caller.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AuditRequest {
    pub raw_input: String,
}

impl AuditRequest {
    pub fn new(raw_input: impl Into<String>) -> Self {
        Self { raw_input: raw_input.into() }
    }
}

// A fetchable absolute URL plus the bare host used by the TLS branch and link classification.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NormalizedTarget {
    pub url: String,
    pub host: String,
}

// --- HTTP Fetch ---

#[derive(Debug, Clone, Serialize)]
pub struct FetchResult {
    pub status_code: Option<u16>,
    #[serde(skip)]
    pub body: Option<Vec<u8>>,
    pub headers: BTreeMap<String, String>,
    pub elapsed_seconds: f64,
    pub size_kib: f64,
    pub error: Option<String>,
}

impl FetchResult {
    /// A completed request. Size is derived from the body so the two can never disagree.
    pub fn success(
        status_code: u16,
        headers: BTreeMap<String, String>,
        body: Vec<u8>,
        elapsed_seconds: f64,
    ) -> Self {
        let size_kib = round_two_decimals(body.len() as f64 / 1024.0);
        Self {
            status_code: Some(status_code),
            body: Some(body),
            headers,
            elapsed_seconds: round_two_decimals(elapsed_seconds),
            size_kib,
            error: None,
        }
    }

    /// A request that never produced a response. Status and body stay empty.
    pub fn failure(error: impl Into<String>, elapsed_seconds: f64) -> Self {
        Self {
            status_code: None,
            body: None,
            headers: BTreeMap::new(),
            elapsed_seconds: round_two_decimals(elapsed_seconds),
            size_kib: 0.0,
            error: Some(error.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    pub fn content_type(&self) -> &str {
        self.headers
            .get("content-type")
            .map(String::as_str)
            .unwrap_or(CONTENT_TYPE_NOT_SPECIFIED)
    }
}

pub fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// --- Page Features ---

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageFeatures {
    pub title: String,
    pub meta_description: String,
    pub heading_counts: BTreeMap<String, usize>,
    pub total_images: usize,
    pub images_without_alt: usize,
    pub internal_links: usize,
    pub external_links: usize,
}

impl Default for PageFeatures {
    fn default() -> Self {
        Self {
            title: NO_TITLE.to_string(),
            meta_description: NO_META_DESCRIPTION.to_string(),
            heading_counts: HEADING_LEVELS.iter().map(|h| (h.to_string(), 0)).collect(),
            total_images: 0,
            images_without_alt: 0,
            internal_links: 0,
            external_links: 0,
        }
    }
}

impl PageFeatures {
    // Sentinel titles count as zero length: a missing title is worse than a short one.
    pub fn title_length(&self) -> usize {
        if self.title == NO_TITLE { 0 } else { self.title.chars().count() }
    }

    pub fn meta_description_length(&self) -> usize {
        if self.meta_description == NO_META_DESCRIPTION {
            0
        } else {
            self.meta_description.chars().count()
        }
    }
}

// --- TLS Certificate ---

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Display)]
pub enum CertificateStatus {
    Valid,
    #[strum(serialize = "Invalid/Not Found")]
    InvalidOrNotFound,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CertificateInfo {
    pub status: CertificateStatus,
    pub expiry: String,
    pub issuer_org: String,
    pub days_until_expiry: Option<i64>,
}

impl CertificateInfo {
    pub fn unavailable() -> Self {
        Self {
            status: CertificateStatus::InvalidOrNotFound,
            expiry: NOT_AVAILABLE.to_string(),
            issuer_org: NOT_AVAILABLE.to_string(),
            days_until_expiry: None,
        }
    }
}

// --- Findings ---

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum Severity {
    Good,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Display, EnumIter)]
pub enum Metric {
    #[strum(serialize = "Title length")]
    TitleLength,
    #[strum(serialize = "Meta description length")]
    MetaDescriptionLength,
    #[strum(serialize = "Load time")]
    LoadTime,
    #[strum(serialize = "Page size")]
    PageSize,
    #[strum(serialize = "HTTP status")]
    HttpStatus,
    #[strum(serialize = "Image alt text")]
    ImageAltText,
    #[strum(serialize = "Certificate status")]
    CertificateStatus,
    #[strum(serialize = "Certificate expiry")]
    CertificateExpiry,
}

impl Metric {
    // HTTP-derived metrics are reported as unavailable when the fetch fails.
    pub fn is_http_derived(self) -> bool {
        !matches!(self, Metric::CertificateStatus | Metric::CertificateExpiry)
    }
}

// The measured value behind a finding. `Unavailable` marks metrics whose branch failed.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum MetricValue {
    Length(usize),
    Seconds(f64),
    KiloBytes(f64),
    Count(usize),
    Status(u16),
    Text(String),
    Unavailable,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Finding {
    pub metric: Metric,
    pub code: String,
    pub value: MetricValue,
    pub severity: Severity,
    pub message: String,
    pub remediation: String,
}

// --- Main Report ---

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct AuditSummary {
    pub score: u8,
    pub good: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl AuditSummary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let count = |severity: Severity| findings.iter().filter(|f| f.severity == severity).count();
        let (good, warnings, errors) = (
            count(Severity::Good),
            count(Severity::Warning),
            count(Severity::Error),
        );

        let score = 100_i64 - (errors as i64 * 15) - (warnings as i64 * 5);

        Self {
            score: score.clamp(0, 100) as u8,
            good,
            warnings,
            errors,
        }
    }
}

// The immutable result of one audit. Fields are only reachable through getters.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    target: NormalizedTarget,
    fetch: FetchResult,
    features: PageFeatures,
    certificate: CertificateInfo,
    findings: Vec<Finding>,
    summary: AuditSummary,
    audited_at: DateTime<Utc>,
}

impl AuditReport {
    pub fn new(
        target: NormalizedTarget,
        fetch: FetchResult,
        features: PageFeatures,
        certificate: CertificateInfo,
        findings: Vec<Finding>,
    ) -> Self {
        let summary = AuditSummary::from_findings(&findings);
        Self {
            target,
            fetch,
            features,
            certificate,
            findings,
            summary,
            audited_at: Utc::now(),
        }
    }

    pub fn target(&self) -> &NormalizedTarget {
        &self.target
    }

    pub fn fetch(&self) -> &FetchResult {
        &self.fetch
    }

    pub fn features(&self) -> &PageFeatures {
        &self.features
    }

    pub fn certificate(&self) -> &CertificateInfo {
        &self.certificate
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn finding(&self, metric: Metric) -> Option<&Finding> {
        self.findings.iter().find(|f| f.metric == metric)
    }

    pub fn summary(&self) -> &AuditSummary {
        &self.summary
    }

    pub fn audited_at(&self) -> DateTime<Utc> {
        self.audited_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(severity: Severity) -> Finding {
        Finding {
            metric: Metric::TitleLength,
            code: "TEST".to_string(),
            value: MetricValue::Unavailable,
            severity,
            message: String::new(),
            remediation: String::new(),
        }
    }

    #[test]
    fn default_features_use_sentinels() {
        let features = PageFeatures::default();
        assert_eq!(features.title, NO_TITLE);
        assert_eq!(features.meta_description, NO_META_DESCRIPTION);
        assert_eq!(features.heading_counts.len(), 6);
        assert!(features.heading_counts.values().all(|&c| c == 0));
        assert_eq!(features.title_length(), 0);
        assert_eq!(features.meta_description_length(), 0);
    }

    #[test]
    fn fetch_failure_carries_no_response() {
        let fetch = FetchResult::failure("dns error", 0.123);
        assert!(fetch.is_failure());
        assert!(fetch.status_code.is_none());
        assert!(fetch.body.is_none());
        assert_eq!(fetch.elapsed_seconds, 0.12);
        assert_eq!(fetch.content_type(), CONTENT_TYPE_NOT_SPECIFIED);
    }

    #[test]
    fn fetch_success_computes_size_in_kib() {
        let fetch = FetchResult::success(200, BTreeMap::new(), vec![0u8; 1536], 1.005);
        assert!(!fetch.is_failure());
        assert_eq!(fetch.size_kib, 1.5);
        assert_eq!(fetch.status_code, Some(200));
    }

    #[test]
    fn summary_score_saturates_at_zero() {
        let findings: Vec<Finding> = (0..8).map(|_| finding(Severity::Error)).collect();
        let summary = AuditSummary::from_findings(&findings);
        assert_eq!(summary.score, 0);
        assert_eq!(summary.errors, 8);

        let mixed = vec![finding(Severity::Good), finding(Severity::Warning), finding(Severity::Error)];
        let summary = AuditSummary::from_findings(&mixed);
        assert_eq!(summary.score, 80);
        assert_eq!((summary.good, summary.warnings, summary.errors), (1, 1, 1));
    }

    #[test]
    fn certificate_status_displays_human_label() {
        assert_eq!(CertificateStatus::InvalidOrNotFound.to_string(), "Invalid/Not Found");
        assert_eq!(CertificateInfo::unavailable().expiry, NOT_AVAILABLE);
    }
}
