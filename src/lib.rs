// src/lib.rs

//! Single-page site audit: fetches a URL, extracts SEO signals from its HTML, validates
//! the host's TLS certificate and classifies everything into Good / Warning / Error findings.

pub mod core;
pub mod logging;

pub use crate::core::config::AuditConfig;
pub use crate::core::error::AuditError;
pub use crate::core::export::{JsonFileSink, ReportSink};
pub use crate::core::models::{
    AuditReport, AuditRequest, AuditSummary, CertificateInfo, CertificateStatus, FetchResult, Finding, Metric,
    MetricValue, NormalizedTarget, PageFeatures, Severity,
};
pub use crate::core::scanner::run_full_audit;
