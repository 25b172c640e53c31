// src/core/classifier.rs

use strum::IntoEnumIterator;
use tracing::{debug, error};

use crate::core::knowledge_base::{get_finding_detail, FETCH_UNAVAILABLE};
use crate::core::models::{
    CertificateInfo, CertificateStatus, FetchResult, Finding, Metric, MetricValue, PageFeatures, Severity,
};

// Inclusive "optimal" ranges for text lengths, in characters.
pub const TITLE_OPTIMAL: (usize, usize) = (30, 60);
pub const META_DESCRIPTION_OPTIMAL: (usize, usize) = (120, 160);

// Upper bounds (exclusive) of the good and average bands.
pub const LOAD_TIME_GOOD_BELOW: f64 = 2.0;
pub const LOAD_TIME_AVERAGE_BELOW: f64 = 4.0;
pub const PAGE_SIZE_GOOD_BELOW: f64 = 1000.0;
pub const PAGE_SIZE_AVERAGE_BELOW: f64 = 2000.0;

pub const CERT_EXPIRY_WARNING_DAYS: i64 = 30;

/// Classifies the collected metrics into severity-labelled findings.
///
/// Exactly one finding is produced per metric, in a fixed order. When the fetch failed,
/// every HTTP-derived metric is still reported, as an `Error` with an `Unavailable`
/// value, so a missing page never looks like a passing one. Certificate findings depend
/// only on `certificate` and are unaffected by the fetch outcome.
pub fn classify(fetch: &FetchResult, features: &PageFeatures, certificate: &CertificateInfo) -> Vec<Finding> {
    let mut findings = Vec::with_capacity(8);

    if fetch.is_failure() {
        debug!("Fetch failed, marking HTTP-derived metrics unavailable.");
        findings.extend(Metric::iter().filter(|m| m.is_http_derived()).map(unavailable));
    } else {
        findings.push(classify_title(features.title_length()));
        findings.push(classify_meta_description(features.meta_description_length()));
        findings.push(classify_load_time(fetch.elapsed_seconds));
        findings.push(classify_page_size(fetch.size_kib));
        findings.push(classify_status(fetch.status_code));
        findings.push(classify_image_alt(features.images_without_alt));
    }

    findings.push(classify_certificate_status(certificate.status));
    findings.push(classify_certificate_expiry(certificate));

    debug!(count = findings.len(), "Classification finished.");
    findings
}

pub fn classify_title(length: usize) -> Finding {
    let code = length_band(length, TITLE_OPTIMAL, "SEO_TITLE_OPTIMAL", "SEO_TITLE_TOO_SHORT", "SEO_TITLE_TOO_LONG");
    finding(Metric::TitleLength, code, MetricValue::Length(length))
}

pub fn classify_meta_description(length: usize) -> Finding {
    let code = length_band(
        length,
        META_DESCRIPTION_OPTIMAL,
        "SEO_META_DESCRIPTION_OPTIMAL",
        "SEO_META_DESCRIPTION_TOO_SHORT",
        "SEO_META_DESCRIPTION_TOO_LONG",
    );
    finding(Metric::MetaDescriptionLength, code, MetricValue::Length(length))
}

pub fn classify_load_time(seconds: f64) -> Finding {
    let code = if seconds < LOAD_TIME_GOOD_BELOW {
        "PERF_LOAD_TIME_GOOD"
    } else if seconds < LOAD_TIME_AVERAGE_BELOW {
        "PERF_LOAD_TIME_AVERAGE"
    } else {
        "PERF_LOAD_TIME_SLOW"
    };
    finding(Metric::LoadTime, code, MetricValue::Seconds(seconds))
}

pub fn classify_page_size(kib: f64) -> Finding {
    let code = if kib < PAGE_SIZE_GOOD_BELOW {
        "PERF_PAGE_SIZE_GOOD"
    } else if kib < PAGE_SIZE_AVERAGE_BELOW {
        "PERF_PAGE_SIZE_AVERAGE"
    } else {
        "PERF_PAGE_SIZE_LARGE"
    };
    finding(Metric::PageSize, code, MetricValue::KiloBytes(kib))
}

fn classify_status(status: Option<u16>) -> Finding {
    let Some(status) = status else {
        return unavailable(Metric::HttpStatus);
    };
    let code = match status {
        200..=299 => "HTTP_STATUS_OK",
        300..=399 => "HTTP_STATUS_REDIRECT",
        _ => "HTTP_STATUS_ERROR",
    };
    finding(Metric::HttpStatus, code, MetricValue::Status(status))
}

fn classify_image_alt(images_without_alt: usize) -> Finding {
    let code = if images_without_alt == 0 { "IMG_ALT_COMPLETE" } else { "IMG_ALT_MISSING" };
    finding(Metric::ImageAltText, code, MetricValue::Count(images_without_alt))
}

fn classify_certificate_status(status: CertificateStatus) -> Finding {
    let code = match status {
        CertificateStatus::Valid => "SSL_VALID",
        CertificateStatus::InvalidOrNotFound => "SSL_INVALID_OR_NOT_FOUND",
    };
    finding(Metric::CertificateStatus, code, MetricValue::Text(status.to_string()))
}

fn classify_certificate_expiry(certificate: &CertificateInfo) -> Finding {
    match certificate.days_until_expiry {
        Some(days) if days < 0 => finding(Metric::CertificateExpiry, "SSL_EXPIRED", MetricValue::Text(certificate.expiry.clone())),
        Some(days) if days <= CERT_EXPIRY_WARNING_DAYS => {
            finding(Metric::CertificateExpiry, "SSL_EXPIRING_SOON", MetricValue::Text(certificate.expiry.clone()))
        }
        Some(_) => finding(Metric::CertificateExpiry, "SSL_EXPIRY_OK", MetricValue::Text(certificate.expiry.clone())),
        None => finding(Metric::CertificateExpiry, "SSL_EXPIRY_UNAVAILABLE", MetricValue::Unavailable),
    }
}

fn length_band(
    length: usize,
    (min, max): (usize, usize),
    optimal: &'static str,
    too_short: &'static str,
    too_long: &'static str,
) -> &'static str {
    if length < min {
        too_short
    } else if length > max {
        too_long
    } else {
        optimal
    }
}

fn unavailable(metric: Metric) -> Finding {
    finding(metric, FETCH_UNAVAILABLE, MetricValue::Unavailable)
}

fn finding(metric: Metric, code: &str, value: MetricValue) -> Finding {
    let (severity, message, remediation) = match get_finding_detail(code) {
        Some(detail) => (detail.severity, detail.title.to_string(), detail.remediation.to_string()),
        None => {
            error!(code, "Finding code missing from knowledge base.");
            (Severity::Error, code.to_string(), String::new())
        }
    };
    Finding {
        metric,
        code: code.to_string(),
        value,
        severity,
        message,
        remediation,
    }
}
