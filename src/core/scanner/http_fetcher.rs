// src/core/scanner/http_fetcher.rs

use std::collections::BTreeMap;
use std::time::Instant;

use reqwest::header::HeaderMap;
use tracing::{debug, error, info, warn};

use crate::core::config::AuditConfig;
use crate::core::models::FetchResult;

/// Fetches the page with a single GET request.
///
/// Latency is measured wall-clock from sending the request until the whole body has been
/// read. Transport, timeout, DNS and body-read failures are returned as
/// `FetchResult::failure` rather than propagated, and the request is never retried.
/// A non-2xx status is still a successful fetch: the status is data for the classifier.
pub async fn fetch_page(url: &str, config: &AuditConfig) -> FetchResult {
    info!(url, "Starting page fetch.");

    let client = match reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.http_timeout)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client for page fetch.");
            return FetchResult::failure(format!("Failed to build HTTP client: {}", e), 0.0);
        }
    };

    let started = Instant::now();
    let response = match client.get(url).send().await {
        Ok(res) => res,
        Err(e) => {
            error!(url, error = %e, "HTTP request failed.");
            return FetchResult::failure(format!("HTTP request failed: {}", e), started.elapsed().as_secs_f64());
        }
    };

    let status = response.status().as_u16();
    let headers = collect_headers(response.headers());
    debug!(status, "Received HTTP response, reading body.");

    let body = match response.bytes().await {
        Ok(bytes) => bytes.to_vec(),
        Err(e) => {
            error!(url, error = %e, "Failed to read response body.");
            return FetchResult::failure(
                format!("Failed to read response body: {}", e),
                started.elapsed().as_secs_f64(),
            );
        }
    };

    let result = FetchResult::success(status, headers, body, started.elapsed().as_secs_f64());
    info!(
        status,
        size_kib = result.size_kib,
        elapsed = result.elapsed_seconds,
        "Page fetch finished."
    );
    result
}

/// Flattens a `HeaderMap` into lower-case names with comma-joined values.
///
/// Values that are not valid UTF-8 keep their presence with a placeholder.
fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = match value.to_str() {
            Ok(s) => s.to_string(),
            Err(_) => {
                warn!(header_name = %name, "Header contained invalid UTF-8.");
                "[Invalid UTF-8]".to_string()
            }
        };
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    collected
}
