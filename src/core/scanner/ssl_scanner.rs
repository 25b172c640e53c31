// src/core/scanner/ssl_scanner.rs

use tracing::{debug, error, info};

use crate::core::config::AuditConfig;
use crate::core::models::{CertificateInfo, CertificateStatus};
use chrono::{DateTime, Utc};
use native_tls::TlsConnector;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tokio::task::spawn_blocking;
use x509_parser::prelude::*;

/// Validates the TLS certificate served by `host`.
///
/// The handshake runs on a blocking thread with the platform's default trust roots. Any
/// failure (resolution, connect, handshake, missing certificate, parse error, missing
/// issuer organization) yields `CertificateInfo::unavailable()`; nothing is propagated.
///
/// The whole branch, DNS resolution included, is bounded by `config.tls_timeout`. A peer
/// that trickles its handshake past that deadline is reported as unavailable; the blocking
/// thread is left to hit its socket timeouts and its result is discarded.
pub async fn validate_certificate(host: &str, config: &AuditConfig) -> CertificateInfo {
    info!(host, port = config.tls_port, "Starting TLS certificate validation.");
    let host_owned = host.to_string();
    let port = config.tls_port;
    let connect_timeout = config.tls_connect_timeout;

    debug!("Spawning blocking task for TLS connection.");
    let task = spawn_blocking(move || perform_tls_scan(&host_owned, port, connect_timeout));
    let scan_result = match tokio::time::timeout(config.tls_timeout, task).await {
        Ok(joined) => joined.unwrap_or_else(|e| {
            error!(panic = %e, "Blocking TLS task panicked!");
            Err(format!("Task panicked: {}", e))
        }),
        Err(_) => Err(format!("TLS validation exceeded {:?}", config.tls_timeout)),
    };

    match scan_result {
        Ok(info) => {
            info!(expiry = %info.expiry, issuer = %info.issuer_org, "TLS certificate validation finished.");
            info
        }
        Err(e) => {
            error!(host, error = %e, "TLS certificate unavailable.");
            CertificateInfo::unavailable()
        }
    }
}

fn perform_tls_scan(host: &str, port: u16, timeout: Duration) -> Result<CertificateInfo, String> {
    let connector = TlsConnector::new().map_err(|e| {
        error!(error = %e, "Failed to create TlsConnector");
        format!("TlsConnector Error: {}", e)
    })?;

    debug!(host, port, "Connecting TCP stream.");
    let stream = connect_with_timeout(host, port, timeout)?;

    debug!(host, "Performing TLS handshake.");
    let stream = connector
        .connect(socket_host(host), stream)
        .map_err(|e| format!("TLS Handshake Error: {}", e))?;

    let cert = stream
        .peer_certificate()
        .map_err(|e| format!("Could not get peer certificate: {}", e))?
        .ok_or_else(|| "Server did not provide a certificate.".to_string())?;

    let cert_der = cert
        .to_der()
        .map_err(|e| format!("Could not convert certificate to DER: {}", e))?;

    certificate_info_from_der(&cert_der, Utc::now())
}

// Tries every resolved address in turn; the timeout also bounds handshake reads and writes.
fn connect_with_timeout(host: &str, port: u16, timeout: Duration) -> Result<TcpStream, String> {
    let addrs = (socket_host(host), port)
        .to_socket_addrs()
        .map_err(|e| format!("DNS Resolution Error: {}", e))?;

    let mut last_error = format!("No addresses resolved for {}", host);
    for addr in addrs {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => {
                stream
                    .set_read_timeout(Some(timeout))
                    .and_then(|_| stream.set_write_timeout(Some(timeout)))
                    .map_err(|e| format!("Socket Configuration Error: {}", e))?;
                return Ok(stream);
            }
            Err(e) => {
                debug!(%addr, error = %e, "TCP connection attempt failed.");
                last_error = format!("TCP Connection Error: {}", e);
            }
        }
    }
    Err(last_error)
}

// URL hosts keep IPv6 literals bracketed ("[::1]"); sockets and SNI want the bare address.
fn socket_host(host: &str) -> &str {
    host.strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host)
}

/// Reads the expiry and issuer organization out of a DER-encoded certificate.
pub fn certificate_info_from_der(der: &[u8], now: DateTime<Utc>) -> Result<CertificateInfo, String> {
    let (_, x509) = parse_x509_certificate(der).map_err(|e| format!("X.509 Parse Error: {}", e))?;
    debug!(subject = %x509.subject(), issuer = %x509.issuer(), "Parsed peer certificate.");

    let issuer_org = x509
        .issuer()
        .iter_organization()
        .next()
        .and_then(|attr| attr.as_str().ok())
        .map(str::to_string)
        .ok_or_else(|| "Issuer has no organization name.".to_string())?;

    let not_after = asn1_time_to_chrono_utc(&x509.validity().not_after)?;
    let (expiry, days_until_expiry) = expiry_fields(not_after, now);

    Ok(CertificateInfo {
        status: CertificateStatus::Valid,
        expiry,
        issuer_org,
        days_until_expiry: Some(days_until_expiry),
    })
}

fn asn1_time_to_chrono_utc(time: &ASN1Time) -> Result<DateTime<Utc>, String> {
    DateTime::from_timestamp(time.timestamp(), 0).ok_or_else(|| "Certificate expiry out of range.".to_string())
}

fn expiry_fields(not_after: DateTime<Utc>, now: DateTime<Utc>) -> (String, i64) {
    (
        not_after.format("%Y-%m-%d").to_string(),
        not_after.signed_duration_since(now).num_days(),
    )
}
