// src/core/config.rs

use std::time::Duration;

pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_TLS_PORT: u16 = 443;
pub const DEFAULT_TLS_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_TLS_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fixed knobs for a single audit.
///
/// Every field has a documented constant default; callers normally use `AuditConfig::default()`.
/// Tests override the TLS port to simulate an unreachable certificate endpoint.
///
/// `tls_connect_timeout` bounds each connect attempt and each socket read or write during
/// the handshake; `tls_timeout` bounds the whole TLS branch, DNS resolution included.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub http_timeout: Duration,
    pub user_agent: String,
    pub tls_port: u16,
    pub tls_connect_timeout: Duration,
    pub tls_timeout: Duration,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            tls_port: DEFAULT_TLS_PORT,
            tls_connect_timeout: DEFAULT_TLS_CONNECT_TIMEOUT,
            tls_timeout: DEFAULT_TLS_TIMEOUT,
        }
    }
}
