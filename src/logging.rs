// src/logging.rs

use color_eyre::eyre::Result;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use std::path::PathBuf;
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

lazy_static! {
    /// Crate-specific level override, e.g. `SITE_AUDIT_RS_LOGLEVEL=debug`.
    pub static ref AUDIT_LOG_ENV: String = format!("{}_LOGLEVEL", env!("CARGO_CRATE_NAME").to_uppercase());
    static ref DEFAULT_FILTER: String = format!("{}=info", env!("CARGO_CRATE_NAME"));
}

const AUDIT_LOG_FILE: &str = "audit.log";

/// The per-user data directory for logs and exported reports, or `./.data` as a fallback.
pub fn get_data_dir() -> PathBuf {
    ProjectDirs::from("com", "site-audit-rs", env!("CARGO_PKG_NAME"))
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".").join(".data"))
}

/// Picks the log filter: `RUST_LOG` wins, then the crate-specific variable, then
/// `info` for this crate only. Blank values are ignored.
fn resolve_filter(lookup: impl Fn(&str) -> Option<String>) -> String {
    ["RUST_LOG", AUDIT_LOG_ENV.as_str()]
        .into_iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.clone())
}

/// Sends audit traces to `audit.log` in the data directory.
///
/// Stdout is left to the report itself. Returns the log file path so the caller
/// can point the user at it.
pub fn initialize_logging() -> Result<PathBuf> {
    let directory = get_data_dir();
    std::fs::create_dir_all(&directory)?;
    let log_path = directory.join(AUDIT_LOG_FILE);
    let log_file = std::fs::File::create(&log_path)?;

    let filter = resolve_filter(|name| std::env::var(name).ok());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resolve(vars: &[(&str, &str)]) -> String {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        resolve_filter(|name| vars.get(name).cloned())
    }

    #[test]
    fn rust_log_takes_precedence() {
        let crate_var = AUDIT_LOG_ENV.clone();
        assert_eq!(resolve(&[("RUST_LOG", "warn"), (crate_var.as_str(), "debug")]), "warn");
    }

    #[test]
    fn crate_variable_is_the_fallback() {
        let crate_var = AUDIT_LOG_ENV.clone();
        assert_eq!(resolve(&[(crate_var.as_str(), "debug")]), "debug");
        assert_eq!(resolve(&[("RUST_LOG", "  "), (crate_var.as_str(), "trace")]), "trace");
    }

    #[test]
    fn defaults_to_info_for_this_crate() {
        assert_eq!(resolve(&[]), "site_audit_rs=info");
        assert_eq!(AUDIT_LOG_ENV.as_str(), "SITE_AUDIT_RS_LOGLEVEL");
    }
}
