// src/core/export.rs

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::core::error::AuditError;
use crate::core::models::AuditReport;

/// A destination for completed reports. The audit itself never calls a sink.
pub trait ReportSink {
    fn store(&self, report: &AuditReport) -> Result<PathBuf, AuditError>;
}

/// Writes each report as a pretty-printed JSON file in a directory.
pub struct JsonFileSink {
    directory: PathBuf,
}

impl JsonFileSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self { directory: directory.into() }
    }

    /// A sink rooted in the application's data directory, next to the log file.
    pub fn in_data_dir() -> Self {
        Self::new(crate::logging::get_data_dir().join("reports"))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn file_name(report: &AuditReport) -> String {
        let host: String = report
            .target()
            .host
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
            .collect();
        format!("audit-{}-{}.json", host, report.audited_at().format("%Y%m%dT%H%M%S%.3fZ"))
    }
}

impl ReportSink for JsonFileSink {
    fn store(&self, report: &AuditReport) -> Result<PathBuf, AuditError> {
        std::fs::create_dir_all(&self.directory).map_err(|e| {
            error!(dir = %self.directory.display(), error = %e, "Failed to create report directory.");
            AuditError::Export(format!("cannot create {}: {}", self.directory.display(), e))
        })?;

        let path = self.directory.join(Self::file_name(report));
        let json = serde_json::to_string_pretty(report).map_err(|e| AuditError::Export(e.to_string()))?;
        std::fs::write(&path, json).map_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to write report.");
            AuditError::Export(format!("cannot write {}: {}", path.display(), e))
        })?;

        info!(path = %path.display(), "Report exported.");
        Ok(path)
    }
}
