// src/main.rs

use color_eyre::eyre::{bail, Result};
use tracing::{error, info};

use site_audit_rs::logging::initialize_logging;
use site_audit_rs::{run_full_audit, AuditConfig, AuditRequest, JsonFileSink, ReportSink};

const USAGE: &str = "usage: site-audit-rs <url> [--save]";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let log_path = initialize_logging()?;

    let mut url = None;
    let mut save = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--save" => save = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            _ if url.is_none() => url = Some(arg),
            _ => bail!("unexpected argument '{}'\n{}", arg, USAGE),
        }
    }
    let Some(url) = url else {
        bail!(USAGE);
    };

    info!(log = %log_path.display(), "Audit requested.");
    let report = match run_full_audit(&AuditRequest::new(url), &AuditConfig::default()).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Audit rejected.");
            return Err(e.into());
        }
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    if save {
        let path = JsonFileSink::in_data_dir().store(&report)?;
        eprintln!("Report saved to {}", path.display());
    }
    Ok(())
}
