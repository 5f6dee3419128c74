//! Builds a flat, sorted host list from the ITO portal IP subnet export.
//!
//! The run is one linear pass: token, export, table, expansion, file.
//! Each stage is a separate function so everything after the network can be driven
//! from fixtures.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod portal;
pub mod processing;

pub use config::Config;
pub use error::ListError;

use models::{HostSets, ListDelta};
use processing::ExpandReport;
use std::path::{Path, PathBuf};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Non-empty subnet cells in the table.
    pub subnets: usize,
    pub report: ExpandReport,
    pub v4: usize,
    pub v6: usize,
    /// Change against the list found at the output path, if there was one.
    pub delta: Option<ListDelta>,
    pub output_path: PathBuf,
}

/// Full run against the portal named in `config`.
pub async fn run(config: &Config) -> Result<RunSummary, ListError> {
    let client = portal::build_client(config)?;
    run_with_client(&client, config).await
}

/// Full run using a caller-built client. The client must keep cookies.
pub async fn run_with_client(
    client: &reqwest::Client,
    config: &Config,
) -> Result<RunSummary, ListError> {
    let token = portal::acquire_token(client, config).await?;
    let body = portal::fetch_export(client, config, &token).await?;
    build_host_list(&body, config)
}

/// Parse the export body, expand it and write the host list.
///
/// # Arguments
/// * `body` - Export response body
/// * `config` - Supplies the output path and host limit
///
/// # Returns
/// * `Ok(RunSummary)` - Counts for the written list
/// * `Err` - Table shape error, or the output file could not be written.
///   The file is untouched unless parsing succeeded.
pub fn build_host_list(body: &str, config: &Config) -> Result<RunSummary, ListError> {
    log::info!("Parsing HTML table...");
    let entries = processing::parse_subnet_table(body)?;
    log::info!("Found {} subnets.", entries.len());

    log::info!("Generating and de-duplicating host IPs (v4 and v6)...");
    let (hosts, report) = processing::expand_subnets(&entries, config.max_hosts_per_network);
    if report.invalid > 0 {
        log::warn!("Skipped {} invalid subnet entries.", report.invalid);
    }
    if report.oversized > 0 {
        log::warn!(
            "Skipped {} networks above {} hosts.",
            report.oversized,
            config.max_hosts_per_network
        );
    }
    log::info!(
        "Generated {} total unique IPs ({} v4, {} v6).",
        hosts.len(),
        hosts.v4.len(),
        hosts.v6.len()
    );

    let delta = previous_delta(&config.output_path, &hosts);
    output::write_host_file(&config.output_path, &hosts)?;
    log::info!(
        "Successfully wrote {} IPs to {}.",
        hosts.len(),
        config.output_path.display()
    );

    Ok(RunSummary {
        subnets: entries.len(),
        report,
        v4: hosts.v4.len(),
        v6: hosts.v6.len(),
        delta,
        output_path: config.output_path.clone(),
    })
}

fn previous_delta(path: &Path, hosts: &HostSets) -> Option<ListDelta> {
    match output::read_host_file(path) {
        Ok(Some(previous)) => {
            let delta = hosts.delta_from(&previous);
            log::info!(
                "Previous list had {} IPs: {} added, {} removed.",
                previous.len(),
                delta.added,
                delta.removed
            );
            Some(delta)
        }
        Ok(None) => None,
        Err(e) => {
            log::warn!("Ignoring previous list: {e}");
            None
        }
    }
}
