//! Export form submission.

use super::client::check_status;
use super::token::Token;
use crate::config::{Config, TOKEN_FIELD};
use crate::error::ListError;
use reqwest::Client;

/// Form fields for the export request: the token, export on, no filters.
pub fn export_form(token: &Token) -> [(&'static str, &str); 4] {
    [
        (TOKEN_FIELD, token.as_str()),
        ("ExportExcel", "true"),
        ("WebsiteURL", ""),
        ("IPSubnet", ""),
    ]
}

/// POST the export form and return the HTML body.
pub async fn fetch_export(
    client: &Client,
    config: &Config,
    token: &Token,
) -> Result<String, ListError> {
    let url = config.export_url();
    log::info!("Posting to {url} to get IP list...");

    let response = client.post(&url).form(&export_form(token)[..]).send().await?;
    let body = check_status(response)?.text().await?;
    log::info!("Received {} bytes", body.len());

    Ok(body)
}
