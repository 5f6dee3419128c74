//! HTTP client for one portal session.

use crate::config::{self, Config};
use crate::error::ListError;
use reqwest::{Client, Response};

/// Build the client used for the whole run.
///
/// The cookie store keeps the session cookie the portal pairs with the token.
pub fn build_client(config: &Config) -> Result<Client, ListError> {
    let mut builder = Client::builder()
        .user_agent(config::USER_AGENT)
        .cookie_store(true);
    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder
        .build()
        .map_err(|e| ListError::Config(format!("failed to create HTTP client: {e}")))?;
    Ok(client)
}

/// Turn a non-2xx response into [`ListError::HttpStatus`].
pub fn check_status(response: Response) -> Result<Response, ListError> {
    let status = response.status();
    if status.is_success() {
        log::debug!("{} {}", status.as_u16(), response.url());
        Ok(response)
    } else {
        log::debug!("{} {}", status, response.url());
        Err(ListError::HttpStatus {
            url: response.url().to_string(),
            status: status.as_u16(),
        })
    }
}
