//! Anti-forgery token from the search page.

use super::client::check_status;
use crate::config::{Config, TOKEN_FIELD};
use crate::error::ListError;
use reqwest::Client;
use scraper::{Html, Selector};
use std::fmt;
use std::sync::OnceLock;

static TOKEN_SELECTOR: OnceLock<Selector> = OnceLock::new();

fn token_selector() -> &'static Selector {
    TOKEN_SELECTOR.get_or_init(|| {
        Selector::parse(r#"input[name="__RequestVerificationToken"]"#).expect("Invalid selector")
    })
}

/// Value of the hidden `__RequestVerificationToken` input.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep the token value out of logs.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Token(len={})", self.0.len())
    }
}

/// Find the first token input with a non-empty value.
pub fn extract_token(html: &str) -> Option<Token> {
    let document = Html::parse_document(html);
    document
        .select(token_selector())
        .filter_map(|input| input.value().attr("value"))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(|value| Token(value.to_string()))
}

/// GET the search page and pull the token out of it.
///
/// # Arguments
/// * `client` - Session client; its cookie store must stay alive for the export
/// * `config` - Supplies the search page url
///
/// # Returns
/// * `Ok(Token)` - First non-empty `__RequestVerificationToken` value
/// * `Err(ListError::MissingToken)` - Page has no usable token
/// * `Err` - Transport failure or non-2xx status
pub async fn acquire_token(client: &Client, config: &Config) -> Result<Token, ListError> {
    let url = config.search_page_url();
    log::info!("Fetching token from {url}...");

    let response = check_status(client.get(&url).send().await?)?;
    let html = response.text().await?;
    log::debug!("search page {} bytes", html.len());

    match extract_token(&html) {
        Some(token) => {
            log::debug!("found {TOKEN_FIELD} {token:?}");
            Ok(token)
        }
        None => Err(ListError::MissingToken { url }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token_from_search_page() {
        let html = include_str!("../tests/test_data/search_page.html");
        let token = extract_token(html).expect("token in fixture");
        assert_eq!(token.as_str(), "CfDJ8Nq2-tok3n_Value-x9");
    }

    #[test]
    fn test_extract_token_missing() {
        let html = include_str!("../tests/test_data/search_page_no_token.html");
        assert_eq!(extract_token(html), None);
        assert_eq!(extract_token(""), None);
    }

    #[test]
    fn test_extract_token_ignores_empty_value() {
        let html = r#"<form>
            <input name="__RequestVerificationToken" type="hidden" />
            <input name="__RequestVerificationToken" type="hidden" value="  " />
            <input name="__RequestVerificationToken" type="hidden" value="second" />
        </form>"#;
        assert_eq!(extract_token(html).unwrap().as_str(), "second");
    }

    #[test]
    fn test_token_debug_hides_value() {
        let token = Token("secret".to_string());
        assert_eq!(format!("{token:?}"), "Token(len=6)");
    }
}
