//! Run configuration.
//!
//! Constants hold the fixed portal endpoints and defaults. [`Config::from_env`] lets a
//! `.env` file or the environment override them; with nothing set the run behaves
//! exactly like [`Config::default`].

use crate::error::ListError;
use std::path::PathBuf;
use std::time::Duration;

/// Portal root, without trailing slash.
pub const DEFAULT_BASE_URL: &str = "https://eservices.ito.gov.ir";
/// Search page carrying the anti-forgery token.
pub const SEARCH_PAGE_PATH: &str = "/Page/IPListSearch";
/// Endpoint returning the whole list as an HTML table.
pub const EXPORT_PATH: &str = "/Page/GetAllIPListSearch";

pub const TOKEN_FIELD: &str = "__RequestVerificationToken";
pub const SUBNET_COLUMN: &str = "IPNetwork";

pub const DEFAULT_OUTPUT_FILE: &str = "ips.txt";

/// 2^24 usable hosts, enough for a full IPv4 /8.
pub const DEFAULT_MAX_HOSTS_PER_NETWORK: u128 = 1 << 24;

pub const USER_AGENT: &str = concat!("ito-iplist/", env!("CARGO_PKG_VERSION"));

pub const ENV_BASE_URL: &str = "IPLIST_BASE_URL";
pub const ENV_OUTPUT: &str = "IPLIST_OUTPUT";
pub const ENV_MAX_HOSTS: &str = "IPLIST_MAX_HOSTS";
pub const ENV_TIMEOUT_SECS: &str = "IPLIST_TIMEOUT_SECS";

/// Everything a run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Portal root, no trailing slash.
    pub base_url: String,
    /// File the sorted host list is written to.
    pub output_path: PathBuf,
    /// Networks with more usable hosts than this are skipped.
    pub max_hosts_per_network: u128,
    /// Per-request timeout. `None` keeps the HTTP client default.
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            max_hosts_per_network: DEFAULT_MAX_HOSTS_PER_NETWORK,
            request_timeout: None,
        }
    }
}

impl Config {
    /// Build a config from the process environment.
    ///
    /// Call `dotenv::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Config, ListError> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup, starting from the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ListError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(base_url) = non_empty(lookup(ENV_BASE_URL)) {
            config = config.with_base_url(&base_url);
        }
        if let Some(output) = non_empty(lookup(ENV_OUTPUT)) {
            config.output_path = PathBuf::from(output);
        }
        if let Some(max_hosts) = non_empty(lookup(ENV_MAX_HOSTS)) {
            config.max_hosts_per_network = max_hosts.parse().map_err(|e| {
                ListError::Config(format!("{ENV_MAX_HOSTS}={max_hosts:?} is not a count: {e}"))
            })?;
        }
        if let Some(timeout) = non_empty(lookup(ENV_TIMEOUT_SECS)) {
            let secs: u64 = timeout.parse().map_err(|e| {
                ListError::Config(format!("{ENV_TIMEOUT_SECS}={timeout:?} is not seconds: {e}"))
            })?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(ListError::Config(format!(
                "base url must start with http:// or https://, got {:?}",
                config.base_url
            )));
        }

        Ok(config)
    }

    /// Replace the base url, dropping any trailing `/`.
    pub fn with_base_url(mut self, base_url: &str) -> Config {
        self.base_url = base_url.trim().trim_end_matches('/').to_string();
        self
    }

    pub fn search_page_url(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PAGE_PATH)
    }

    pub fn export_url(&self) -> String {
        format!("{}{}", self.base_url, EXPORT_PATH)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
