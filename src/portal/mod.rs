//! Portal session handling.
//!
//! This module talks to the ITO e-services portal:
//! - [`client`] - HTTP client carrying the session cookies
//! - [`token`] - Anti-forgery token from the search page
//! - [`export`] - Form submission returning the full table

mod client;
mod export;
mod token;

// Re-export public types and functions
pub use client::{build_client, check_status};
pub use export::{export_form, fetch_export};
pub use token::{acquire_token, extract_token, Token};
