//! HTTP client for the Loro Template Service.

mod loro_client;
mod response;

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::HeaderMap;

pub use loro_client::LoroHttpClient;

/// Endpoint used when neither flags, environment nor config name one.
pub const DEFAULT_API_URL: &str = "https://api.lorotemplates.com";

/// Default timeout for API requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("loro-cli/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client with the headers every request carries.
///
/// # Errors
///
/// Returns error if client construction fails
pub fn build_client(timeout: Duration, headers: HeaderMap) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(timeout)
        .build()
}
