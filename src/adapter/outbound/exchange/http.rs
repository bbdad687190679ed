//! The process-wide HTTP client shared by every exchange adapter.

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{trace, warn};

use crate::app::config::HttpConfig;
use crate::error::Result;

/// Build the shared client with the configured timeouts.
///
/// Falls back to a default client if the builder rejects the settings.
#[must_use]
pub fn build_client(config: &HttpConfig) -> HttpClient {
    HttpClient::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .user_agent(config.user_agent.clone())
        .build()
        .unwrap_or_else(|err| {
            warn!(error = %err, "Failed to build HTTP client, using defaults");
            HttpClient::new()
        })
}

/// GET `url` and return the body when the status is a success.
pub(crate) async fn get_text(http: &HttpClient, url: &str) -> Result<String> {
    trace!(url = %url, "GET");
    let response = http.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}

/// Decode a JSON body into `T`.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    Ok(serde_json::from_str(body)?)
}
