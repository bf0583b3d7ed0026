//! FIDO Metadata Service client
//!
//! Downloads the raw MDS blob. The response body is the signed token itself.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

/// Well-known URL of the FIDO Alliance metadata service
pub const DEFAULT_MDS_URL: &str = "https://mds.fidoalliance.org/";

/// Request timeout for the blob download
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur when fetching the MDS blob
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed or returned a non-success status
    #[error("Failed to fetch MDS blob: {0}")]
    Request(#[from] reqwest::Error),
}

/// Client for downloading the MDS blob
#[derive(Debug, Clone)]
pub struct MdsClient {
    client: Client,
    url: String,
}

impl Default for MdsClient {
    fn default() -> Self {
        Self::new(DEFAULT_MDS_URL)
    }
}

impl MdsClient {
    /// Create a new MdsClient for the given URL
    pub fn new(url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to configure HTTP client ({}), using defaults without timeout", e);
                Client::new()
            });
        Self::with_client(client, url)
    }

    /// Create a new MdsClient with a custom HTTP client
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the MDS blob
    ///
    /// # Returns
    /// * `Ok(String)` - The raw token, surrounding whitespace removed
    /// * `Err(FetchError)` - If the request fails or the server answers with an error status
    pub async fn fetch_blob(&self) -> Result<String, FetchError> {
        debug!(url = %self.url, "requesting MDS blob");

        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let text = response.text().await?;

        debug!(bytes = text.len(), "received MDS blob");
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_default_uses_fido_url() {
        let client = MdsClient::default();
        assert_eq!(client.url(), "https://mds.fidoalliance.org/");
    }

    #[tokio::test]
    async fn test_fetch_blob_returns_trimmed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("aaa.bbb.ccc\n"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = MdsClient::new(format!("{}/", mock_server.uri()));
        let blob = client.fetch_blob().await.expect("fetch failed");

        assert_eq!(blob, "aaa.bbb.ccc");
    }

    #[tokio::test]
    async fn test_new_sends_configured_user_agent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(header(
                "user-agent",
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_string("aaa.bbb.ccc"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = MdsClient::new(mock_server.uri());
        let blob = client.fetch_blob().await.expect("fetch failed");

        assert_eq!(blob, "aaa.bbb.ccc");
    }

    #[tokio::test]
    async fn test_fetch_blob_fails_on_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = MdsClient::new(mock_server.uri());
        let result = client.fetch_blob().await;

        assert!(matches!(result, Err(FetchError::Request(_))));
    }

    #[tokio::test]
    async fn test_fetch_blob_fails_when_unreachable() {
        // Nothing listens on the discard port
        let client = MdsClient::new("http://127.0.0.1:9/");
        assert!(client.fetch_blob().await.is_err());
    }
}
