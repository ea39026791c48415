//! HTTP client

use hostsetup_errors::{Error, NetworkError};
use reqwest::{Client, Response};
use std::time::Duration;

/// Network client configuration
#[derive(Debug, Clone)]
pub struct NetConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(600), // JDK archives run to hundreds of MB
            connect_timeout: Duration::from_secs(30),
            user_agent: format!("hostsetup/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP client wrapper
///
/// Requests are attempted once. Retrying a failed installation is the
/// caller's decision, so nothing here retries behind its back.
#[derive(Clone)]
pub struct NetClient {
    client: Client,
    config: NetConfig,
}

impl NetClient {
    /// Create a new network client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to initialize.
    pub fn new(config: NetConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NetworkError::ConnectionRefused(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created with default settings.
    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(NetConfig::default())
    }

    /// Execute a GET request, failing on non-success status codes
    ///
    /// # Errors
    ///
    /// Returns an error on timeouts, connection failures or an HTTP error
    /// status.
    pub async fn get(&self, url: &str) -> Result<Response, Error> {
        let parsed =
            reqwest::Url::parse(url).map_err(|e| NetworkError::InvalidUrl(format!("{url}: {e}")))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| map_request_error(url, &e))?;

        if !response.status().is_success() {
            return Err(NetworkError::HttpError {
                url: url.to_string(),
                status: response.status().as_u16(),
            }
            .into());
        }
        Ok(response)
    }

    #[must_use]
    pub fn config(&self) -> &NetConfig {
        &self.config
    }
}

pub(crate) fn map_request_error(url: &str, e: &reqwest::Error) -> Error {
    if e.is_timeout() {
        NetworkError::Timeout {
            url: url.to_string(),
        }
        .into()
    } else if e.is_connect() {
        NetworkError::ConnectionRefused(format!("{url}: {e}")).into()
    } else {
        NetworkError::DownloadFailed(format!("{url}: {e}")).into()
    }
}
