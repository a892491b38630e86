//! Transport to the NVP endpoint

use crate::config::TransportConfig;
use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

/// Performs the POST to the provider and hands back the raw body.
///
/// Implementations own timeouts and TLS. They report connection-level
/// problems as [`TransportError`] and never interpret the body.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a form-urlencoded body, return the response body
    async fn post(&self, url: &str, body: String) -> Result<String, TransportError>;
}

/// reqwest-backed transport over rustls
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with default settings
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(&TransportConfig::default())
    }

    /// Create a transport with explicit settings
    pub fn with_config(config: &TransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, url: &str, body: String) -> Result<String, TransportError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
