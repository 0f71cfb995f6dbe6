//! Production transport over HTTP GET using wreq.

use super::{Endpoint, Query, XmlTransport};
use crate::config::Config;
use crate::error::{Error, Result, TransportError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use wreq::Client;

/// Production base URL of the NonStaticXMLAPI service.
pub const DEFAULT_BASE_URL: &str = "https://xml.sunhotels.net/15/PostGet/NonStaticXMLAPI.asmx";

const MAX_ERROR_BODY: usize = 200;

/// HTTP transport with timeouts and optional proxy.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport from the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url)
                .map_err(|e| Error::Config(format!("invalid proxy {}: {}", proxy_url, e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(TransportError::Request)?;

        Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the full request URL.
    pub fn url(&self, endpoint: Endpoint, query: &Query) -> String {
        format!("{}/{}?{}", self.base_url, endpoint.path(), query.encode())
    }
}

#[async_trait]
impl XmlTransport for HttpTransport {
    async fn get(&self, endpoint: Endpoint, query: &Query) -> Result<String, TransportError> {
        debug!("GET {}/{}?{}", self.base_url, endpoint.path(), query.redacted());

        let response = self
            .client
            .get(self.url(endpoint, query))
            .header("Accept", "text/xml, application/xml;q=0.9, */*;q=0.8")
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                debug!("Failed to read {} error body: {}", endpoint, e);
                String::new()
            });
            warn!("{} failed with status {}", endpoint, status);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        Ok(response.text().await?)
    }
}
