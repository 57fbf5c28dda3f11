use crate::error::FetchError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub timeout: Option<Duration>,
    pub proxy: Option<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            proxy: None,
        }
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns the full response body. The HTTP status is not inspected.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self> {
        let mut client_builder = Client::builder();

        if let Some(timeout) = settings.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        if let Some(proxy_url) = settings.proxy.as_deref() {
            client_builder = client_builder.proxy(reqwest::Proxy::http(proxy_url)?);
        }

        let client = client_builder
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await?;
        debug!(url, status = %response.status(), "GET completed");

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
