// src/fetch.rs - HTTP fetch capability behind a trait so the scraping
// logic can be exercised against fixture documents.
use crate::config::ScrapingConfig;
use crate::error::{Result, ScrapeError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the document at `url`. Any non-2xx status is a `Fetch` error.
    async fn fetch(&self, url: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScrapingConfig) -> Self {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::fetch(url, e))?;

        if !response.status().is_success() {
            return Err(ScrapeError::fetch(
                url,
                format!("HTTP status {}", response.status()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::fetch(url, e))?;
        debug!("Fetched {} bytes from {}", body.len(), url);

        Ok(body)
    }
}
