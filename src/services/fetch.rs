// src/services/fetch.rs

//! Page fetching seam.
//!
//! The pipeline only ever sees [`PageFetcher`]; the HTTP implementation owns
//! the politeness policy (single outstanding request, minimum inter-request
//! spacing, bounded timeout).

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::config::CrawlerConfig;
use crate::error::Result;
use crate::utils::http;

/// Fetches a page and yields its raw HTML.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP fetcher over reqwest.
pub struct HttpFetcher {
    client: reqwest::Client,
    delay: Duration,
    last_request: tokio::sync::Mutex<Option<Instant>>,
}

impl HttpFetcher {
    /// Create a fetcher from crawler settings.
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_async_client(config)?,
            delay: Duration::from_millis(config.request_delay_ms),
            last_request: tokio::sync::Mutex::new(None),
        })
    }

    /// Wait until the minimum inter-request delay has elapsed.
    ///
    /// Concurrent callers queue on the lock, so spacing holds even if the
    /// pipeline ever stops being single-worker.
    async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.delay {
                tokio::time::sleep(self.delay - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.pace().await;
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
