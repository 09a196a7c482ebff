// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};

use crate::config::CrawlerConfig;
use crate::error::Result;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml"),
    );
    if let Ok(value) = HeaderValue::from_str(&config.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, value);
    }

    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}
