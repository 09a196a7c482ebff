// src/config.rs

//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Region and schooling-level allow-lists
    #[serde(default)]
    pub filter: FilterConfig,

    /// Notification transport settings
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// Persistence settings
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.listing_url.trim().is_empty() {
            return Err(AppError::validation("crawler.listing_url is empty"));
        }
        if self.filter.estados.is_empty() {
            return Err(AppError::validation("filter.estados is empty"));
        }
        if self.filter.escolaridades.is_empty() {
            return Err(AppError::validation("filter.escolaridades is empty"));
        }
        if self.storage.seen_file.trim().is_empty() {
            return Err(AppError::validation("storage.seen_file is empty"));
        }
        Ok(())
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// URL of the regional listing page
    #[serde(default = "defaults::listing_url")]
    pub listing_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Accept-Language header (the source renders pt-BR)
    #[serde(default = "defaults::accept_language")]
    pub accept_language: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            listing_url: defaults::listing_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            accept_language: defaults::accept_language(),
        }
    }
}

/// Region and schooling-level allow-lists.
///
/// Loaded once at process start and immutable afterwards. Entries whose
/// region resolves outside `estados` never enter the pipeline; records whose
/// `escolaridade` contains none of `escolaridades` are dropped by the
/// eligibility filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Accepted region codes
    #[serde(default = "defaults::estados")]
    pub estados: Vec<String>,

    /// Accepted schooling levels (substring match)
    #[serde(default = "defaults::escolaridades")]
    pub escolaridades: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            estados: defaults::estados(),
            escolaridades: defaults::escolaridades(),
        }
    }
}

/// CallMeBot WhatsApp transport settings.
///
/// Credentials left empty in the file are resolved from the
/// `CALLMEBOT_PHONE` / `CALLMEBOT_APIKEY` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Target phone number
    #[serde(default)]
    pub phone: String,

    /// API key
    #[serde(default)]
    pub apikey: String,

    /// Transport timeout in seconds
    #[serde(default = "defaults::notify_timeout")]
    pub timeout_secs: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            phone: String::new(),
            apikey: String::new(),
            timeout_secs: defaults::notify_timeout(),
        }
    }
}

impl NotifierConfig {
    /// Fill empty credentials from the environment.
    pub fn resolved(&self) -> Self {
        let mut resolved = self.clone();
        if resolved.phone.is_empty() {
            resolved.phone = std::env::var("CALLMEBOT_PHONE").unwrap_or_default();
        }
        if resolved.apikey.is_empty() {
            resolved.apikey = std::env::var("CALLMEBOT_APIKEY").unwrap_or_default();
        }
        resolved
    }

    /// Whether both credentials are present.
    pub fn is_configured(&self) -> bool {
        !self.phone.is_empty() && !self.apikey.is_empty()
    }
}

/// Persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the seen-announcements JSON file
    #[serde(default = "defaults::seen_file")]
    pub seen_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            seen_file: defaults::seen_file(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn listing_url() -> String {
        "https://www.pciconcursos.com.br/concursos/nordeste/".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; pci-watch/1.0)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        3000
    }
    pub fn accept_language() -> String {
        "pt-BR,pt;q=0.9".into()
    }

    // Filter defaults
    pub fn estados() -> Vec<String> {
        ["PE", "PB", "RN", "AL", "BA", "SE"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
    pub fn escolaridades() -> Vec<String> {
        vec!["Médio".into(), "Superior".into()]
    }

    // Notifier defaults
    pub fn notify_timeout() -> u64 {
        30
    }

    // Storage defaults
    pub fn seen_file() -> String {
        "data/seen.json".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_estados() {
        let mut config = Config::default();
        config.filter.estados.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_allow_lists_populated() {
        let config = Config::default();
        assert!(config.filter.estados.contains(&"PE".to_string()));
        assert!(config.filter.escolaridades.contains(&"Superior".to_string()));
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config: Config = toml::from_str(
            r#"
            [crawler]
            request_delay_ms = 500

            [filter]
            estados = ["BA"]
            "#,
        )
        .unwrap();
        assert_eq!(config.crawler.request_delay_ms, 500);
        assert_eq!(config.crawler.timeout_secs, 30);
        assert_eq!(config.filter.estados, vec!["BA"]);
        assert_eq!(config.filter.escolaridades.len(), 2);
    }
}
