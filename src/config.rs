//! Runtime configuration for the aggregation engine.
//!
//! Configuration is read from an optional YAML file. Every field has a
//! default, so an empty file (or no file at all) yields a working setup that
//! talks to a local chromedriver on port 9515.
//!
//! ```yaml
//! webdriver_url: http://localhost:9515
//! headless: true
//! http_timeout_secs: 10
//! page_settle_ms: 3000
//! search_settle_ms: 2000
//! ```

use crate::error::ScrapeError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeepSearchConfig {
    /// WebDriver endpoint the browser session connects to.
    pub webdriver_url: String,
    /// Run the browser without a visible window.
    pub headless: bool,
    /// Timeout for the lightweight HTTP path.
    pub http_timeout_secs: u64,
    /// Upper bound on a single browser navigation.
    pub page_load_timeout_secs: u64,
    /// Delay after navigating to a listing or article page.
    pub page_settle_ms: u64,
    /// Delay after navigating to a search-engine result page.
    pub search_settle_ms: u64,
    /// User agent sent by both the HTTP client and the browser.
    pub user_agent: String,
    /// Shuffle catalog order per run so capped runs don't always favour the same site.
    pub randomize_sources: bool,
}

impl Default for DeepSearchConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            headless: true,
            http_timeout_secs: 10,
            page_load_timeout_secs: 30,
            page_settle_ms: 3000,
            search_settle_ms: 2000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            randomize_sources: true,
        }
    }
}

impl DeepSearchConfig {
    /// Load configuration from a YAML file.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScrapeError> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ScrapeError::Config(format!("{}: {e}", path.as_ref().display())))?;
        let config = Self::from_yaml(&raw)?;
        info!("Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from YAML text. Missing fields take their defaults.
    pub fn from_yaml(raw: &str) -> Result<Self, ScrapeError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw).map_err(|e| ScrapeError::Config(e.to_string()))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    pub fn page_settle(&self) -> Duration {
        Duration::from_millis(self.page_settle_ms)
    }

    pub fn search_settle(&self) -> Duration {
        Duration::from_millis(self.search_settle_ms)
    }
}
