//! Browser-automation session used for JS-rendered pages.
//!
//! A session is expensive to create, is not safe to share between concurrent
//! runs, and must be closed exactly once. [`BrowserSession::close`] consumes
//! the session so a closed handle cannot be reused.

use crate::config::DeepSearchConfig;
use crate::error::ScrapeError;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use tracing::{info, instrument};
use webdriver::capabilities::Capabilities;

/// One stateful browser session driven sequentially.
///
/// Used through generics only; both implementations in this crate produce
/// `Send` futures.
#[allow(async_fn_in_trait)]
pub trait BrowserSession {
    /// Navigate the session to `url`.
    async fn navigate(&mut self, url: &str) -> Result<(), ScrapeError>;

    /// Serialised DOM of the current page.
    async fn page_source(&mut self) -> Result<String, ScrapeError>;

    /// Tear the session down.
    async fn close(self) -> Result<(), ScrapeError>;
}

/// [`BrowserSession`] over a WebDriver endpoint (chromedriver by default).
///
/// If a `WebDriverSession` is dropped without [`BrowserSession::close`],
/// fantoccini still ends the remote session once its last client handle goes
/// away.
pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    /// Start a new Chrome session on `config.webdriver_url`.
    ///
    /// This is the one failure the engine escalates: without a session no
    /// aggregation can run.
    #[instrument(level = "info", skip_all, fields(webdriver_url = %config.webdriver_url))]
    pub async fn connect(config: &DeepSearchConfig) -> Result<Self, ScrapeError> {
        let mut args = vec![
            "--disable-gpu".to_string(),
            "--no-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
            format!("--user-agent={}", config.user_agent),
        ];
        if config.headless {
            args.push("--headless".to_string());
        }

        let mut caps = Capabilities::new();
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&config.webdriver_url)
            .await
            .map_err(|e| ScrapeError::Session(e.to_string()))?;

        info!(headless = config.headless, "Browser session started");
        Ok(Self { client })
    }
}

impl BrowserSession for WebDriverSession {
    async fn navigate(&mut self, url: &str) -> Result<(), ScrapeError> {
        self.client
            .goto(url)
            .await
            .map_err(|e| ScrapeError::page_load(url, e))
    }

    async fn page_source(&mut self) -> Result<String, ScrapeError> {
        self.client
            .source()
            .await
            .map_err(|e| ScrapeError::page_load("current page", e))
    }

    async fn close(self) -> Result<(), ScrapeError> {
        self.client
            .close()
            .await
            .map_err(|e| ScrapeError::Session(e.to_string()))?;
        info!("Browser session closed");
        Ok(())
    }
}
