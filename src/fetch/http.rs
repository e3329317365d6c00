//! Lightweight static page fetching over `reqwest`.

use crate::config::DeepSearchConfig;
use crate::error::ScrapeError;
use reqwest::Client;
use tracing::{debug, instrument};

/// A client able to GET a page body.
///
/// Implementations must only return `Ok` for success statuses; any other
/// answer is an [`ScrapeError::HttpStatus`].
#[allow(async_fn_in_trait)]
pub trait HttpFetch {
    async fn fetch_html(&self, url: &str) -> Result<String, ScrapeError>;
}

/// [`HttpFetch`] backed by a shared `reqwest` client with a bounded timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &DeepSearchConfig) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(config.http_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ScrapeError::Config(format!("http client: {e}")))?;
        Ok(Self { client })
    }
}

impl HttpFetch for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_html(&self, url: &str) -> Result<String, ScrapeError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::page_load(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ScrapeError::page_load(url, e))?;
        debug!(bytes = body.len(), "Fetched page body");
        Ok(body)
    }
}
