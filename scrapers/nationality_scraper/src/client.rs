use std::time::Duration;

use tracing::{debug, warn};

use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};

/// Anything that can return the markup behind a site-relative path.
pub trait PageSource: Sync {
    fn get_text(&self, path: &str) -> Result<String>;
}

/// Blocking HTTP source rooted at the configured base URL.
pub struct HttpPageSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpPageSource {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        // The blocking client defaults to a 30s timeout, so `None` is passed explicitly.
        let client = reqwest::blocking::Client::builder()
            .user_agent(&config.scraping.user_agent)
            .timeout(config.scraping.request_timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(ScrapeError::Client)?;

        Ok(Self::with_client(client, &config.site.base_url))
    }

    /// Use a preconfigured client (proxies, extra headers, ...).
    pub fn with_client(client: reqwest::blocking::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl PageSource for HttpPageSource {
    fn get_text(&self, path: &str) -> Result<String> {
        let url = self.url_for(path);
        debug!(url, "fetching page");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| ScrapeError::Network {
                url: url.clone(),
                source,
            })?;

        // The body is kept whatever the status; error pages are saved as they come.
        let status = response.status();
        if !status.is_success() {
            warn!(url, %status, "non-success status, keeping body as-is");
        }

        response
            .text()
            .map_err(|source| ScrapeError::Network { url, source })
    }
}
