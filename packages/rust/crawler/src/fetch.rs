//! HTTP fetching for index pages and articles.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use storyfreq_shared::{Result, StoryFreqError};

/// User-Agent string for every storyfreq request.
pub const USER_AGENT: &str = concat!("storyfreq/", env!("CARGO_PKG_VERSION"));

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// Thin wrapper over a reqwest client with a fixed per-request timeout.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Build a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(timeout)
            .build()
            .map_err(|e| StoryFreqError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// GET `url` and return the body as text. Non-2xx statuses are errors.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!(%url, "fetching");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StoryFreqError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoryFreqError::Network(format!("{url}: HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| StoryFreqError::Network(format!("{url}: body read failed: {e}")))
    }
}
