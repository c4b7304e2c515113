//! Story corpus discovery.
//!
//! Walks the paginated story index (`<index>?page=1`, `?page=2`, ...) and
//! collects article URLs in the order they are first seen. The walk ends at
//! the page limit, or earlier once three pages in a row either fail to load
//! or list no articles.

mod links;

use tracing::{debug, info, instrument, warn};
use url::Url;

use storyfreq_crawler::Fetcher;
use storyfreq_shared::{CorpusConfig, Result, StoryFreqError};

pub use links::ArticleLinkPattern;

/// Consecutive failed or empty index pages that end discovery.
const EMPTY_STREAK_LIMIT: u32 = 3;

// ---------------------------------------------------------------------------
// Discovery options
// ---------------------------------------------------------------------------

/// Where the index lives and how far to walk it.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Site origin, e.g. `https://magic.wizards.com`.
    pub base_url: String,
    /// Index path, e.g. `/en/news/magic-story`.
    pub index_path: String,
    /// Prefix every article path starts with.
    pub article_prefix: String,
    /// Highest page number to request.
    pub max_pages: u32,
}

impl From<&CorpusConfig> for DiscoveryOptions {
    fn from(config: &CorpusConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            index_path: config.index_path.clone(),
            article_prefix: config.article_prefix.clone(),
            max_pages: config.max_pages,
        }
    }
}

// ---------------------------------------------------------------------------
// DiscoveryReport
// ---------------------------------------------------------------------------

/// Outcome of walking the index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    /// Unique article URLs, in discovery order.
    pub urls: Vec<String>,
    /// Index pages requested.
    pub pages_visited: u32,
    /// Index pages that failed to load.
    pub pages_failed: u32,
    /// Whether the empty-page streak ended the walk before `max_pages`.
    pub stopped_early: bool,
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

/// Walk the story index and collect article URLs.
///
/// Page failures are not errors; they only count toward the empty streak.
/// An empty result is returned as-is and left for the caller to judge.
#[instrument(skip_all, fields(base = %opts.base_url, max_pages = opts.max_pages))]
pub async fn discover(fetcher: &Fetcher, opts: &DiscoveryOptions) -> Result<DiscoveryReport> {
    let base = Url::parse(&opts.base_url).map_err(|e| {
        StoryFreqError::validation(format!("invalid base URL '{}': {e}", opts.base_url))
    })?;
    let pattern = ArticleLinkPattern::new(&opts.article_prefix)?;

    let mut report = DiscoveryReport::default();
    let mut seen = std::collections::HashSet::new();
    let mut empty_streak = 0;

    for page in 1..=opts.max_pages {
        let page_url = index_page_url(&opts.base_url, &opts.index_path, page);
        report.pages_visited += 1;

        let paths = match fetcher.fetch_text(&page_url).await {
            Ok(html) => pattern
                .find_paths(&html)
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>(),
            Err(e) => {
                warn!(page, error = %e, "index page fetch failed");
                report.pages_failed += 1;
                Vec::new()
            }
        };

        if paths.is_empty() {
            empty_streak += 1;
            debug!(page, empty_streak, "no article links on index page");
            if empty_streak >= EMPTY_STREAK_LIMIT {
                report.stopped_early = page < opts.max_pages;
                info!(page, "index exhausted");
                break;
            }
            continue;
        }

        empty_streak = 0;
        let before = report.urls.len();
        for path in paths {
            if let Some(url) = links::resolve(&base, &path) {
                if seen.insert(url.clone()) {
                    report.urls.push(url);
                }
            }
        }
        debug!(page, new_urls = report.urls.len() - before, "index page scanned");
    }

    info!(
        urls = report.urls.len(),
        pages_visited = report.pages_visited,
        pages_failed = report.pages_failed,
        "discovery complete"
    );

    Ok(report)
}

/// `<base><index_path>?page=<n>`
fn index_page_url(base_url: &str, index_path: &str, page: u32) -> String {
    format!("{}{index_path}?page={page}", base_url.trim_end_matches('/'))
}
