//! Article link extraction from index page markup.
//!
//! Links are found by pattern, not by parsing the page: any
//! `href="<prefix>..."` attribute counts. Hrefs carrying a query string or
//! fragment do not match.

use regex::Regex;
use url::Url;

use storyfreq_shared::{Result, StoryFreqError};

/// Compiled pattern for one article path prefix.
#[derive(Debug, Clone)]
pub struct ArticleLinkPattern {
    re: Regex,
}

impl ArticleLinkPattern {
    /// Build a pattern matching `href="<prefix>…"`.
    pub fn new(prefix: &str) -> Result<Self> {
        let pattern = format!(r##"href="({}[^"#?]+)""##, regex::escape(prefix));
        let re = Regex::new(&pattern)
            .map_err(|e| StoryFreqError::parse(format!("bad article link pattern: {e}")))?;
        Ok(Self { re })
    }

    /// Article paths in page order, duplicates included.
    pub fn find_paths<'h>(&self, html: &'h str) -> Vec<&'h str> {
        self.re
            .captures_iter(html)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }
}

/// Resolve an article path against the site origin.
pub(crate) fn resolve(base: &Url, path: &str) -> Option<String> {
    base.join(path).ok().map(String::from)
}
