//! Story article body container.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::BodyExtractor;

static ARTICLE_BODY_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#article-body").expect("article body selector"));

/// Matches the `#article-body` container used by story pages.
pub struct StoryBodyExtractor;

impl BodyExtractor for StoryBodyExtractor {
    fn locate<'a>(&self, doc: &'a Html) -> Option<ElementRef<'a>> {
        doc.select(&ARTICLE_BODY_SEL).next()
    }

    fn name(&self) -> &'static str {
        "story-body"
    }
}
