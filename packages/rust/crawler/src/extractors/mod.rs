//! Article body extraction strategies.
//!
//! Each [`BodyExtractor`] knows how to locate one kind of content container.
//! The [`ExtractorRegistry`] tries them in priority order and flattens the
//! first match to plain text.

mod main_content;
mod story_body;
mod whole_document;

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node};
use tracing::debug;

use storyfreq_shared::{Result, StoryFreqError};

pub use main_content::MainContentExtractor;
pub use story_body::StoryBodyExtractor;
pub use whole_document::WholeDocumentExtractor;

/// Elements dropped together with everything inside them.
const DROPPED_TAGS: &[&str] = &["script", "style", "svg", "noscript"];

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Plain text pulled out of an article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBody {
    /// Visible text with entities decoded and whitespace collapsed.
    pub text: String,
    /// Name of the extractor that matched.
    pub strategy: &'static str,
}

/// Locates the content root of a document.
pub trait BodyExtractor: Send + Sync {
    /// Return the element whose text is the article body, if present.
    fn locate<'a>(&self, doc: &'a Html) -> Option<ElementRef<'a>>;

    /// Human-readable extractor name for tracing.
    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Holds extractors in priority order.
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn BodyExtractor>>,
}

impl ExtractorRegistry {
    /// Story body, then `<main>`, then the whole document.
    pub fn new() -> Self {
        Self {
            extractors: vec![
                Box::new(StoryBodyExtractor),
                Box::new(MainContentExtractor),
                Box::new(WholeDocumentExtractor),
            ],
        }
    }

    /// Story body, then `<main>`; pages with neither are rejected.
    pub fn strict() -> Self {
        Self {
            extractors: vec![Box::new(StoryBodyExtractor), Box::new(MainContentExtractor)],
        }
    }

    /// Pick [`Self::strict`] or [`Self::new`].
    pub fn with_strictness(strict: bool) -> Self {
        if strict { Self::strict() } else { Self::new() }
    }

    /// Extract the body text of `html` using the first extractor that matches.
    pub fn extract(&self, html: &str) -> Result<ExtractedBody> {
        let doc = Html::parse_document(html);

        for extractor in &self.extractors {
            if let Some(root) = extractor.locate(&doc) {
                let text = visible_text(root);
                debug!(strategy = extractor.name(), chars = text.len(), "extracted body");
                return Ok(ExtractedBody {
                    text,
                    strategy: extractor.name(),
                });
            }
        }

        Err(StoryFreqError::parse("no article body container found"))
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Text flattening
// ---------------------------------------------------------------------------

/// Visible text under `root`, with dropped elements removed and whitespace
/// runs collapsed to single spaces. Element boundaries count as whitespace.
pub fn visible_text(root: ElementRef<'_>) -> String {
    let mut raw = String::new();
    push_text(root, &mut raw);
    WHITESPACE_RE.replace_all(&raw, " ").trim().to_string()
}

fn push_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) if DROPPED_TAGS.contains(&element.name()) => out.push(' '),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    out.push(' ');
                    push_text(child_el, out);
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_uses_story_body() {
        let html = std::fs::read_to_string("../../../fixtures/html/story_article.html")
            .expect("read article fixture");
        let body = ExtractorRegistry::new().extract(&html).unwrap();

        assert_eq!(body.strategy, "story-body");
        assert!(body.text.starts_with("The House Awakens"));
        assert!(body.text.contains("Niko’s shadow"));
        assert!(body.text.contains("Dragons again — the dragons’ roar"));
        assert!(body.text.contains("“The manor’s heart beats.”"));
        // Dropped blocks and page chrome.
        assert!(!body.text.contains("trackRead"));
        assert!(!body.text.contains("glyph"));
        assert!(!body.text.contains("JavaScript"));
        assert!(!body.text.contains("Copyright"));
        assert!(!body.text.contains("Newsletter"));
    }

    #[test]
    fn falls_back_to_main() {
        let html = r#"<html><body><nav>Menu</nav><main><p>Only   the
            <b>main</b> text</p></main></body></html>"#;
        let body = ExtractorRegistry::new().extract(html).unwrap();
        assert_eq!(body.strategy, "main");
        assert_eq!(body.text, "Only the main text");
    }

    #[test]
    fn falls_back_to_whole_document() {
        let html = r#"<html><head><title>Title</title><style>p{}</style></head>
            <body><div>Loose &amp; free</div><script>var x = 1;</script></body></html>"#;
        let body = ExtractorRegistry::new().extract(html).unwrap();
        assert_eq!(body.strategy, "whole-document");
        assert_eq!(body.text, "Title Loose & free");
    }

    #[test]
    fn strict_registry_rejects_bare_pages() {
        let html = "<html><body><div>No containers here</div></body></html>";
        let err = ExtractorRegistry::strict().extract(html).unwrap_err();
        assert!(matches!(err, StoryFreqError::Parse { .. }));

        let html = "<html><body><main>kept</main></body></html>";
        assert_eq!(ExtractorRegistry::with_strictness(true).extract(html).unwrap().text, "kept");
    }

    #[test]
    fn adjacent_elements_do_not_glue_words() {
        let html = "<main><span>over</span><span>grown</span></main>";
        let body = ExtractorRegistry::new().extract(html).unwrap();
        assert_eq!(body.text, "over grown");
    }
}
