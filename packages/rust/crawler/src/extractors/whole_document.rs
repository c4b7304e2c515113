//! Whole-document fallback.
//!
//! Always matches. Site navigation and footers are counted along with the
//! article, so words from page chrome can show up as candidates.

use scraper::{ElementRef, Html};

use super::BodyExtractor;

/// Uses the document root.
pub struct WholeDocumentExtractor;

impl BodyExtractor for WholeDocumentExtractor {
    fn locate<'a>(&self, doc: &'a Html) -> Option<ElementRef<'a>> {
        Some(doc.root_element())
    }

    fn name(&self) -> &'static str {
        "whole-document"
    }
}
