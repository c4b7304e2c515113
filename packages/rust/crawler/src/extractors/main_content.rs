//! Generic `<main>` content container.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::BodyExtractor;

static MAIN_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("main").expect("main selector"));

/// Matches the first `<main>` element.
pub struct MainContentExtractor;

impl BodyExtractor for MainContentExtractor {
    fn locate<'a>(&self, doc: &'a Html) -> Option<ElementRef<'a>> {
        doc.select(&MAIN_SEL).next()
    }

    fn name(&self) -> &'static str {
        "main"
    }
}
