//! HTTP fetching and article body extraction.
//!
//! This crate provides:
//! - [`fetch`]: a timeout-bound HTTP client used for index pages and articles
//! - [`extractors`]: body extraction strategies tried in priority order
//! - [`ExtractorRegistry`]: picks the first strategy that finds a container

pub mod extractors;
pub mod fetch;

pub use extractors::{
    BodyExtractor, ExtractedBody, ExtractorRegistry, MainContentExtractor, StoryBodyExtractor,
    WholeDocumentExtractor, visible_text,
};
pub use fetch::{Fetcher, USER_AGENT};
