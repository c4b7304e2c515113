//! Error types for storyfreq.
//!
//! Library crates use [`StoryFreqError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all storyfreq operations.
#[derive(Debug, thiserror::Error)]
pub enum StoryFreqError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while fetching index pages, articles, or definitions.
    #[error("network error: {0}")]
    Network(String),

    /// Markup or response parsing error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Deck file is malformed or could not be (de)serialized.
    #[error("deck error: {message}")]
    Deck { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (bad URL, empty container, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Discovery walked the index without finding a single article.
    #[error("no story URLs discovered after {pages} index page(s)")]
    CorpusExhausted { pages: u32 },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, StoryFreqError>;

impl StoryFreqError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a deck error from any displayable message.
    pub fn deck(msg: impl Into<String>) -> Self {
        Self::Deck {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = StoryFreqError::config("max_pages must be at least 1");
        assert_eq!(err.to_string(), "config error: max_pages must be at least 1");

        let err = StoryFreqError::deck("entries is not an array");
        assert!(err.to_string().contains("entries is not an array"));
    }

    #[test]
    fn corpus_exhausted_mentions_pages() {
        let err = StoryFreqError::CorpusExhausted { pages: 3 };
        assert_eq!(err.to_string(), "no story URLs discovered after 3 index page(s)");
    }
}
