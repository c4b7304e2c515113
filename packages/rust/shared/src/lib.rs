//! Shared types, error model, and configuration for storyfreq.
//!
//! This crate is the foundation depended on by all other storyfreq crates.
//! It provides:
//! - [`StoryFreqError`]: the unified error type
//! - Domain types ([`DeckFile`], [`DeckEntry`], [`Definition`], [`Candidate`])
//! - Configuration ([`AppConfig`], [`RunConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CorpusConfig, CurationConfig, DictionaryConfig, LexiconConfig, RunConfig,
    config_dir, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{Result, StoryFreqError};
pub use types::{Candidate, DeckEntry, DeckExample, DeckFile, DeckHeader, Definition, SourceQuote};
