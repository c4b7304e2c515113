//! Application configuration for storyfreq.
//!
//! User config lives at `~/.storyfreq/storyfreq.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, StoryFreqError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "storyfreq.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".storyfreq";

// ---------------------------------------------------------------------------
// Config structs (matching storyfreq.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Story corpus location and discovery limits.
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Dictionary service settings.
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// Entry selection settings.
    #[serde(default)]
    pub curation: CurationConfig,

    /// Additions to the built-in word lists.
    #[serde(default)]
    pub lexicon: LexiconConfig,
}

/// `[corpus]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Site origin that relative article links resolve against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the paginated story index.
    #[serde(default = "default_index_path")]
    pub index_path: String,

    /// Path prefix every article link must start with.
    #[serde(default = "default_article_prefix")]
    pub article_prefix: String,

    /// Maximum number of index pages to walk.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Per-request timeout for index pages and articles.
    #[serde(default = "default_corpus_timeout")]
    pub timeout_secs: u64,

    /// Skip articles that have neither a story body nor a `<main>` element
    /// instead of counting words from the whole page.
    #[serde(default)]
    pub strict_extraction: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            index_path: default_index_path(),
            article_prefix: default_article_prefix(),
            max_pages: default_max_pages(),
            timeout_secs: default_corpus_timeout(),
            strict_extraction: false,
        }
    }
}

fn default_base_url() -> String {
    "https://magic.wizards.com".into()
}
fn default_index_path() -> String {
    "/en/news/magic-story".into()
}
fn default_article_prefix() -> String {
    "/en/news/magic-story/".into()
}
fn default_max_pages() -> u32 {
    28
}
fn default_corpus_timeout() -> u64 {
    15
}

/// `[dictionary]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// Lookup endpoint; the percent-encoded word is appended.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-lookup timeout.
    #[serde(default = "default_dict_timeout")]
    pub timeout_secs: u64,

    /// Pause after each lookup that went to the network.
    #[serde(default = "default_sleep_ms")]
    pub sleep_ms: u64,

    /// Only this many accepted entries get a real lookup.
    #[serde(default = "default_lookup_limit")]
    pub lookup_limit: usize,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_dict_timeout(),
            sleep_ms: default_sleep_ms(),
            lookup_limit: default_lookup_limit(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en/".into()
}
fn default_dict_timeout() -> u64 {
    6
}
fn default_sleep_ms() -> u64 {
    40
}
fn default_lookup_limit() -> usize {
    90
}

/// `[curation]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationConfig {
    /// Number of entries to add per run.
    #[serde(default = "default_add_count")]
    pub add_count: usize,

    /// Minimum corpus frequency for a candidate.
    #[serde(default = "default_min_freq")]
    pub min_freq: u64,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            add_count: default_add_count(),
            min_freq: default_min_freq(),
        }
    }
}

fn default_add_count() -> usize {
    140
}
fn default_min_freq() -> u64 {
    4
}

/// `[lexicon]` section. Every list extends the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// Extra site-chrome words dropped during tokenization.
    #[serde(default)]
    pub extra_blocklist: Vec<String>,

    /// Extra generic words never proposed as candidates.
    #[serde(default)]
    pub extra_generic_words: Vec<String>,

    /// Extra lore terms accepted even without a dictionary definition.
    #[serde(default)]
    pub extra_lore_terms: Vec<String>,
}

// ---------------------------------------------------------------------------
// Run config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Deck JSON file to read and update.
    pub deck_path: PathBuf,
    pub corpus: CorpusConfig,
    pub dictionary: DictionaryConfig,
    pub curation: CurationConfig,
    pub lexicon: LexiconConfig,
    /// Remove the previous synthetic batch before adding a new one.
    pub replace_synthetic: bool,
    /// Report prepared entries without writing the deck.
    pub dry_run: bool,
}

impl RunConfig {
    /// Build a run config for `deck_path` from the file config.
    pub fn new(deck_path: impl Into<PathBuf>, config: &AppConfig) -> Self {
        Self {
            deck_path: deck_path.into(),
            corpus: config.corpus.clone(),
            dictionary: config.dictionary.clone(),
            curation: config.curation.clone(),
            lexicon: config.lexicon.clone(),
            replace_synthetic: false,
            dry_run: false,
        }
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.corpus.base_url).map_err(|e| {
            StoryFreqError::config(format!("invalid corpus.base_url '{}': {e}", self.corpus.base_url))
        })?;
        Url::parse(&self.dictionary.api_url).map_err(|e| {
            StoryFreqError::config(format!(
                "invalid dictionary.api_url '{}': {e}",
                self.dictionary.api_url
            ))
        })?;
        if !self.corpus.index_path.starts_with('/') || !self.corpus.article_prefix.starts_with('/')
        {
            return Err(StoryFreqError::config(
                "corpus.index_path and corpus.article_prefix must start with '/'",
            ));
        }
        if self.corpus.max_pages == 0 {
            return Err(StoryFreqError::config("max_pages must be at least 1"));
        }
        if self.corpus.timeout_secs == 0 || self.dictionary.timeout_secs == 0 {
            return Err(StoryFreqError::config("timeouts must be at least 1 second"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.storyfreq/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| StoryFreqError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.storyfreq/storyfreq.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| StoryFreqError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| StoryFreqError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| StoryFreqError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| StoryFreqError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| StoryFreqError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
