//! Deck file storage.
//!
//! The [`DeckStore`] reads and writes the deck JSON document. Writes go to a
//! sibling temp file that is renamed over the deck, so a failed write never
//! leaves a half-written deck behind.
//!
//! Output format: two-space indented JSON, non-ASCII left unescaped, key
//! order preserved, trailing newline.

use std::path::{Path, PathBuf};

use storyfreq_shared::{DeckFile, Result, StoryFreqError};
use tracing::{debug, info, instrument, warn};

/// Deck schema versions this tool knows how to update.
const KNOWN_SCHEMA_VERSIONS: &[&str] = &["1"];

/// Handle to a deck JSON file on disk.
#[derive(Debug, Clone)]
pub struct DeckStore {
    path: PathBuf,
}

impl DeckStore {
    /// Create a store for the deck at `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the deck file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the deck.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<DeckFile> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| StoryFreqError::io(&self.path, e))?;
        let deck = parse_deck(&content)?;

        match deck.schema_version.as_deref() {
            Some(v) if !KNOWN_SCHEMA_VERSIONS.contains(&v) => {
                warn!(schema_version = v, "unknown deck schema version, continuing");
            }
            _ => {}
        }

        info!(entries = deck.entries.len(), "deck loaded");
        Ok(deck)
    }

    /// Serialize and atomically replace the deck file.
    #[instrument(skip_all, fields(path = %self.path.display(), entries = deck.entries.len()))]
    pub fn save(&self, deck: &DeckFile) -> Result<()> {
        let json = render_deck(deck)?;

        let tmp_path = temp_sibling(&self.path);
        std::fs::write(&tmp_path, json).map_err(|e| StoryFreqError::io(&tmp_path, e))?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            StoryFreqError::io(&self.path, e)
        })?;

        debug!("wrote deck file");
        Ok(())
    }
}

/// Parse deck JSON text.
pub fn parse_deck(content: &str) -> Result<DeckFile> {
    serde_json::from_str(content)
        .map_err(|e| StoryFreqError::deck(format!("invalid deck JSON: {e}")))
}

/// Render a deck exactly as it is written to disk.
pub fn render_deck(deck: &DeckFile) -> Result<String> {
    let mut json = serde_json::to_string_pretty(deck)
        .map_err(|e| StoryFreqError::deck(format!("JSON serialization failed: {e}")))?;
    json.push('\n');
    Ok(json)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "deck.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
