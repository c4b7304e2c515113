//! Core domain types for storyfreq decks and the curation pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// DeckFile
// ---------------------------------------------------------------------------

/// The deck JSON document, the system of record for a vocabulary deck.
///
/// Unknown top-level keys are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckFile {
    /// Schema version string (e.g. `"1"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// Deck header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<DeckHeader>,
    /// Ordered deck entries.
    #[serde(default)]
    pub entries: Vec<DeckEntry>,
    /// Any other top-level fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `deck` header object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckHeader {
    pub deck_id: String,
    pub name: String,
    pub version: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// DeckEntry
// ---------------------------------------------------------------------------

/// A single vocabulary card.
///
/// Entries are never edited in place by the pipeline: synthetic entries are
/// regenerated wholesale and replace the previous batch. Every field past
/// `term` is optional so that hand-written entries round-trip without gaining
/// keys they never had.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckEntry {
    /// Stable identifier (UUIDv5 for synthesized entries).
    pub entry_id: String,
    /// Canonical term.
    pub term: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_term: Option<String>,
    /// Part of speech.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning_ja: Option<String>,
    /// Lore / provenance note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lore_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_translation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confusables: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<DeckExample>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_quotes: Option<Vec<SourceQuote>>,
    /// Day-granularity UTC timestamp, `YYYY-MM-DDT00:00:00Z`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Fields this tool does not manage (IPA, idioms, collocations, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeckEntry {
    /// Whether the entry carries `tag`, compared case-insensitively.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().flatten().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// An example sentence pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckExample {
    pub text_en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_ja: Option<String>,
}

/// A quotation from source material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceQuote {
    pub source: String,
    pub quote: String,
}

// ---------------------------------------------------------------------------
// Pipeline values
// ---------------------------------------------------------------------------

/// A dictionary definition resolved for a candidate word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub part_of_speech: String,
    pub meaning: String,
    pub example: Option<String>,
}

/// A word that survived candidate filtering, with its corpus frequency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub word: String,
    pub frequency: u64,
}
