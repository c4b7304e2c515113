//! Deck entry synthesis.
//!
//! Entries are content-addressed: the id depends only on the word, so a rerun
//! regenerates the same ids for the same words.

use chrono::NaiveDate;
use uuid::Uuid;

use storyfreq_lexicon::WordLists;
use storyfreq_shared::{DeckEntry, DeckExample, Definition};

/// UUIDv5 namespace for synthesized entry ids.
pub const ENTRY_NAMESPACE: Uuid = Uuid::from_u128(0x06d4d9a0_88a2_4e3f_ae8f_c3b4a7805e10);

/// Tag marking entries produced by this tool; purge-and-replace keys on it.
pub const PROVENANCE_TAG: &str = "webfreq";

const ENTRY_TAGS: &[&str] = &["mtg", "story", PROVENANCE_TAG];
const MEANING_JA: &str = "（要確認）MTGストーリー頻出語";
const LORE_NOTE: &str = "Collected from MTG web story frequency extraction.";
const PLACEHOLDER_MEANING: &str = "A frequent word in MTG story web articles (curation pending).";
const PLACEHOLDER_POS: &str = "word";

/// Deterministic entry id for `word`.
pub fn entry_id_for(word: &str) -> String {
    Uuid::new_v5(&ENTRY_NAMESPACE, format!("mtg-webfreq::{word}").as_bytes()).to_string()
}

/// Build a deck entry for `word`, or `None` when it should not be added.
///
/// Without a definition only lore terms are kept, with placeholder text.
pub fn synthesize(
    word: &str,
    definition: Option<&Definition>,
    lists: &WordLists,
    date: NaiveDate,
) -> Option<DeckEntry> {
    let (pos, meaning_en, example) = match definition {
        Some(def) => (
            def.part_of_speech.clone(),
            def.meaning.clone(),
            def.example
                .clone()
                .unwrap_or_else(|| format!("The term '{word}' appears in MTG story text.")),
        ),
        None if lists.is_lore(word) => (
            PLACEHOLDER_POS.to_string(),
            PLACEHOLDER_MEANING.to_string(),
            format!("The term '{word}' appears frequently in MTG story contexts."),
        ),
        None => return None,
    };

    Some(DeckEntry {
        entry_id: entry_id_for(word),
        term: word.to_string(),
        display_term: Some(word.to_string()),
        pos: Some(pos),
        meaning_en: Some(meaning_en),
        meaning_ja: Some(MEANING_JA.to_string()),
        lore_note: Some(LORE_NOTE.to_string()),
        canonical_translation: Some(String::new()),
        tags: Some(ENTRY_TAGS.iter().map(|t| (*t).to_string()).collect()),
        synonyms: Some(Vec::new()),
        confusables: Some(Vec::new()),
        examples: Some(vec![DeckExample {
            text_en: example,
            text_ja: Some(String::new()),
        }]),
        source_quotes: Some(Vec::new()),
        updated_at: Some(format!("{}T00:00:00Z", date.format("%Y-%m-%d"))),
        extra: Default::default(),
    })
}
