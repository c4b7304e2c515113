//! Merging synthesized entries into a deck.

use std::collections::HashSet;

use storyfreq_shared::DeckEntry;

/// How new entries combine with the existing ones.
///
/// The run pipeline always merges with `Append`: it calls
/// [`purge_provenance`] right after loading the deck so purged terms drop out
/// of the existing vocabulary before candidates are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    /// Keep every existing entry.
    #[default]
    Append,
    /// Drop entries carrying the provenance tag first.
    PurgeAndReplace,
}

/// Remove entries tagged with `tag` (case-insensitive). Returns how many went.
pub fn purge_provenance(entries: &mut Vec<DeckEntry>, tag: &str) -> usize {
    let before = entries.len();
    entries.retain(|e| !e.has_tag(tag));
    before - entries.len()
}

/// Combine `existing` and `new` into canonical deck order.
///
/// Entries are sorted by lowercased term, then id. When the same term and id
/// appear more than once, the first (existing before new) is kept.
pub fn merge(mut existing: Vec<DeckEntry>, new: Vec<DeckEntry>, mode: MergeMode) -> Vec<DeckEntry> {
    if mode == MergeMode::PurgeAndReplace {
        purge_provenance(&mut existing, crate::PROVENANCE_TAG);
    }

    existing.extend(new);
    existing.sort_by_cached_key(|e| (e.term.to_lowercase(), e.entry_id.clone()));

    let mut seen = HashSet::new();
    existing.retain(|e| seen.insert((e.term.clone(), e.entry_id.clone())));
    existing
}
