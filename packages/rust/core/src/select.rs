//! Candidate selection from the frequency table.

use std::cmp::Reverse;
use std::collections::HashSet;

use storyfreq_lexicon::WordLists;
use storyfreq_shared::Candidate;

/// Words worth proposing as new entries, most frequent first.
///
/// A token qualifies when it occurs at least `min_freq` times, is not already
/// covered by the deck, and is not on the generic-word list. Ties keep the
/// table's alphabetical order.
pub fn select_candidates(
    table: &crate::FrequencyTable,
    existing: &HashSet<String>,
    lists: &WordLists,
    min_freq: u64,
) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = table
        .iter()
        .filter(|&(word, freq)| {
            freq >= min_freq && !existing.contains(word) && !lists.is_generic(word)
        })
        .map(|(word, frequency)| Candidate {
            word: word.to_string(),
            frequency,
        })
        .collect();

    candidates.sort_by_key(|c| Reverse(c.frequency));
    candidates
}
