//! Word tokenization and normalization.
//!
//! A raw token is a letter followed by at least two letters, apostrophes or
//! hyphens. Raw tokens are normalized, then rejected if they are short, listed,
//! or not purely lowercase ASCII letters.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::lists::WordLists;

/// Raw word run: a letter, then two or more letters/apostrophes/hyphens.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z'’-]{2,}").expect("token regex"));

/// Tokens shorter than this (in characters) are dropped.
const MIN_TOKEN_LEN: usize = 4;

/// Normalize a raw token.
///
/// Lowercases, folds the curly apostrophe into `'`, strips one trailing
/// possessive `'s`, then trims any non-`[a-z]` characters from both ends.
/// The result may still contain inner punctuation; see [`accept`].
pub fn normalize_token(raw: &str) -> String {
    let lowered = raw.to_lowercase().replace('’', "'");
    let base = lowered.strip_suffix("'s").unwrap_or(&lowered);
    base.trim_matches(|c: char| !c.is_ascii_lowercase())
        .to_string()
}

/// Whether a normalized token counts as a word.
pub fn accept(token: &str, lists: &WordLists) -> bool {
    if token.chars().count() < MIN_TOKEN_LEN {
        return false;
    }
    if lists.is_stopword(token) || lists.is_blocked(token) {
        return false;
    }
    token.bytes().all(|b| b.is_ascii_lowercase())
}

/// Lazily tokenize `text`.
///
/// The returned iterator is cheap to clone; a clone restarts from the clone
/// point without rescanning earlier text.
pub fn tokenize<'a>(text: &'a str, lists: &'a WordLists) -> Tokens<'a> {
    Tokens {
        text,
        lists,
        pos: 0,
    }
}

/// Iterator over the accepted, normalized tokens of a text.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    lists: &'a WordLists,
    pos: usize,
}

impl Iterator for Tokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while let Some(m) = TOKEN_RE.find_at(self.text, self.pos) {
            self.pos = m.end();
            let token = normalize_token(m.as_str());
            if accept(&token, self.lists) {
                return Some(token);
            }
        }
        self.pos = self.text.len();
        None
    }
}

/// Build the set of words a deck already covers.
///
/// Each term contributes its accepted tokens plus its normalized whole form,
/// so multi-word terms block their parts and single words block themselves
/// even when they would fail the tokenizer's filters.
pub fn vocabulary<'t, I>(terms: I, lists: &WordLists) -> HashSet<String>
where
    I: IntoIterator<Item = &'t str>,
{
    let mut words = HashSet::new();
    for term in terms {
        words.extend(tokenize(term, lists));
        let whole = normalize_token(term);
        if !whole.is_empty() {
            words.insert(whole);
        }
    }
    words
}
