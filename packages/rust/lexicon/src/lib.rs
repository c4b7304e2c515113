//! Word lists and text tokenization for storyfreq.
//!
//! Turns article body text into a lazy stream of normalized word tokens and
//! holds the static word lists (stopwords, site chrome, generic words, lore
//! terms, unwanted parts of speech) every stage consults.

mod lists;
mod tokenize;

pub use lists::{
    BLOCKLIST, GENERIC_WORDS, LORE_ALLOWLIST, STOPWORDS, UNWANTED_POS, WordLists,
};
pub use tokenize::{Tokens, accept, normalize_token, tokenize, vocabulary};
