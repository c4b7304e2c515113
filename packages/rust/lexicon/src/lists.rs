//! Built-in word lists and the per-run [`WordLists`] set.
//!
//! The defaults are static data; a run combines them once with any
//! `[lexicon]` config additions and passes the result around explicitly.

use std::collections::HashSet;
use std::sync::LazyLock;

use storyfreq_shared::LexiconConfig;

/// Function words and contractions that never count as vocabulary.
pub const STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "almost", "along", "also",
    "although", "always", "among", "around", "because", "before", "being", "below",
    "between", "both", "could", "did", "does", "doing", "done", "during", "each",
    "either", "else", "even", "ever", "every", "from", "further", "have", "having",
    "hers", "herself", "him", "himself", "his", "into", "itself", "just", "like",
    "many", "might", "more", "most", "must", "neither", "never", "next", "once",
    "only", "other", "ours", "ourselves", "over", "same", "should", "since", "some",
    "such", "than", "that", "their", "theirs", "them", "themselves", "then", "there",
    "these", "they", "this", "those", "through", "under", "until", "very", "was",
    "were", "what", "when", "where", "which", "while", "who", "whom", "whose", "why",
    "will", "with", "would", "your", "yours", "yourself", "yourselves", "able",
    "across", "amid", "amidst", "cannot", "cant", "didnt", "doesnt", "dont", "had",
    "has", "its", "let", "lets", "may", "much", "our", "said", "says", "still",
    "thats", "the", "and", "are", "but", "for", "not", "you", "all", "can", "any",
    "too", "off", "out", "few", "get", "got", "hadnt", "havent", "isnt", "wasnt",
    "werent", "im", "ive", "ill", "we", "us", "me", "my", "mine", "i", "he", "she",
    "do", "if", "or", "as", "at", "by", "in", "on", "to", "of", "an", "a", "be",
];

/// Site chrome and publisher words that leak into article text.
pub const BLOCKLIST: &[&str] = &[
    "wizards", "coast", "hasbro", "facebook", "twitter", "instagram", "youtube",
    "cookie", "cookies", "privacy", "copyright", "rights", "reserved", "javascript",
    "browser", "newsletter", "episode", "chapters", "chapter", "magic", "story",
];

/// Frequent narrative words too generic to be worth a card.
pub const GENERIC_WORDS: &[&str] = &[
    "already", "another", "anything", "asked", "away", "back", "been", "began", "behind",
    "better", "came", "close", "come", "dead", "enough", "everything", "eyes", "face", "feet",
    "felt", "fight", "find", "first", "found", "going", "gone", "good", "great", "ground", "hand",
    "hands", "head", "heart", "help", "here", "home", "inside", "keep", "knew", "know", "last",
    "left", "life", "light", "little", "looked", "looking", "lost", "made", "make", "maybe",
    "mind", "moment", "need", "nothing", "open", "others", "people", "place", "power", "right",
    "room", "said", "saw", "seemed", "seems", "seen", "side", "something", "someone", "still",
    "stood", "take", "taken", "than", "then", "there", "thing", "things", "think", "thought",
    "through", "time", "times", "took", "turned", "turning", "under", "until", "upon", "want",
    "wanted", "watch", "watching", "went", "were", "what", "when", "where", "while", "with",
    "without", "word", "words", "work", "world", "would",
];

/// Setting-specific names kept even when the dictionary has no entry.
pub const LORE_ALLOWLIST: &[&str] = &[
    "chandra", "jace", "nissa", "kaya", "kellan", "huatli", "elspeth", "eldrazi",
    "phyrexia", "phyrexian", "planeswalker", "planeswalkers", "ravnica", "zendikar",
    "innistrad", "dominaria", "ikar", "aether", "mana", "multiverse",
];

/// Parts of speech whose definitions are never used.
pub const UNWANTED_POS: &[&str] = &[
    "pronoun", "preposition", "conjunction", "determiner", "article", "interjection", "prefix",
    "suffix",
];

static DEFAULT_LISTS: LazyLock<WordLists> = LazyLock::new(|| WordLists {
    stopwords: to_set(STOPWORDS),
    blocklist: to_set(BLOCKLIST),
    generic: to_set(GENERIC_WORDS),
    lore: to_set(LORE_ALLOWLIST),
    unwanted_pos: to_set(UNWANTED_POS),
});

fn to_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

/// Immutable word sets consulted by tokenization, selection and synthesis.
#[derive(Debug, Clone)]
pub struct WordLists {
    stopwords: HashSet<String>,
    blocklist: HashSet<String>,
    generic: HashSet<String>,
    lore: HashSet<String>,
    unwanted_pos: HashSet<String>,
}

impl WordLists {
    /// The built-in lists.
    pub fn defaults() -> &'static WordLists {
        &DEFAULT_LISTS
    }

    /// Built-in lists extended with config additions (lowercased, trimmed).
    pub fn from_config(config: &LexiconConfig) -> Self {
        let mut lists = DEFAULT_LISTS.clone();
        extend(&mut lists.blocklist, &config.extra_blocklist);
        extend(&mut lists.generic, &config.extra_generic_words);
        extend(&mut lists.lore, &config.extra_lore_terms);
        tracing::debug!(
            blocklist = lists.blocklist.len(),
            generic = lists.generic.len(),
            lore = lists.lore.len(),
            "word lists ready"
        );
        lists
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn is_blocked(&self, word: &str) -> bool {
        self.blocklist.contains(word)
    }

    /// Whether the word is too generic to become a candidate.
    pub fn is_generic(&self, word: &str) -> bool {
        self.generic.contains(word)
    }

    /// Whether the word may be added without a dictionary definition.
    pub fn is_lore(&self, word: &str) -> bool {
        self.lore.contains(word)
    }

    /// Whether definitions under this part of speech are skipped.
    /// Expects an already lowercased label.
    pub fn is_unwanted_pos(&self, pos: &str) -> bool {
        self.unwanted_pos.contains(pos)
    }
}

impl Default for WordLists {
    fn default() -> Self {
        DEFAULT_LISTS.clone()
    }
}

fn extend(set: &mut HashSet<String>, extra: &[String]) {
    set.extend(
        extra
            .iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty()),
    );
}
