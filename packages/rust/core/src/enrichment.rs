//! Dictionary enrichment for candidate words.
//!
//! Looks words up against a free dictionary service, one request at a time,
//! under a lookup budget and a pacing delay. Every failure mode collapses to
//! "no definition"; nothing here aborts a run.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use storyfreq_crawler::Fetcher;
use storyfreq_lexicon::WordLists;
use storyfreq_shared::{Definition, DictionaryConfig, Result, StoryFreqError};

/// Part of speech used when the service leaves it blank.
const FALLBACK_POS: &str = "word";

// ---------------------------------------------------------------------------
// Response schema
// ---------------------------------------------------------------------------

/// One element of the top-level response array.
#[derive(Debug, Deserialize)]
struct ApiEntry {
    #[serde(default)]
    meanings: Vec<ApiMeaning>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMeaning {
    #[serde(default)]
    part_of_speech: Option<String>,
    #[serde(default)]
    definitions: Vec<ApiDefinition>,
}

#[derive(Debug, Deserialize)]
struct ApiDefinition {
    #[serde(default)]
    definition: Option<String>,
    #[serde(default)]
    example: Option<String>,
}

/// Pick the first usable definition from a dictionary response body.
///
/// Only the first entry of the response is read. Meanings under an unwanted
/// part of speech are skipped, as are blank definitions. The part of speech
/// is kept as the service spelled it, trimmed. Anything that is not the
/// expected array shape yields `None`.
pub fn parse_definition(body: &str, lists: &WordLists) -> Option<Definition> {
    let entries: Vec<ApiEntry> = serde_json::from_str(body).ok()?;
    let first = entries.first()?;

    for meaning in &first.meanings {
        let pos = match meaning.part_of_speech.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => p,
            _ => FALLBACK_POS,
        };
        if lists.is_unwanted_pos(&pos.to_lowercase()) {
            continue;
        }

        for def in &meaning.definitions {
            let text = def.definition.as_deref().unwrap_or_default().trim();
            if text.is_empty() {
                continue;
            }
            let example = def
                .example
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from);

            return Some(Definition {
                part_of_speech: pos.to_string(),
                meaning: text.to_string(),
                example,
            });
        }
    }

    None
}

// ---------------------------------------------------------------------------
// Enricher
// ---------------------------------------------------------------------------

/// Lookup counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentStats {
    /// Requests sent to the service.
    pub lookups: usize,
    /// Lookups that produced a definition.
    pub found: usize,
    pub cache_hits: usize,
    /// Words answered without a lookup because the budget was spent.
    pub budget_skips: usize,
}

/// Stateful dictionary client with a per-run cache.
pub struct Enricher<'a> {
    fetcher: Fetcher,
    api_url: Url,
    pacing: Duration,
    lookup_limit: usize,
    lists: &'a WordLists,
    cache: HashMap<String, Option<Definition>>,
    stats: EnrichmentStats,
}

impl<'a> Enricher<'a> {
    /// Build an enricher from the `[dictionary]` settings.
    pub fn new(config: &DictionaryConfig, lists: &'a WordLists) -> Result<Self> {
        let api_url = Url::parse(&config.api_url).map_err(|e| {
            StoryFreqError::config(format!("invalid dictionary URL '{}': {e}", config.api_url))
        })?;
        if api_url.cannot_be_a_base() {
            return Err(StoryFreqError::config(format!(
                "dictionary URL '{}' cannot take a word path",
                config.api_url
            )));
        }

        Ok(Self {
            fetcher: Fetcher::new(Duration::from_secs(config.timeout_secs))?,
            api_url,
            pacing: Duration::from_millis(config.sleep_ms),
            lookup_limit: config.lookup_limit,
            lists,
            cache: HashMap::new(),
            stats: EnrichmentStats::default(),
        })
    }

    /// Lookup URL for `word`: the API URL with the word as a final,
    /// percent-encoded path segment.
    pub fn lookup_url(&self, word: &str) -> String {
        let mut url = self.api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(word);
        }
        url.into()
    }

    /// Definition for `word`, given how many entries are already accepted.
    ///
    /// Once `accepted` reaches the lookup limit no request is made. Results,
    /// including misses, are cached for the rest of the run.
    #[instrument(skip(self), level = "debug")]
    pub async fn definition_for(&mut self, word: &str, accepted: usize) -> Option<Definition> {
        if let Some(cached) = self.cache.get(word) {
            self.stats.cache_hits += 1;
            return cached.clone();
        }
        if accepted >= self.lookup_limit {
            self.stats.budget_skips += 1;
            return None;
        }

        let definition = self.lookup(word).await;
        self.stats.lookups += 1;
        if definition.is_some() {
            self.stats.found += 1;
        }
        self.cache.insert(word.to_string(), definition.clone());

        if !self.pacing.is_zero() {
            tokio::time::sleep(self.pacing).await;
        }

        definition
    }

    /// Counters so far.
    pub fn stats(&self) -> EnrichmentStats {
        self.stats
    }

    async fn lookup(&self, word: &str) -> Option<Definition> {
        let url = self.lookup_url(word);
        match self.fetcher.fetch_text(&url).await {
            Ok(body) => {
                let definition = parse_definition(&body, self.lists);
                if definition.is_none() {
                    debug!(word, "no usable definition in response");
                }
                definition
            }
            Err(e) => {
                debug!(word, error = %e, "dictionary lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("../../../fixtures/dictionary/{name}"))
            .expect("read dictionary fixture")
    }

    fn config(server: &wiremock::MockServer, lookup_limit: usize) -> DictionaryConfig {
        DictionaryConfig {
            api_url: format!("{}/api/v2/entries/en/", server.uri()),
            timeout_secs: 5,
            sleep_ms: 0,
            lookup_limit,
        }
    }

    #[test]
    fn parses_first_wanted_definition() {
        let def = parse_definition(&fixture("dragon.json"), WordLists::defaults()).unwrap();
        assert_eq!(def.part_of_speech, "noun");
        assert_eq!(def.meaning, "A legendary, serpentine or reptilian creature.");
        assert_eq!(def.example.as_deref(), Some("The dragon guarded its hoard."));
    }

    #[test]
    fn skips_unwanted_pos_and_blank_definitions() {
        let def = parse_definition(&fixture("through.json"), WordLists::defaults()).unwrap();
        assert_eq!(def.part_of_speech, "adjective");
        assert_eq!(def.meaning, "Finished; complete.");
        assert_eq!(def.example, None);
    }

    #[test]
    fn unexpected_shapes_yield_none() {
        let lists = WordLists::defaults();
        assert!(parse_definition(&fixture("not_found.json"), lists).is_none());
        assert!(parse_definition("not json", lists).is_none());
        assert!(parse_definition("[]", lists).is_none());
        assert!(parse_definition(r#"[{"meanings": [{"partOfSpeech": "Pronoun ", "definitions": [{"definition": "x"}]}]}]"#, lists).is_none());
    }

    #[test]
    fn blank_pos_becomes_word() {
        let body = r#"[{"meanings": [{"partOfSpeech": "  ", "definitions": [{"definition": " A thing. "}]}]}]"#;
        let def = parse_definition(body, WordLists::defaults()).unwrap();
        assert_eq!(def.part_of_speech, "word");
        assert_eq!(def.meaning, "A thing.");
    }

    #[test]
    fn later_entries_are_ignored() {
        let body = r#"[
            {"meanings": [{"partOfSpeech": "preposition", "definitions": [{"definition": "x"}]}]},
            {"meanings": [{"partOfSpeech": "noun", "definitions": [{"definition": "A span."}]}]}
        ]"#;
        assert!(parse_definition(body, WordLists::defaults()).is_none());
    }

    #[test]
    fn pos_keeps_its_spelling() {
        let body = r#"[{"meanings": [{"partOfSpeech": " Noun ", "definitions": [{"definition": "A span."}]}]}]"#;
        let def = parse_definition(body, WordLists::defaults()).unwrap();
        assert_eq!(def.part_of_speech, "Noun");
    }

    #[tokio::test]
    async fn lookup_url_encodes_word() {
        let server = wiremock::MockServer::start().await;
        let lists = WordLists::defaults();
        let enricher = Enricher::new(&config(&server, 5), lists).unwrap();
        assert_eq!(
            enricher.lookup_url("dragon"),
            format!("{}/api/v2/entries/en/dragon", server.uri())
        );
        assert!(enricher.lookup_url("two words").ends_with("/en/two%20words"));
    }

    #[tokio::test]
    async fn looks_up_once_and_caches() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/api/v2/entries/en/dragon"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(fixture("dragon.json")))
            .expect(1)
            .mount(&server)
            .await;
        wiremock::Mock::given(wiremock::matchers::path("/api/v2/entries/en/zephyr"))
            .respond_with(wiremock::ResponseTemplate::new(404).set_body_string(fixture("not_found.json")))
            .expect(1)
            .mount(&server)
            .await;

        let lists = WordLists::defaults();
        let mut enricher = Enricher::new(&config(&server, 5), lists).unwrap();

        assert!(enricher.definition_for("dragon", 0).await.is_some());
        assert!(enricher.definition_for("dragon", 1).await.is_some());
        assert!(enricher.definition_for("zephyr", 1).await.is_none());
        assert!(enricher.definition_for("zephyr", 1).await.is_none());

        let stats = enricher.stats();
        assert_eq!(stats.lookups, 2);
        assert_eq!(stats.found, 1);
        assert_eq!(stats.cache_hits, 2);
    }

    #[tokio::test]
    async fn spent_budget_skips_network() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(fixture("dragon.json")))
            .expect(0)
            .mount(&server)
            .await;

        let lists = WordLists::defaults();
        let mut enricher = Enricher::new(&config(&server, 2), lists).unwrap();

        assert!(enricher.definition_for("dragon", 2).await.is_none());
        assert_eq!(enricher.stats().budget_skips, 1);
        assert_eq!(enricher.stats().lookups, 0);
    }

    #[tokio::test]
    async fn only_network_lookups_are_paced() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::path("/api/v2/entries/en/dragon"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(fixture("dragon.json")))
            .expect(1)
            .mount(&server)
            .await;

        let pacing = Duration::from_millis(300);
        let mut config = config(&server, 2);
        config.sleep_ms = 300;
        let mut enricher = Enricher::new(&config, WordLists::defaults()).unwrap();

        let start = std::time::Instant::now();
        assert!(enricher.definition_for("dragon", 0).await.is_some());
        assert!(start.elapsed() >= pacing);

        let start = std::time::Instant::now();
        assert!(enricher.definition_for("dragon", 1).await.is_some());
        assert!(start.elapsed() < pacing / 2, "cache hit was paced");

        let start = std::time::Instant::now();
        assert!(enricher.definition_for("other", 2).await.is_none());
        assert!(start.elapsed() < pacing / 2, "budget skip was paced");

        let stats = enricher.stats();
        assert_eq!((stats.lookups, stats.cache_hits, stats.budget_skips), (1, 1, 1));
    }

    #[tokio::test]
    async fn server_errors_and_garbage_are_misses() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::path("/api/v2/entries/en/broken"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .mount(&server)
            .await;
        wiremock::Mock::given(wiremock::matchers::path("/api/v2/entries/en/garbled"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let lists = WordLists::defaults();
        let mut enricher = Enricher::new(&config(&server, 10), lists).unwrap();
        assert!(enricher.definition_for("broken", 0).await.is_none());
        assert!(enricher.definition_for("garbled", 0).await.is_none());
        assert_eq!(enricher.stats().lookups, 2);
    }

    #[test]
    fn rejects_bad_api_url() {
        let config = DictionaryConfig {
            api_url: "mailto:someone@example.com".into(),
            ..DictionaryConfig::default()
        };
        assert!(Enricher::new(&config, WordLists::defaults()).is_err());
    }
}
