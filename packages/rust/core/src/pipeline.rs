//! End-to-end curation run: deck → discovery → aggregate → select → enrich → merge → deck.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{NaiveDate, Utc};
use tracing::{info, instrument};

use storyfreq_crawler::{ExtractorRegistry, Fetcher};
use storyfreq_deck::DeckStore;
use storyfreq_discovery::DiscoveryOptions;
use storyfreq_lexicon::{WordLists, vocabulary};
use storyfreq_shared::{Candidate, DeckEntry, Result, RunConfig, StoryFreqError};

use crate::aggregate::aggregate_documents;
use crate::enrichment::Enricher;
use crate::merge::{MergeMode, merge, purge_provenance};
use crate::select::select_candidates;
use crate::synthesis::{PROVENANCE_TAG, synthesize};

/// Progress is logged once per this many accepted entries.
const LOG_EVERY_ENTRIES: usize = 20;

/// Result of one curation run.
#[derive(Debug)]
pub struct RunResult {
    /// Deck file that was read (and written, unless dry-run).
    pub deck_path: PathBuf,
    /// Article URLs found on the index.
    pub discovered: usize,
    /// Articles counted.
    pub processed: usize,
    /// Articles skipped after a fetch or extraction failure.
    pub skipped: usize,
    /// Candidates that passed selection.
    pub candidates: usize,
    /// Previous synthetic entries purged.
    pub removed: usize,
    /// Newly prepared entries, in acceptance order.
    pub added: Vec<DeckEntry>,
    /// Entries in the deck after merging.
    pub total_entries: usize,
    pub dry_run: bool,
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each article, whether it was counted or skipped.
    fn document_processed(&self, url: &str, current: usize, total: usize);
    /// Called when an entry is accepted.
    fn entry_prepared(&self, term: &str, current: usize, target: usize);
    /// Called when the run completes.
    fn done(&self, result: &RunResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn document_processed(&self, _url: &str, _current: usize, _total: usize) {}
    fn entry_prepared(&self, _term: &str, _current: usize, _target: usize) {}
    fn done(&self, _result: &RunResult) {}
}

/// Run the curation pipeline, stamping entries with today's UTC date.
pub async fn run(config: &RunConfig, progress: &dyn ProgressReporter) -> Result<RunResult> {
    run_on(config, progress, Utc::now().date_naive()).await
}

/// Run the curation pipeline with an explicit entry date.
///
/// 1. Load the deck (and purge the previous synthetic batch if requested)
/// 2. Discover article URLs
/// 3. Fetch, extract and count words
/// 4. Select candidates
/// 5. Enrich and synthesize entries
/// 6. Merge and save (skipped on dry-run)
#[instrument(skip_all, fields(deck = %config.deck_path.display(), dry_run = config.dry_run))]
pub async fn run_on(
    config: &RunConfig,
    progress: &dyn ProgressReporter,
    date: NaiveDate,
) -> Result<RunResult> {
    let start = Instant::now();
    config.validate()?;

    // --- Phase 1: Deck ---
    progress.phase("Loading deck");
    let store = DeckStore::new(&config.deck_path);
    let mut deck = store.load()?;

    let removed = if config.replace_synthetic {
        let removed = purge_provenance(&mut deck.entries, PROVENANCE_TAG);
        info!(removed, "purged previous synthetic entries");
        removed
    } else {
        0
    };

    let lists = WordLists::from_config(&config.lexicon);
    let existing = vocabulary(deck.entries.iter().map(|e| e.term.as_str()), &lists);
    info!(entries = deck.entries.len(), vocabulary = existing.len(), "existing vocabulary built");

    // --- Phase 2: Discovery ---
    progress.phase("Discovering stories");
    let fetcher = Fetcher::new(Duration::from_secs(config.corpus.timeout_secs))?;
    let discovery =
        storyfreq_discovery::discover(&fetcher, &DiscoveryOptions::from(&config.corpus)).await?;
    if discovery.urls.is_empty() {
        return Err(StoryFreqError::CorpusExhausted {
            pages: discovery.pages_visited,
        });
    }

    // --- Phase 3: Aggregate ---
    progress.phase("Counting words");
    let registry = ExtractorRegistry::with_strictness(config.corpus.strict_extraction);
    let aggregate =
        aggregate_documents(&fetcher, &registry, &discovery.urls, &lists, progress).await;

    // --- Phase 4: Select ---
    progress.phase("Selecting candidates");
    let candidates =
        select_candidates(&aggregate.table, &existing, &lists, config.curation.min_freq);
    info!(candidates = candidates.len(), min_freq = config.curation.min_freq, "candidates selected");

    // --- Phase 5: Enrich + synthesize ---
    progress.phase("Looking up definitions");
    let mut enricher = Enricher::new(&config.dictionary, &lists)?;
    let added = curate(
        &candidates,
        &mut enricher,
        &lists,
        config.curation.add_count,
        date,
        progress,
    )
    .await;
    let stats = enricher.stats();
    info!(
        added = added.len(),
        lookups = stats.lookups,
        found = stats.found,
        budget_skips = stats.budget_skips,
        "entries prepared"
    );

    // --- Phase 6: Merge + persist ---
    deck.entries = merge(deck.entries, added.clone(), MergeMode::Append);
    if config.dry_run {
        info!("dry run, deck not written");
    } else {
        progress.phase("Writing deck");
        store.save(&deck)?;
    }

    let result = RunResult {
        deck_path: store.path().to_path_buf(),
        discovered: discovery.urls.len(),
        processed: aggregate.processed,
        skipped: aggregate.skipped,
        candidates: candidates.len(),
        removed,
        added,
        total_entries: deck.entries.len(),
        dry_run: config.dry_run,
        elapsed: start.elapsed(),
    };

    progress.done(&result);

    info!(
        added = result.added.len(),
        removed = result.removed,
        total = result.total_entries,
        elapsed_ms = result.elapsed.as_millis(),
        "run complete"
    );

    Ok(result)
}

// ---------------------------------------------------------------------------
// Curation loop
// ---------------------------------------------------------------------------

/// Walk candidates in order, accepting entries until `add_count` is reached.
async fn curate(
    candidates: &[Candidate],
    enricher: &mut Enricher<'_>,
    lists: &WordLists,
    add_count: usize,
    date: NaiveDate,
    progress: &dyn ProgressReporter,
) -> Vec<DeckEntry> {
    let mut added = Vec::new();

    for candidate in candidates {
        if added.len() >= add_count {
            break;
        }

        let definition = enricher.definition_for(&candidate.word, added.len()).await;
        let Some(entry) = synthesize(&candidate.word, definition.as_ref(), lists, date) else {
            continue;
        };

        progress.entry_prepared(&entry.term, added.len() + 1, add_count);
        added.push(entry);
        if added.len() % LOG_EVERY_ENTRIES == 0 {
            info!(added = added.len(), target = add_count, "entries accepted");
        }
    }

    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use storyfreq_shared::AppConfig;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ARTICLE: &str = r#"<html><body><nav>Magic Story</nav>
        <div id="article-body">
          <p>Dragons circle the citadel. The dragons roar.</p>
          <p>Phyrexia looms; phyrexia spreads. Zephyr, zephyr winds.</p>
          <p>Mana, mana, mana.</p>
        </div></body></html>"#;

    fn temp_deck() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("storyfreq-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("deck.json");
        std::fs::copy("../../../fixtures/json/deck.fixture.json", &path).unwrap();
        path
    }

    fn run_config(server: &MockServer, deck: &Path) -> RunConfig {
        let mut config = RunConfig::new(deck, &AppConfig::default());
        config.corpus.base_url = server.uri();
        config.corpus.max_pages = 5;
        config.corpus.timeout_secs = 5;
        config.dictionary.api_url = format!("{}/api/v2/entries/en/", server.uri());
        config.dictionary.sleep_ms = 0;
        config.dictionary.timeout_secs = 5;
        config.curation.min_freq = 2;
        config
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
    }

    async fn story_site() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/en/news/magic-story"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<a href="/en/news/magic-story/chapter-one">1</a>
                   <a href="/en/news/magic-story/chapter-missing">2</a>"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/en/news/magic-story/chapter-one"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE))
            .mount(&server)
            .await;
        let dragon = std::fs::read_to_string("../../../fixtures/dictionary/dragon.json").unwrap();
        Mock::given(method("GET"))
            .and(path("/api/v2/entries/en/dragons"))
            .respond_with(ResponseTemplate::new(200).set_body_string(dragon))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn run_adds_defined_and_lore_words() {
        let server = story_site().await;
        let deck_path = temp_deck();
        let config = run_config(&server, &deck_path);

        let result = run_on(&config, &SilentProgress, day()).await.unwrap();

        assert_eq!(result.deck_path, deck_path);
        assert_eq!(result.discovered, 2);
        assert_eq!(result.processed, 1);
        assert_eq!(result.skipped, 1);
        let added: Vec<_> = result.added.iter().map(|e| e.term.as_str()).collect();
        // "mana" is in the deck, "zephyr" has no definition and is not lore.
        assert_eq!(added, vec!["dragons", "phyrexia"]);
        assert_eq!(result.added[0].pos.as_deref(), Some("noun"));
        assert_eq!(result.added[1].pos.as_deref(), Some("word"));
        assert_eq!(result.removed, 0);
        assert_eq!(result.total_entries, 6);

        let saved = DeckStore::new(&deck_path).load().unwrap();
        let terms: Vec<_> = saved.entries.iter().map(|e| e.term.as_str()).collect();
        assert_eq!(
            terms,
            vec!["Aether", "dragons", "mana", "oathsworn", "phyrexia", "Sheoldred's Edict"]
        );
        assert!(saved.entries[0].extra.contains_key("pronunciation_ipa"));
    }

    #[tokio::test]
    async fn purge_and_replace_rerun_is_stable() {
        let server = story_site().await;
        let deck_path = temp_deck();
        let mut config = run_config(&server, &deck_path);
        config.replace_synthetic = true;

        let first = run_on(&config, &SilentProgress, day()).await.unwrap();
        assert_eq!(first.removed, 1);
        let after_first = std::fs::read_to_string(&deck_path).unwrap();

        let second = run_on(&config, &SilentProgress, day()).await.unwrap();
        assert_eq!(second.removed, 2);
        let after_second = std::fs::read_to_string(&deck_path).unwrap();

        assert_eq!(after_first, after_second);
        assert!(!after_second.contains("oathsworn"));
        assert!(after_second.ends_with("}\n"));
    }

    #[tokio::test]
    async fn add_count_caps_new_entries() {
        let server = story_site().await;
        let deck_path = temp_deck();
        let mut config = run_config(&server, &deck_path);
        config.curation.add_count = 1;

        let result = run_on(&config, &SilentProgress, day()).await.unwrap();
        assert_eq!(result.added.len(), 1);
        assert_eq!(result.added[0].term, "dragons");
    }

    #[tokio::test]
    async fn dry_run_leaves_deck_untouched() {
        let server = story_site().await;
        let deck_path = temp_deck();
        let before = std::fs::read_to_string(&deck_path).unwrap();
        let mut config = run_config(&server, &deck_path);
        config.dry_run = true;

        let result = run_on(&config, &SilentProgress, day()).await.unwrap();
        assert!(result.dry_run);
        assert_eq!(result.added.len(), 2);
        assert_eq!(std::fs::read_to_string(&deck_path).unwrap(), before);
    }

    #[tokio::test]
    async fn empty_corpus_aborts_before_writing() {
        let server = MockServer::start().await;
        let deck_path = temp_deck();
        let before = std::fs::read_to_string(&deck_path).unwrap();
        let config = run_config(&server, &deck_path);

        let err = run_on(&config, &SilentProgress, day()).await.unwrap_err();
        assert!(matches!(err, StoryFreqError::CorpusExhausted { pages: 3 }));
        assert_eq!(std::fs::read_to_string(&deck_path).unwrap(), before);
    }

    #[tokio::test]
    async fn unreadable_deck_fails_before_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let missing = std::env::temp_dir().join(format!("storyfreq-missing-{}.json", uuid::Uuid::new_v4()));
        let config = run_config(&server, &missing);

        let err = run_on(&config, &SilentProgress, day()).await.unwrap_err();
        assert!(matches!(err, StoryFreqError::Io { .. }));
    }
}
