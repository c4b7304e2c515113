//! Word frequency aggregation across story articles.

use std::collections::BTreeMap;

use tracing::{info, instrument, warn};

use storyfreq_crawler::{ExtractorRegistry, Fetcher};
use storyfreq_lexicon::{WordLists, tokenize};
use storyfreq_shared::Result;

use crate::pipeline::ProgressReporter;

/// Progress is logged once per this many documents.
const LOG_EVERY_DOCUMENTS: usize = 10;

// ---------------------------------------------------------------------------
// FrequencyTable
// ---------------------------------------------------------------------------

/// Token counts for one run.
///
/// Iteration is alphabetical, so anything derived from the table is
/// independent of the order documents were added in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `token`.
    pub fn add_token(&mut self, token: impl Into<String>) {
        *self.counts.entry(token.into()).or_insert(0) += 1;
    }

    /// Tokenize `text` and count every accepted token. Returns how many were counted.
    pub fn add_text(&mut self, text: &str, lists: &WordLists) -> usize {
        let mut added = 0;
        for token in tokenize(text, lists) {
            self.add_token(token);
            added += 1;
        }
        added
    }

    /// Occurrences of `token` (zero when unseen).
    pub fn count(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(token, count)` pairs in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

// ---------------------------------------------------------------------------
// Document aggregation
// ---------------------------------------------------------------------------

/// Outcome of aggregating a list of documents.
#[derive(Debug, Clone, Default)]
pub struct AggregateReport {
    pub table: FrequencyTable,
    /// Documents fetched and extracted successfully.
    pub processed: usize,
    /// Documents skipped after a fetch or extraction failure.
    pub skipped: usize,
}

/// Fetch each URL in order, extract its body and count its tokens.
///
/// A failing document is logged and skipped; aggregation always completes.
#[instrument(skip_all, fields(documents = urls.len()))]
pub async fn aggregate_documents(
    fetcher: &Fetcher,
    registry: &ExtractorRegistry,
    urls: &[String],
    lists: &WordLists,
    progress: &dyn ProgressReporter,
) -> AggregateReport {
    let mut report = AggregateReport::default();
    let total = urls.len();

    for (i, url) in urls.iter().enumerate() {
        let index = i + 1;

        match fetch_body(fetcher, registry, url).await {
            Ok(text) => {
                report.table.add_text(&text, lists);
                report.processed += 1;
            }
            Err(e) => {
                warn!(index, total, %url, error = %e, "skipping document");
                report.skipped += 1;
            }
        }

        progress.document_processed(url, index, total);
        if index % LOG_EVERY_DOCUMENTS == 0 {
            info!(index, total, distinct = report.table.len(), "documents processed");
        }
    }

    info!(
        processed = report.processed,
        skipped = report.skipped,
        distinct = report.table.len(),
        "aggregation complete"
    );

    report
}

async fn fetch_body(fetcher: &Fetcher, registry: &ExtractorRegistry, url: &str) -> Result<String> {
    let html = fetcher.fetch_text(url).await?;
    Ok(registry.extract(&html)?.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::pipeline::SilentProgress;

    #[test]
    fn counts_tokens_across_texts() {
        let lists = WordLists::defaults();
        let mut table = FrequencyTable::new();
        assert_eq!(table.add_text("Dragons over the harbor.", lists), 2);
        table.add_text("The dragons' harbor burned; dragons fled.", lists);

        assert_eq!(table.count("dragons"), 3);
        assert_eq!(table.count("harbor"), 2);
        assert_eq!(table.count("the"), 0);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn document_order_does_not_matter() {
        let lists = WordLists::defaults();
        let docs = [
            "Ember lantern ember",
            "Lantern tide, cinder lantern",
            "cinder ember tide tide",
        ];

        let mut forward = FrequencyTable::new();
        for doc in docs {
            forward.add_text(doc, lists);
        }
        let mut backward = FrequencyTable::new();
        for doc in docs.iter().rev() {
            backward.add_text(doc, lists);
        }

        assert_eq!(forward, backward);
        let order: Vec<_> = forward.iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec!["cinder", "ember", "lantern", "tide"]);
    }

    #[tokio::test]
    async fn failing_documents_are_skipped() {
        let server = wiremock::MockServer::start().await;
        let article = std::fs::read_to_string("../../../fixtures/html/story_article.html")
            .expect("read article fixture");
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/story/ok"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(article))
            .mount(&server)
            .await;

        let urls = vec![
            format!("{}/story/missing", server.uri()),
            format!("{}/story/ok", server.uri()),
        ];
        let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();
        let report = aggregate_documents(
            &fetcher,
            &ExtractorRegistry::new(),
            &urls,
            WordLists::defaults(),
            &SilentProgress,
        )
        .await;

        assert_eq!(report.processed, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.table.count("dragons"), 3);
        assert_eq!(report.table.count("javascript"), 0);
    }
}
