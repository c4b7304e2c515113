//! Core curation pipeline and domain logic for storyfreq.
//!
//! This crate ties together discovery, article extraction, tokenization,
//! dictionary enrichment and deck merging into one end-to-end run
//! ([`pipeline::run`]).

pub mod aggregate;
pub mod enrichment;
pub mod merge;
pub mod pipeline;
pub mod select;
pub mod synthesis;

pub use aggregate::{AggregateReport, FrequencyTable, aggregate_documents};
pub use enrichment::{Enricher, EnrichmentStats, parse_definition};
pub use merge::{MergeMode, merge, purge_provenance};
pub use pipeline::{ProgressReporter, RunResult, SilentProgress, run, run_on};
pub use select::select_candidates;
pub use synthesis::{ENTRY_NAMESPACE, PROVENANCE_TAG, entry_id_for, synthesize};
