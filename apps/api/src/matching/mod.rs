// Match & filter engine: scoring, dashboard pipeline, daily digest.
// Pure functions over in-memory job lists; no I/O here.

pub mod digest;
pub mod handlers;
pub mod pipeline;
pub mod scoring;

pub use digest::{generate_digest, Digest};
pub use pipeline::{build_filter_options, select_jobs, FilterOptions, FilterState, ScoredJob};
pub use scoring::{MatchScorer, RuleBasedScorer};
