//! Daily digest — a snapshot of the top-scoring jobs for one calendar day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::matching::pipeline::{by_score_desc, ScoredJob};
use crate::matching::scoring::MatchScorer;
use crate::models::{Job, Preferences};

pub const DIGEST_SIZE: usize = 10;

/// A generated digest. Captured once and never recomputed on preference edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Digest {
    pub date: NaiveDate,
    pub jobs: Vec<ScoredJob>,
}

/// Top `DIGEST_SIZE` jobs by score, highest first, ties broken by freshness.
/// Jobs scoring 0 never appear.
pub fn generate_digest(
    jobs: &[Job],
    preferences: &Preferences,
    scorer: &dyn MatchScorer,
) -> Vec<ScoredJob> {
    let mut scored: Vec<ScoredJob> = jobs
        .iter()
        .filter_map(|job| {
            let score = scorer.score(job, preferences);
            (score > 0).then(|| ScoredJob {
                job: job.clone(),
                match_score: Some(score),
            })
        })
        .collect();

    scored.sort_by(|a, b| {
        by_score_desc(a, b).then(a.job.posted_days_ago.cmp(&b.job.posted_days_ago))
    });
    scored.truncate(DIGEST_SIZE);
    scored
}
