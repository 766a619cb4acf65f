use std::sync::Arc;

use crate::matching::MatchScorer;
use crate::models::Job;
use crate::tracker::Tracker;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Static job list, loaded once at startup and never mutated.
    pub jobs: Arc<Vec<Job>>,
    /// Saved ids, preferences and digest snapshots for the current user.
    pub tracker: Arc<Tracker>,
    /// Pluggable match scorer. Default: RuleBasedScorer.
    pub scorer: Arc<dyn MatchScorer>,
}

impl AppState {
    pub fn find_job(&self, job_id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == job_id)
    }
}
