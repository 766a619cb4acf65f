//! Axum route handlers for the dashboard and job detail.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::matching::{build_filter_options, select_jobs, FilterOptions, FilterState, ScoredJob};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

/// A job as shown in a list: the scored job plus per-user display fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCard {
    #[serde(flatten)]
    pub scored: ScoredJob,
    pub saved: bool,
    pub posted_label: String,
}

impl JobCard {
    pub fn new(scored: ScoredJob, saved_ids: &[String]) -> Self {
        let saved = saved_ids.iter().any(|id| *id == scored.job.id);
        let posted_label = scored.job.posted_label();
        Self {
            scored,
            saved,
            posted_label,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub jobs: Vec<JobCard>,
    pub total: usize,
    pub filter_options: FilterOptions,
    pub preferences_set: bool,
    pub scorer_backend: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/jobs
///
/// Dashboard list. Filter state comes entirely from the query string.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(filter): Query<FilterState>,
) -> Json<DashboardResponse> {
    let preferences = state.tracker.preferences().await;
    let saved_ids = state.tracker.saved_ids().await;

    let selected = select_jobs(
        &state.jobs,
        preferences.as_ref(),
        &filter,
        state.scorer.as_ref(),
    );
    let jobs: Vec<JobCard> = selected
        .into_iter()
        .map(|s| JobCard::new(s, &saved_ids))
        .collect();

    Json(DashboardResponse {
        total: jobs.len(),
        jobs,
        filter_options: build_filter_options(&state.jobs),
        preferences_set: preferences.is_some(),
        scorer_backend: state.scorer.backend(),
    })
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobCard>, AppError> {
    let job = state
        .find_job(&job_id)
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?
        .clone();

    let preferences = state.tracker.preferences().await;
    let saved = state.tracker.is_saved(&job.id).await;
    let posted_label = job.posted_label();
    let scored = ScoredJob {
        match_score: preferences.as_ref().map(|p| state.scorer.score(&job, p)),
        job,
    };

    Ok(Json(JobCard {
        scored,
        saved,
        posted_label,
    }))
}
