//! Axum route handlers for saved jobs, preferences and the daily digest.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::errors::AppError;
use crate::matching::handlers::JobCard;
use crate::matching::scoring::MAX_SCORE;
use crate::matching::ScoredJob;
use crate::models::Preferences;
use crate::state::AppState;
use crate::tracker::DigestState;

#[derive(Debug, Serialize)]
pub struct SavedJobsResponse {
    pub jobs: Vec<JobCard>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleSavedResponse {
    pub job_id: String,
    pub saved: bool,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// GET /api/v1/saved
///
/// Saved jobs in job-list order. Ids that no longer exist in the list are skipped.
pub async fn handle_list_saved(State(state): State<AppState>) -> Json<SavedJobsResponse> {
    let preferences = state.tracker.preferences().await;
    let saved_ids = state.tracker.saved_ids().await;

    let jobs = state
        .jobs
        .iter()
        .filter(|j| saved_ids.contains(&j.id))
        .map(|j| {
            let scored = ScoredJob {
                match_score: preferences.as_ref().map(|p| state.scorer.score(j, p)),
                job: j.clone(),
            };
            JobCard::new(scored, &saved_ids)
        })
        .collect();

    Json(SavedJobsResponse { jobs })
}

/// POST /api/v1/saved/:id/toggle
pub async fn handle_toggle_saved(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<ToggleSavedResponse>, AppError> {
    if state.find_job(&job_id).is_none() {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }
    let saved = state.tracker.toggle_saved(&job_id).await;
    Ok(Json(ToggleSavedResponse { job_id, saved }))
}

/// GET /api/v1/preferences
///
/// Returns `null` when no preferences have been saved yet.
pub async fn handle_get_preferences(State(state): State<AppState>) -> Json<Option<Preferences>> {
    Json(state.tracker.preferences().await)
}

/// PUT /api/v1/preferences
pub async fn handle_put_preferences(
    State(state): State<AppState>,
    Json(preferences): Json<Preferences>,
) -> Result<Json<Preferences>, AppError> {
    if let Some(min) = preferences.min_match_score {
        if min > MAX_SCORE {
            return Err(AppError::Validation(format!(
                "minMatchScore must be between 0 and {MAX_SCORE}, got {min}"
            )));
        }
    }
    state.tracker.set_preferences(preferences.clone()).await;
    Ok(Json(preferences))
}

/// GET /api/v1/digest
pub async fn handle_get_digest(State(state): State<AppState>) -> Json<DigestState> {
    Json(state.tracker.digest_state(today()).await)
}

/// POST /api/v1/digest
///
/// Generates today's digest. Repeated calls return the same snapshot.
pub async fn handle_generate_digest(State(state): State<AppState>) -> Json<DigestState> {
    Json(
        state
            .tracker
            .generate_digest(today(), &state.jobs, state.scorer.as_ref())
            .await,
    )
}

/// DELETE /api/v1/digest
pub async fn handle_clear_digest(State(state): State<AppState>) -> Json<DigestState> {
    let date = today();
    state.tracker.clear_digest(date).await;
    Json(state.tracker.digest_state(date).await)
}
