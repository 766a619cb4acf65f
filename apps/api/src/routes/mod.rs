pub mod health;
pub mod views;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers as jobs;
use crate::state::AppState;
use crate::tracker::handlers as tracker;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/views/resolve", get(views::handle_resolve_view))
        // Dashboard
        .route("/api/v1/jobs", get(jobs::handle_list_jobs))
        .route("/api/v1/jobs/:id", get(jobs::handle_get_job))
        // Saved
        .route("/api/v1/saved", get(tracker::handle_list_saved))
        .route("/api/v1/saved/:id/toggle", post(tracker::handle_toggle_saved))
        // Settings
        .route(
            "/api/v1/preferences",
            get(tracker::handle_get_preferences).put(tracker::handle_put_preferences),
        )
        // Digest
        .route(
            "/api/v1/digest",
            get(tracker::handle_get_digest)
                .post(tracker::handle_generate_digest)
                .delete(tracker::handle_clear_digest),
        )
        .with_state(state)
}
