pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub const JOB_MATCH_PATH: &str = "/functions/v1/calculate-job-match";
pub const COVER_LETTER_PATH: &str = "/functions/v1/generate-cover-letter";
pub const OPTIMIZE_RESUME_PATH: &str = "/functions/v1/optimize-resume";

/// Analysis paths answer OPTIONS with a preflight; every other method runs the
/// pipeline so the response always carries the envelope and CORS headers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            JOB_MATCH_PATH,
            post(handlers::handle_job_match)
                .options(handlers::handle_preflight)
                .fallback(handlers::handle_job_match),
        )
        .route(
            COVER_LETTER_PATH,
            post(handlers::handle_cover_letter)
                .options(handlers::handle_preflight)
                .fallback(handlers::handle_cover_letter),
        )
        .route(
            OPTIMIZE_RESUME_PATH,
            post(handlers::handle_optimize_resume)
                .options(handlers::handle_preflight)
                .fallback(handlers::handle_optimize_resume),
        )
        .with_state(state)
}
