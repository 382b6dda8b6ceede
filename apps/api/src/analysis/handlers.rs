//! Axum route handlers for the analysis operations.
//!
//! Bodies are taken as raw bytes, and body rejections (such as the size limit) are
//! kept as values, so every failure still gets the shared error envelope and CORS
//! headers instead of a framework rejection.

use axum::{
    extract::{rejection::BytesRejection, State},
    response::Response,
};
use bytes::Bytes;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::analysis::pipeline::run_analysis;
use crate::analysis::request::AnalysisRequest;
use crate::analysis::Operation;
use crate::envelope;
use crate::errors::AppError;
use crate::state::AppState;

async fn handle(
    state: AppState,
    operation: Operation,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let span = info_span!(
        "analysis",
        operation = operation.name(),
        request_id = %Uuid::new_v4()
    );

    async move {
        let body = body.map_err(|rejection| AppError::InvalidBody(rejection.body_text()))?;
        let request = AnalysisRequest::from_body(&body)?;
        let output = run_analysis(&state, operation, &request).await?;
        Ok::<_, AppError>(output.into_response())
    }
    .instrument(span)
    .await
}

/// OPTIONS on any analysis endpoint.
pub async fn handle_preflight() -> Response {
    envelope::preflight()
}

/// POST /functions/v1/calculate-job-match (and any other non-OPTIONS method)
///
/// Body: `{resume, jobDescription}`. Returns the model's `{score, reasons, ...}` JSON as-is.
pub async fn handle_job_match(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    handle(state, Operation::JobMatch, body).await
}

/// POST /functions/v1/generate-cover-letter (and any other non-OPTIONS method)
///
/// Returns `{coverLetter}`.
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    handle(state, Operation::CoverLetter, body).await
}

/// POST /functions/v1/optimize-resume (and any other non-OPTIONS method)
///
/// Returns `{optimizedResume}`.
pub async fn handle_optimize_resume(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    handle(state, Operation::OptimizeResume, body).await
}
