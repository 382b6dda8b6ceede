//! Analysis pipeline: checks configuration, runs the retried LLM call under the
//! request deadline, extracts the completion content and shapes the payload.
//!
//! Validation happens before this runs; configuration and response-shape failures
//! never consume a retry attempt.

use axum::response::Response;
use serde_json::json;
use tracing::{debug, info};

use crate::analysis::match_report::validate_match_text;
use crate::analysis::request::AnalysisRequest;
use crate::analysis::Operation;
use crate::envelope;
use crate::errors::AppError;
use crate::llm_client::ChatCompleter;
use crate::retry::retry_with_backoff;
use crate::state::AppState;

/// Successful result of one analysis, ready for the Response Formatter.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutput {
    /// JSON text produced by the model, already shape-checked.
    JsonText(String),
    /// Generated document wrapped as `{field: text}`.
    Document { field: &'static str, text: String },
}

impl AnalysisOutput {
    pub fn into_response(self) -> Response {
        match self {
            AnalysisOutput::JsonText(text) => envelope::json_text(text),
            AnalysisOutput::Document { field, text } => envelope::json(&json!({ field: text })),
        }
    }
}

pub async fn run_analysis(
    state: &AppState,
    operation: Operation,
    request: &AnalysisRequest,
) -> Result<AnalysisOutput, AppError> {
    let llm = state.llm.as_ref().ok_or_else(AppError::missing_api_key)?;

    let prompt = operation.build_prompt(request);
    let format = operation.response_format();
    let deadline = state.config.request_timeout;

    let call = retry_with_backoff(&state.retry_policy, |attempt| {
        debug!("LLM attempt {} for {}", attempt + 1, operation.name());
        llm.complete(&prompt, format)
    });

    let completion = tokio::time::timeout(deadline, call)
        .await
        .map_err(|_| AppError::Timeout(deadline))??;

    let text = completion.first_content().ok_or_else(|| {
        AppError::UnexpectedResponseShape("completion has no message content".to_string())
    })?;

    let output = match operation.payload_field() {
        None => AnalysisOutput::JsonText(validate_match_text(text)?),
        Some(_) if text.trim().is_empty() => {
            return Err(AppError::UnexpectedResponseShape(
                "completion content is empty".to_string(),
            ))
        }
        Some(field) => AnalysisOutput::Document {
            field,
            text: text.trim().to_string(),
        },
    };

    info!("{} completed", operation.name());
    Ok(output)
}
