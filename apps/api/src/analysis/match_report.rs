//! Shape check for job-match output before it is forwarded to the caller.
//!
//! The model is asked for `{score, reasons, ...}`. Only `score` is enforced; any
//! extra fields pass through untouched because the original text is what gets sent.

use serde_json::Value;

use crate::errors::AppError;

pub const MAX_SCORE: f64 = 100.0;

/// Validates the model's job-match text and returns the JSON text to forward.
pub fn validate_match_text(text: &str) -> Result<String, AppError> {
    let json_text = strip_json_fences(text);

    let value: Value = serde_json::from_str(json_text).map_err(|e| {
        AppError::UnexpectedResponseShape(format!("job match is not valid JSON: {e}"))
    })?;

    let object = value.as_object().ok_or_else(|| {
        AppError::UnexpectedResponseShape("job match must be a JSON object".to_string())
    })?;

    match object.get("score").and_then(Value::as_f64) {
        Some(score) if (0.0..=MAX_SCORE).contains(&score) => Ok(json_text.to_string()),
        Some(score) => Err(AppError::UnexpectedResponseShape(format!(
            "job match score {score} is outside 0-100"
        ))),
        None => Err(AppError::UnexpectedResponseShape(
            "job match is missing a numeric 'score'".to_string(),
        )),
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));

    match inner {
        Some(stripped) => stripped
            .trim_start()
            .strip_suffix("```")
            .map(str::trim)
            .unwrap_or(stripped.trim_start()),
        None => text,
    }
}
