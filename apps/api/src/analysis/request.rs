//! AnalysisRequest: body shape shared by all three operations, plus the validator.

use serde_json::{Map, Value};

use crate::errors::AppError;

/// Validated request. Both fields are guaranteed present and non-blank.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    /// Structured or raw resume; opaque to the pipeline.
    pub resume: Value,
    pub job_description: String,
}

impl AnalysisRequest {
    /// Parses a JSON body and validates it. An empty body is treated as `{}`.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        let mut fields = if body.iter().all(u8::is_ascii_whitespace) {
            Map::new()
        } else {
            match serde_json::from_slice(body) {
                Ok(Value::Object(fields)) => fields,
                Ok(_) => {
                    return Err(AppError::InvalidBody(
                        "request body must be a JSON object".to_string(),
                    ))
                }
                Err(e) => return Err(AppError::InvalidBody(e.to_string())),
            }
        };

        let resume = fields
            .remove("resume")
            .filter(is_present)
            .ok_or(AppError::MissingParameter { field: "resume" })?;

        let job_description = match fields.remove("jobDescription").filter(is_present) {
            Some(Value::String(text)) => text,
            Some(_) => {
                return Err(AppError::InvalidBody(
                    "jobDescription must be a string".to_string(),
                ))
            }
            None => {
                return Err(AppError::MissingParameter {
                    field: "jobDescription",
                })
            }
        };

        Ok(Self {
            resume,
            job_description,
        })
    }

    /// Resume text as embedded in the prompt: strings verbatim, structures as pretty JSON.
    pub fn resume_text(&self) -> String {
        match &self.resume {
            Value::String(text) => text.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        }
    }
}

/// Falsy values (null, `false`, zero) and blank strings count as absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Result<AnalysisRequest, AppError> {
        AnalysisRequest::from_body(value.to_string().as_bytes())
    }

    fn missing_field(result: Result<AnalysisRequest, AppError>) -> &'static str {
        match result {
            Err(AppError::MissingParameter { field }) => field,
            other => panic!("expected MissingParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_accepts_structured_resume() {
        let request = parse(json!({
            "resume": {"skills": ["Go"]},
            "jobDescription": "Backend engineer, Go required"
        }))
        .unwrap();
        assert_eq!(request.resume, json!({"skills": ["Go"]}));
        assert_eq!(request.job_description, "Backend engineer, Go required");
    }

    #[test]
    fn test_accepts_raw_text_resume() {
        let request = parse(json!({
            "resume": "Jane Doe\nSenior Go developer",
            "jobDescription": "Go role"
        }))
        .unwrap();
        assert_eq!(request.resume_text(), "Jane Doe\nSenior Go developer");
    }

    #[test]
    fn test_structured_resume_text_is_pretty_json() {
        let request = parse(json!({"resume": {"name": "Jane"}, "jobDescription": "x"})).unwrap();
        assert_eq!(request.resume_text(), "{\n  \"name\": \"Jane\"\n}");
    }

    #[test]
    fn test_missing_job_description_named() {
        assert_eq!(
            missing_field(parse(json!({"resume": {"skills": ["Go"]}}))),
            "jobDescription"
        );
    }

    #[test]
    fn test_resume_reported_before_job_description() {
        assert_eq!(missing_field(parse(json!({}))), "resume");
    }

    #[test]
    fn test_null_and_blank_fields_are_missing() {
        assert_eq!(
            missing_field(parse(json!({"resume": null, "jobDescription": "x"}))),
            "resume"
        );
        assert_eq!(
            missing_field(parse(json!({"resume": "   ", "jobDescription": "x"}))),
            "resume"
        );
        assert_eq!(
            missing_field(parse(json!({"resume": {}, "jobDescription": " \n\t"}))),
            "jobDescription"
        );
    }

    #[test]
    fn test_false_and_zero_fields_are_missing() {
        assert_eq!(
            missing_field(parse(json!({"resume": false, "jobDescription": "x"}))),
            "resume"
        );
        assert_eq!(
            missing_field(parse(json!({"resume": 0, "jobDescription": "x"}))),
            "resume"
        );
        assert_eq!(
            missing_field(parse(json!({"resume": {}, "jobDescription": 0}))),
            "jobDescription"
        );
        assert_eq!(
            missing_field(parse(json!({"resume": "cv", "jobDescription": false}))),
            "jobDescription"
        );
    }

    #[test]
    fn test_empty_body_is_missing_resume() {
        assert_eq!(missing_field(AnalysisRequest::from_body(b"")), "resume");
        assert_eq!(missing_field(AnalysisRequest::from_body(b"  \n")), "resume");
    }

    #[test]
    fn test_malformed_json_is_invalid_body() {
        let result = AnalysisRequest::from_body(b"{\"resume\": ");
        assert!(matches!(result, Err(AppError::InvalidBody(_))));
    }

    #[test]
    fn test_non_object_body_is_invalid_body() {
        let result = AnalysisRequest::from_body(b"[1, 2, 3]");
        assert!(matches!(result, Err(AppError::InvalidBody(_))));
    }

    #[test]
    fn test_non_string_job_description_is_invalid_body() {
        let result = parse(json!({"resume": {}, "jobDescription": 42}));
        assert!(matches!(result, Err(AppError::InvalidBody(_))));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let request = parse(json!({
            "resume": {"skills": []},
            "jobDescription": "role",
            "userId": "abc"
        }));
        assert!(request.is_ok());
    }
}
