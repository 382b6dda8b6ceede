// Resume analysis operations: job-match scoring, cover letters, resume optimization.
// All three share one request shape, one pipeline and one error envelope; they differ
// only in prompt, response format and payload shape.

pub mod handlers;
pub mod match_report;
pub mod pipeline;
pub mod prompts;
pub mod request;

use crate::llm_client::prompts::{
    GROUNDING_INSTRUCTION, JSON_ONLY_INSTRUCTION, PLAIN_TEXT_INSTRUCTION,
};
use crate::llm_client::{Prompt, ResponseFormat};
use request::AnalysisRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    JobMatch,
    CoverLetter,
    OptimizeResume,
}

impl Operation {
    /// Endpoint name, also used as the tracing span label.
    pub fn name(self) -> &'static str {
        match self {
            Operation::JobMatch => "calculate-job-match",
            Operation::CoverLetter => "generate-cover-letter",
            Operation::OptimizeResume => "optimize-resume",
        }
    }

    pub fn response_format(self) -> Option<ResponseFormat> {
        match self {
            Operation::JobMatch => Some(ResponseFormat::JsonObject),
            Operation::CoverLetter | Operation::OptimizeResume => None,
        }
    }

    /// Field the generated document is wrapped in. `None` means the model's JSON is forwarded.
    pub fn payload_field(self) -> Option<&'static str> {
        match self {
            Operation::JobMatch => None,
            Operation::CoverLetter => Some("coverLetter"),
            Operation::OptimizeResume => Some("optimizedResume"),
        }
    }

    fn system_prompt(self) -> String {
        match self {
            Operation::JobMatch => {
                format!("{}\n\n{JSON_ONLY_INSTRUCTION}", prompts::JOB_MATCH_SYSTEM)
            }
            Operation::CoverLetter => format!(
                "{}\n\n{GROUNDING_INSTRUCTION}\n{PLAIN_TEXT_INSTRUCTION}",
                prompts::COVER_LETTER_SYSTEM
            ),
            Operation::OptimizeResume => format!(
                "{}\n\n{GROUNDING_INSTRUCTION}\n{PLAIN_TEXT_INSTRUCTION}",
                prompts::OPTIMIZE_RESUME_SYSTEM
            ),
        }
    }

    pub fn build_prompt(self, request: &AnalysisRequest) -> Prompt {
        Prompt {
            system: self.system_prompt(),
            user: format!(
                "Resume:\n{}\n\nJob Description:\n{}",
                request.resume_text(),
                request.job_description
            ),
        }
    }
}
