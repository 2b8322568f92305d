//! External scoring collaborators behind trait seams so the round state
//! machines can be exercised without a network.

mod http;
mod judge;

pub use http::{HttpAnswerEvaluator, HttpDesignScorer};
pub use judge::{Judge0Client, JudgeLanguage, JudgeRun, JudgeSubmission};

use async_trait::async_trait;
use serde::Serialize;

use super::domain::RoundResult;

/// Error raised by any external scoring call.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("scoring service returned status {0}")]
    Status(u16),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        ClientError::Transport(value.to_string())
    }
}

/// Wire payload for a single free-text answer evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRequest {
    pub user_answer: String,
    pub ideal_answer: String,
    pub keywords: Vec<String>,
}

/// Scores one candidate answer against reference material, returning a raw
/// score in [0, 5].
#[async_trait]
pub trait AnswerEvaluator: Send + Sync {
    async fn evaluate(&self, request: EvaluationRequest) -> Result<f64, ClientError>;
}

/// Scores a system-design answer. The response elements are fully-formed
/// round results; the first is forwarded unmodified.
#[async_trait]
pub trait DesignScorer: Send + Sync {
    async fn score(
        &self,
        questions: Vec<String>,
        answers: Vec<String>,
    ) -> Result<Vec<RoundResult>, ClientError>;
}

/// Executes a code submission once against the judging service and reports
/// the trimmed-output/accepted verdict.
#[async_trait]
pub trait CodeJudge: Send + Sync {
    async fn execute(&self, submission: JudgeSubmission) -> Result<JudgeRun, ClientError>;
}
