use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AnswerEvaluator, ClientError, DesignScorer, EvaluationRequest};
use crate::workflows::interview::domain::RoundResult;

#[derive(Debug, Deserialize)]
struct EvaluationResponse {
    score: f64,
}

/// HTTP client for the answer-evaluation endpoint used by the behavioral
/// and technical rounds.
#[derive(Clone)]
pub struct HttpAnswerEvaluator {
    client: Client,
    url: String,
}

impl HttpAnswerEvaluator {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl AnswerEvaluator for HttpAnswerEvaluator {
    async fn evaluate(&self, request: EvaluationRequest) -> Result<f64, ClientError> {
        let response = self.client.post(&self.url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            // A hard failure for this submission; the caller surfaces it and
            // lets the user retry manually.
            return Err(ClientError::Status(status.as_u16()));
        }

        let payload: EvaluationResponse = response
            .json()
            .await
            .map_err(|err| ClientError::MalformedResponse(err.to_string()))?;

        debug!(score = payload.score, "answer evaluated");
        Ok(payload.score)
    }
}

#[derive(Debug, Serialize)]
struct DesignScoreRequest {
    questions: Vec<String>,
    answers: Vec<String>,
}

/// HTTP client for the system-design scoring endpoint.
#[derive(Clone)]
pub struct HttpDesignScorer {
    client: Client,
    url: String,
}

impl HttpDesignScorer {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl DesignScorer for HttpDesignScorer {
    async fn score(
        &self,
        questions: Vec<String>,
        answers: Vec<String>,
    ) -> Result<Vec<RoundResult>, ClientError> {
        let body = DesignScoreRequest { questions, answers };
        let response = self.client.post(&self.url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let results: Vec<RoundResult> = response
            .json()
            .await
            .map_err(|err| ClientError::MalformedResponse(err.to_string()))?;

        debug!(count = results.len(), "design answers scored");
        Ok(results)
    }
}
