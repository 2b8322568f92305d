use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use interview_ai::workflows::interview::clients::{
    AnswerEvaluator, ClientError, CodeJudge, DesignScorer, EvaluationRequest, JudgeRun,
    JudgeSubmission,
};
use interview_ai::workflows::interview::RoundResult;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Offline evaluator for the demo commands: the score is the number of
/// reference keywords the answer mentions, plus one for showing up.
#[derive(Default, Clone)]
pub(crate) struct KeywordEvaluator;

#[async_trait]
impl AnswerEvaluator for KeywordEvaluator {
    async fn evaluate(&self, request: EvaluationRequest) -> Result<f64, ClientError> {
        let answer = request.user_answer.to_ascii_lowercase();
        let hits = request
            .keywords
            .iter()
            .filter(|keyword| answer.contains(&keyword.to_ascii_lowercase()))
            .count();
        Ok(((hits + 1) as f64).min(5.0))
    }
}

/// Offline design scorer: longer answers score higher, capped below the
/// excellent band so the demo output stays plausible.
#[derive(Default, Clone)]
pub(crate) struct LengthDesignScorer;

#[async_trait]
impl DesignScorer for LengthDesignScorer {
    async fn score(
        &self,
        _questions: Vec<String>,
        answers: Vec<String>,
    ) -> Result<Vec<RoundResult>, ClientError> {
        let length = answers.first().map(|a| a.trim().len()).unwrap_or(0);
        let score = (40.0 + length as f64 / 20.0).min(92.0);
        Ok(vec![RoundResult {
            score,
            strengths: vec!["Covers the major components".to_string()],
            improvements: vec!["Quantify capacity estimates".to_string()],
            feedback: "Reasonable high-level architecture.".to_string(),
            passed_tests: None,
            total_tests: None,
        }])
    }
}

/// Offline judge: echoes the first stdin line back as the program output,
/// so echo-style demo problems pass their first case.
#[derive(Default, Clone)]
pub(crate) struct EchoJudge;

#[async_trait]
impl CodeJudge for EchoJudge {
    async fn execute(&self, submission: JudgeSubmission) -> Result<JudgeRun, ClientError> {
        let output = submission
            .stdin
            .lines()
            .next()
            .unwrap_or("No output")
            .to_string();
        Ok(JudgeRun {
            output,
            accepted: true,
        })
    }
}
