use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::clients::{AnswerEvaluator, CodeJudge, DesignScorer};
use super::rounds::{RoundError, SubmissionTrigger};
use super::service::{InterviewService, InterviewServiceError};

/// Router builder exposing the interview flow over HTTP.
pub fn interview_router<E, D, J>(service: Arc<InterviewService<E, D, J>>) -> Router
where
    E: AnswerEvaluator + 'static,
    D: DesignScorer + 'static,
    J: CodeJudge + 'static,
{
    Router::new()
        .route("/api/v1/roles", get(roles_handler::<E, D, J>))
        .route(
            "/api/v1/interview/:role/rounds/:round/start",
            post(start_handler::<E, D, J>),
        )
        .route(
            "/api/v1/interview/:role/rounds/:round/answer",
            post(answer_handler::<E, D, J>),
        )
        .route(
            "/api/v1/interview/:role/rounds/:round/run",
            post(run_handler::<E, D, J>),
        )
        .route(
            "/api/v1/interview/:role/rounds/:round/submit",
            post(submit_handler::<E, D, J>),
        )
        .route(
            "/api/v1/interview/:role/summary",
            get(summary_handler::<E, D, J>),
        )
        .route(
            "/api/v1/interview/:role/report",
            get(report_handler::<E, D, J>),
        )
        .route(
            "/api/v1/interview/:role/reset",
            post(reset_handler::<E, D, J>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
struct AnswerBody {
    answer: String,
    #[serde(default = "manual_trigger")]
    trigger: SubmissionTrigger,
}

fn manual_trigger() -> SubmissionTrigger {
    SubmissionTrigger::Manual
}

#[derive(Debug, Deserialize)]
struct RunBody {
    code: String,
    #[serde(default)]
    language: Option<String>,
}

fn error_response(error: InterviewServiceError) -> Response {
    let status = match &error {
        InterviewServiceError::Round(RoundError::AnswerTooShort { .. })
        | InterviewServiceError::Round(RoundError::UnsupportedLanguage(_))
        | InterviewServiceError::Round(RoundError::NoResultsYet)
        | InterviewServiceError::Round(RoundError::NoProblems)
        | InterviewServiceError::WrongRound => StatusCode::UNPROCESSABLE_ENTITY,
        InterviewServiceError::Round(RoundError::Client(_)) => StatusCode::BAD_GATEWAY,
        InterviewServiceError::Busy
        | InterviewServiceError::RoundNotStarted
        | InterviewServiceError::Round(RoundError::NotStarted)
        | InterviewServiceError::Round(RoundError::SubmissionInFlight)
        | InterviewServiceError::Round(RoundError::AlreadyComplete) => StatusCode::CONFLICT,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn roles_handler<E, D, J>(
    State(service): State<Arc<InterviewService<E, D, J>>>,
) -> Response
where
    E: AnswerEvaluator + 'static,
    D: DesignScorer + 'static,
    J: CodeJudge + 'static,
{
    (StatusCode::OK, axum::Json(service.roles())).into_response()
}

pub(crate) async fn start_handler<E, D, J>(
    State(service): State<Arc<InterviewService<E, D, J>>>,
    Path((role, round)): Path<(String, u8)>,
) -> Response
where
    E: AnswerEvaluator + 'static,
    D: DesignScorer + 'static,
    J: CodeJudge + 'static,
{
    match service.start_round(&role, round, Utc::now()) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn answer_handler<E, D, J>(
    State(service): State<Arc<InterviewService<E, D, J>>>,
    Path((role, round)): Path<(String, u8)>,
    axum::Json(body): axum::Json<AnswerBody>,
) -> Response
where
    E: AnswerEvaluator + 'static,
    D: DesignScorer + 'static,
    J: CodeJudge + 'static,
{
    match service
        .submit_answer(&role, round, body.answer, body.trigger, Utc::now())
        .await
    {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn run_handler<E, D, J>(
    State(service): State<Arc<InterviewService<E, D, J>>>,
    Path((role, round)): Path<(String, u8)>,
    axum::Json(body): axum::Json<RunBody>,
) -> Response
where
    E: AnswerEvaluator + 'static,
    D: DesignScorer + 'static,
    J: CodeJudge + 'static,
{
    match service.run_code(&role, round, body.code, body.language).await {
        Ok(results) => {
            let payload = json!({ "results": results });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<E, D, J>(
    State(service): State<Arc<InterviewService<E, D, J>>>,
    Path((role, round)): Path<(String, u8)>,
) -> Response
where
    E: AnswerEvaluator + 'static,
    D: DesignScorer + 'static,
    J: CodeJudge + 'static,
{
    match service.submit_code(&role, round, Utc::now()) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn summary_handler<E, D, J>(
    State(service): State<Arc<InterviewService<E, D, J>>>,
    Path(role): Path<String>,
) -> Response
where
    E: AnswerEvaluator + 'static,
    D: DesignScorer + 'static,
    J: CodeJudge + 'static,
{
    (StatusCode::OK, axum::Json(service.summary(&role))).into_response()
}

pub(crate) async fn report_handler<E, D, J>(
    State(service): State<Arc<InterviewService<E, D, J>>>,
    Path(role): Path<String>,
) -> Response
where
    E: AnswerEvaluator + 'static,
    D: DesignScorer + 'static,
    J: CodeJudge + 'static,
{
    match service.report(&role) {
        Ok(document) => (StatusCode::OK, axum::Json(document)).into_response(),
        Err(navigation) => {
            let payload = json!({ "navigation": navigation });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn reset_handler<E, D, J>(
    State(service): State<Arc<InterviewService<E, D, J>>>,
    Path(role): Path<String>,
) -> Response
where
    E: AnswerEvaluator + 'static,
    D: DesignScorer + 'static,
    J: CodeJudge + 'static,
{
    let navigation = service.reset(&role);
    let payload = json!({ "navigation": navigation });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
