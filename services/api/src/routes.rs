use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use interview_ai::runner::runner_router;
use interview_ai::workflows::interview::clients::{AnswerEvaluator, CodeJudge, DesignScorer};
use interview_ai::workflows::interview::{interview_router, InterviewService};

pub(crate) fn with_interview_routes<E, D, J>(
    service: Arc<InterviewService<E, D, J>>,
) -> axum::Router
where
    E: AnswerEvaluator + 'static,
    D: DesignScorer + 'static,
    J: CodeJudge + 'static,
{
    interview_router(service)
        .merge(runner_router())
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{EchoJudge, KeywordEvaluator, LengthDesignScorer};
    use axum::body::Body;
    use axum::http::Request;
    use interview_ai::workflows::interview::rounds::NullSpeechCapture;
    use tower::util::ServiceExt;

    fn demo_router() -> axum::Router {
        let service = Arc::new(InterviewService::new(
            Arc::new(KeywordEvaluator),
            Arc::new(LengthDesignScorer),
            Arc::new(EchoJudge),
            Arc::new(NullSpeechCapture),
        ));
        with_interview_routes(service)
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let response = demo_router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn roles_endpoint_lists_all_four_roles() {
        let response = demo_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/roles")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let roles: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(roles.as_array().map(|a| a.len()), Some(4));
    }

    #[tokio::test]
    async fn starting_an_unknown_role_redirects_to_role_selection() {
        let response = demo_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/interview/pilot/rounds/1/start")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["navigation"]["target"], "role_selection");
    }

    #[tokio::test]
    async fn short_answer_is_rejected_with_422() {
        let router = demo_router();
        let start = Request::builder()
            .method("POST")
            .uri("/api/v1/interview/ai/rounds/1/start")
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(start).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let answer = Request::builder()
            .method("POST")
            .uri("/api/v1/interview/ai/rounds/1/answer")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"answer": "short"}"#))
            .unwrap();
        let response = router.oneshot(answer).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
