use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_interview_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use interview_ai::config::AppConfig;
use interview_ai::error::AppError;
use interview_ai::telemetry;
use interview_ai::workflows::interview::clients::{
    HttpAnswerEvaluator, HttpDesignScorer, Judge0Client,
};
use interview_ai::workflows::interview::rounds::NullSpeechCapture;
use interview_ai::workflows::interview::InterviewService;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
    let evaluator = Arc::new(HttpAnswerEvaluator::new(
        http.clone(),
        config.scoring.evaluator_url.clone(),
    ));
    let design_scorer = Arc::new(HttpDesignScorer::new(
        http.clone(),
        config.scoring.design_scorer_url.clone(),
    ));
    let judge = Arc::new(Judge0Client::new(http, &config.scoring));
    let interview_service = Arc::new(InterviewService::new(
        evaluator,
        design_scorer,
        judge,
        Arc::new(NullSpeechCapture),
    ));

    let app = with_interview_routes(interview_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "mock interview trainer ready");

    axum::serve(listener, app).await?;
    Ok(())
}
