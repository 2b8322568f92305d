//! Sandboxed code-run proxy backing the practice editor.
//!
//! Accepts a program and a list of JSON-encoded argument tuples, runs the
//! program once per tuple under the local Python interpreter, and returns
//! one output per tuple. Only Python is supported here; the interview
//! rounds go through the judging service instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::process::Command;
use tracing::{debug, warn};

#[derive(Debug, Clone, Deserialize)]
pub struct RunRequest {
    pub code: String,
    pub language: String,
    /// Each element is itself a JSON document, e.g. `"[2, 3]"`. The outer
    /// request is JSON and each argument tuple is JSON-encoded again so
    /// arbitrary values survive transport as plain strings.
    pub inputs: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
    pub output: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("input {index} is not valid JSON: {reason}")]
    InvalidInput { index: usize, reason: String },
    #[error("failed to launch interpreter: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("{0}")]
    Execution(String),
}

/// Driver appended below the user's program. The program must define
/// `main`; list arguments spread into parameters, anything else is passed
/// through as a single argument.
const DRIVER: &str = r#"
import json as _json
import sys as _sys

_args = _json.loads(_sys.argv[1])
if isinstance(_args, list):
    _result = main(*_args)
else:
    _result = main(_args)
if _result is not None:
    print(_json.dumps(_result) if isinstance(_result, (list, dict)) else _result)
"#;

pub fn build_harness(code: &str) -> String {
    let mut harness = String::with_capacity(code.len() + DRIVER.len() + 1);
    harness.push_str(code);
    harness.push('\n');
    harness.push_str(DRIVER);
    harness
}

fn validate(request: &RunRequest) -> Result<(), RunnerError> {
    if !request.language.eq_ignore_ascii_case("python") {
        return Err(RunnerError::UnsupportedLanguage(request.language.clone()));
    }
    for (index, input) in request.inputs.iter().enumerate() {
        if let Err(err) = serde_json::from_str::<Value>(input) {
            return Err(RunnerError::InvalidInput {
                index,
                reason: err.to_string(),
            });
        }
    }
    Ok(())
}

/// Runs the program once per argument tuple. The first failing execution
/// aborts the batch.
pub async fn run(request: &RunRequest) -> Result<Vec<RunOutput>, RunnerError> {
    validate(request)?;
    let harness = build_harness(&request.code);

    let mut outputs = Vec::with_capacity(request.inputs.len());
    for input in &request.inputs {
        let spawned = Command::new("python3")
            .arg("-c")
            .arg(&harness)
            .arg(input)
            .output()
            .await?;

        if spawned.status.success() {
            let stdout = String::from_utf8_lossy(&spawned.stdout);
            outputs.push(RunOutput {
                output: stdout.trim_end().to_string(),
            });
        } else {
            let stderr = String::from_utf8_lossy(&spawned.stderr);
            warn!(input, "practice run failed");
            return Err(RunnerError::Execution(stderr.trim().to_string()));
        }
    }

    debug!(count = outputs.len(), "practice run complete");
    Ok(outputs)
}

/// Router exposing the proxy at POST /run.
pub fn runner_router() -> Router {
    Router::new().route("/run", post(run_handler))
}

async fn run_handler(Json(request): Json<RunRequest>) -> Response {
    match run(&request).await {
        Ok(outputs) => (StatusCode::OK, Json(outputs)).into_response(),
        Err(error) => {
            let status = match &error {
                RunnerError::UnsupportedLanguage(_) | RunnerError::InvalidInput { .. } => {
                    StatusCode::BAD_REQUEST
                }
                RunnerError::Spawn(_) => StatusCode::INTERNAL_SERVER_ERROR,
                RunnerError::Execution(_) => StatusCode::OK,
            };
            let payload = serde_json::json!({ "error": error.to_string() });
            (status, Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(language: &str, inputs: &[&str]) -> RunRequest {
        RunRequest {
            code: "def main(a, b):\n    return a + b\n".to_string(),
            language: language.to_string(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn harness_keeps_user_code_above_the_driver() {
        let harness = build_harness("def main(x):\n    return x\n");
        let code_at = harness.find("def main").unwrap();
        let driver_at = harness.find("_json.loads(_sys.argv[1])").unwrap();
        assert!(code_at < driver_at);
    }

    #[test]
    fn only_python_is_accepted() {
        let err = validate(&request("javascript", &["[1, 2]"])).unwrap_err();
        assert!(matches!(err, RunnerError::UnsupportedLanguage(_)));
        assert!(validate(&request("Python", &["[1, 2]"])).is_ok());
    }

    #[test]
    fn argument_tuples_must_be_json() {
        let err = validate(&request("python", &["[1, 2]", "not json"])).unwrap_err();
        match err {
            RunnerError::InvalidInput { index, .. } => assert_eq!(index, 1),
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unsupported_language_short_circuits_before_spawning() {
        let err = run(&request("cobol", &["[1, 2]"])).await.unwrap_err();
        assert!(matches!(err, RunnerError::UnsupportedLanguage(_)));
    }
}
