//! Round executors: one state machine per round kind, advanced by
//! result-returning operations. Completion hands the caller a typed
//! [`RoundResult`](super::domain::RoundResult) instead of firing a callback.

pub mod coding;
pub mod design;
pub mod qa;
pub mod speech;

pub use coding::{CodingProgress, CodingRound, TestCaseOutcome};
pub use design::SystemDesignRound;
pub use qa::{QaPhase, QaProgress, QaRound};
pub use speech::{NullSpeechCapture, SpeechCapture};

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use super::clients::ClientError;

/// Seconds a candidate gets per free-text question.
pub const QUESTION_TIME_LIMIT_SECS: i64 = 300;

/// What caused a submission. Timer expiry bypasses the minimum-length
/// check; a manual submit never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionTrigger {
    Manual,
    TimerExpiry,
}

/// Countdown for the current question. The clock is injected as `now` so
/// the state machines stay deterministic under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerTimer {
    pub started_at: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
}

impl AnswerTimer {
    pub fn start(now: DateTime<Utc>) -> Self {
        Self {
            started_at: now,
            deadline: now + Duration::seconds(QUESTION_TIME_LIMIT_SECS),
        }
    }

    pub fn expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.deadline
    }

    pub fn remaining_secs(&self, now: DateTime<Utc>) -> i64 {
        (self.deadline - now).num_seconds().max(0)
    }
}

/// Error raised by a round executor. Validation failures stay local and
/// leave the round retryable; client failures reset the submitting flag.
#[derive(Debug, thiserror::Error)]
pub enum RoundError {
    #[error("the round has not been started")]
    NotStarted,
    #[error("the round is already complete")]
    AlreadyComplete,
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("answer must be at least {minimum} characters")]
    AnswerTooShort { minimum: usize },
    #[error("run the code against the test cases before submitting")]
    NoResultsYet,
    #[error("no questions available for this role")]
    NoProblems,
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error(transparent)]
    Client(#[from] ClientError),
}
