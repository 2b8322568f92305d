use chrono::{DateTime, Utc};
use tracing::debug;

use super::speech::{Dictation, SpeechCapture};
use super::{AnswerTimer, RoundError, SubmissionTrigger};
use crate::workflows::interview::clients::{AnswerEvaluator, EvaluationRequest};
use crate::workflows::interview::domain::{Question, RoundResult};
use crate::workflows::interview::feedback::{map_to_feedback, FeedbackStyle};

/// Minimum trimmed length for a manually submitted answer.
pub const MIN_ANSWER_CHARS: usize = 10;

const MAX_SCORE_PER_QUESTION: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QaPhase {
    AwaitingStart,
    Answering,
    Submitting,
    Complete,
}

/// How the final percentage is rounded. The behavioral round reports a
/// whole number; the technical round keeps one decimal place.
#[derive(Debug, Clone, Copy)]
enum PercentRounding {
    NearestInteger,
    OneDecimal,
}

/// Outcome of one answer submission.
#[derive(Debug)]
pub enum QaProgress {
    NextQuestion { index: usize, total: usize },
    Complete(RoundResult),
}

/// Free-text question/answer round. The behavioral and technical rounds
/// share this machine and differ only in question cap, feedback style, and
/// percentage rounding.
pub struct QaRound {
    questions: Vec<Question>,
    current: usize,
    answer: String,
    scores: Vec<f64>,
    phase: QaPhase,
    timer: Option<AnswerTimer>,
    dictation: Dictation,
    style: FeedbackStyle,
    rounding: PercentRounding,
}

impl QaRound {
    pub fn behavioral(mut questions: Vec<Question>) -> Self {
        questions.truncate(5);
        Self::new(questions, FeedbackStyle::Behavioral, PercentRounding::NearestInteger)
    }

    pub fn technical(mut questions: Vec<Question>) -> Self {
        questions.truncate(8);
        Self::new(questions, FeedbackStyle::Technical, PercentRounding::OneDecimal)
    }

    fn new(questions: Vec<Question>, style: FeedbackStyle, rounding: PercentRounding) -> Self {
        Self {
            questions,
            current: 0,
            answer: String::new(),
            scores: Vec::new(),
            phase: QaPhase::AwaitingStart,
            timer: None,
            dictation: Dictation::default(),
            style,
            rounding,
        }
    }

    pub fn phase(&self) -> QaPhase {
        self.phase
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            QaPhase::Answering | QaPhase::Submitting => self.questions.get(self.current),
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.timer.map(|t| t.deadline)
    }

    pub fn timer_expired(&self, now: DateTime<Utc>) -> bool {
        self.timer.is_some_and(|t| t.expired(now))
    }

    /// Moves to the first question and starts its timer.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<&Question, RoundError> {
        match self.phase {
            QaPhase::AwaitingStart => {}
            QaPhase::Complete => return Err(RoundError::AlreadyComplete),
            _ => return Err(RoundError::SubmissionInFlight),
        }
        self.phase = QaPhase::Answering;
        self.timer = Some(AnswerTimer::start(now));
        Ok(&self.questions[self.current])
    }

    pub fn set_answer(&mut self, text: impl Into<String>) -> Result<(), RoundError> {
        self.ensure_answering()?;
        self.answer = text.into();
        Ok(())
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn toggle_dictation(&mut self, capture: &dyn SpeechCapture) -> Result<bool, RoundError> {
        self.ensure_answering()?;
        Ok(self.dictation.toggle(capture))
    }

    pub fn push_transcript(&mut self, segment: &str) {
        let mut answer = std::mem::take(&mut self.answer);
        self.dictation.append_transcript(&mut answer, segment);
        self.answer = answer;
    }

    /// Scores the current answer and advances the round. Timer expiry
    /// bypasses the minimum-length check; a scoring failure returns the
    /// round to `Answering` so the candidate can retry.
    pub async fn submit(
        &mut self,
        evaluator: &dyn AnswerEvaluator,
        capture: &dyn SpeechCapture,
        trigger: SubmissionTrigger,
        now: DateTime<Utc>,
    ) -> Result<QaProgress, RoundError> {
        self.ensure_answering()?;
        if trigger == SubmissionTrigger::Manual
            && self.answer.trim().chars().count() < MIN_ANSWER_CHARS
        {
            return Err(RoundError::AnswerTooShort {
                minimum: MIN_ANSWER_CHARS,
            });
        }

        self.dictation.end(capture);
        self.phase = QaPhase::Submitting;

        let question = &self.questions[self.current];
        let request = EvaluationRequest {
            user_answer: self.answer.clone(),
            ideal_answer: question.ideal_answer.clone(),
            keywords: question.keywords.clone(),
        };
        let score = match evaluator.evaluate(request).await {
            Ok(score) => score.clamp(0.0, MAX_SCORE_PER_QUESTION),
            Err(err) => {
                self.phase = QaPhase::Answering;
                return Err(RoundError::Client(err));
            }
        };

        debug!(index = self.current, score, "question scored");
        self.scores.push(score);
        self.answer.clear();

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.timer = Some(AnswerTimer::start(now));
            self.phase = QaPhase::Answering;
            Ok(QaProgress::NextQuestion {
                index: self.current,
                total: self.questions.len(),
            })
        } else {
            self.phase = QaPhase::Complete;
            self.timer = None;
            Ok(QaProgress::Complete(self.build_result()))
        }
    }

    fn ensure_answering(&self) -> Result<(), RoundError> {
        match self.phase {
            QaPhase::Answering => Ok(()),
            QaPhase::AwaitingStart => Err(RoundError::NotStarted),
            QaPhase::Submitting => Err(RoundError::SubmissionInFlight),
            QaPhase::Complete => Err(RoundError::AlreadyComplete),
        }
    }

    fn build_result(&self) -> RoundResult {
        let total: f64 = self.scores.iter().sum();
        let possible = MAX_SCORE_PER_QUESTION * self.scores.len() as f64;
        let raw = if possible > 0.0 {
            total / possible * 100.0
        } else {
            0.0
        };
        let percent = match self.rounding {
            PercentRounding::NearestInteger => raw.round(),
            PercentRounding::OneDecimal => (raw * 10.0).round() / 10.0,
        };

        let feedback = map_to_feedback(self.style, percent);
        RoundResult {
            score: percent,
            strengths: feedback.strengths,
            improvements: feedback.improvements,
            feedback: feedback.feedback,
            passed_tests: None,
            total_tests: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::interview::clients::ClientError;
    use crate::workflows::interview::rounds::NullSpeechCapture;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use std::sync::Mutex;

    struct ScriptedEvaluator {
        scores: Mutex<Vec<Result<f64, ClientError>>>,
    }

    impl ScriptedEvaluator {
        fn new(scores: Vec<Result<f64, ClientError>>) -> Self {
            Self {
                scores: Mutex::new(scores),
            }
        }
    }

    #[async_trait]
    impl AnswerEvaluator for ScriptedEvaluator {
        async fn evaluate(&self, _request: EvaluationRequest) -> Result<f64, ClientError> {
            self.scores.lock().unwrap().remove(0)
        }
    }

    fn questions(count: usize) -> Vec<Question> {
        (0..count)
            .map(|i| Question {
                prompt: format!("question {i}"),
                ideal_answer: "reference".to_string(),
                keywords: vec!["keyword".to_string()],
            })
            .collect()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn short_manual_answer_is_rejected_before_any_network_call() {
        let mut round = QaRound::behavioral(questions(2));
        round.start(now()).unwrap();
        round.set_answer("too short").unwrap();

        let evaluator = ScriptedEvaluator::new(Vec::new());
        let err = round
            .submit(
                &evaluator,
                &NullSpeechCapture,
                SubmissionTrigger::Manual,
                now(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RoundError::AnswerTooShort { minimum: 10 }));
        assert_eq!(round.phase(), QaPhase::Answering);
    }

    #[tokio::test]
    async fn timer_expiry_submits_a_short_answer() {
        let mut round = QaRound::behavioral(questions(1));
        round.start(now()).unwrap();
        round.set_answer("brief").unwrap();

        let evaluator = ScriptedEvaluator::new(vec![Ok(2.0)]);
        let progress = round
            .submit(
                &evaluator,
                &NullSpeechCapture,
                SubmissionTrigger::TimerExpiry,
                now() + Duration::seconds(300),
            )
            .await
            .unwrap();
        assert!(matches!(progress, QaProgress::Complete(_)));
    }

    #[tokio::test]
    async fn technical_percentage_keeps_one_decimal() {
        let mut round = QaRound::technical(questions(4));
        round.start(now()).unwrap();

        let evaluator =
            ScriptedEvaluator::new(vec![Ok(5.0), Ok(5.0), Ok(4.0), Ok(3.0)]);
        let mut last = None;
        for _ in 0..4 {
            round.set_answer("a sufficiently long answer").unwrap();
            last = Some(
                round
                    .submit(
                        &evaluator,
                        &NullSpeechCapture,
                        SubmissionTrigger::Manual,
                        now(),
                    )
                    .await
                    .unwrap(),
            );
        }

        match last {
            Some(QaProgress::Complete(result)) => {
                // (5 + 5 + 4 + 3) / 20 = 85.0
                assert_eq!(result.score, 85.0);
                let tier = crate::workflows::interview::feedback::map_to_feedback(
                    crate::workflows::interview::feedback::FeedbackStyle::Technical,
                    85.0,
                );
                assert_eq!(result.feedback, tier.feedback);
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn scores_outside_range_are_clamped() {
        let mut round = QaRound::behavioral(questions(1));
        round.start(now()).unwrap();
        round.set_answer("a sufficiently long answer").unwrap();

        let evaluator = ScriptedEvaluator::new(vec![Ok(11.0)]);
        let progress = round
            .submit(
                &evaluator,
                &NullSpeechCapture,
                SubmissionTrigger::Manual,
                now(),
            )
            .await
            .unwrap();
        match progress {
            QaProgress::Complete(result) => assert_eq!(result.score, 100.0),
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn evaluator_failure_leaves_the_round_retryable() {
        let mut round = QaRound::technical(questions(2));
        round.start(now()).unwrap();
        round.set_answer("a sufficiently long answer").unwrap();

        let evaluator =
            ScriptedEvaluator::new(vec![Err(ClientError::Status(503)), Ok(4.0)]);
        let err = round
            .submit(
                &evaluator,
                &NullSpeechCapture,
                SubmissionTrigger::Manual,
                now(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RoundError::Client(ClientError::Status(503))));
        assert_eq!(round.phase(), QaPhase::Answering);
        assert_eq!(round.answer(), "a sufficiently long answer");

        let progress = round
            .submit(
                &evaluator,
                &NullSpeechCapture,
                SubmissionTrigger::Manual,
                now(),
            )
            .await
            .unwrap();
        assert!(matches!(
            progress,
            QaProgress::NextQuestion { index: 1, total: 2 }
        ));
    }

    #[tokio::test]
    async fn answer_buffer_clears_between_questions() {
        let mut round = QaRound::behavioral(questions(2));
        round.start(now()).unwrap();
        round.set_answer("the first long answer").unwrap();

        let evaluator = ScriptedEvaluator::new(vec![Ok(3.0)]);
        round
            .submit(
                &evaluator,
                &NullSpeechCapture,
                SubmissionTrigger::Manual,
                now(),
            )
            .await
            .unwrap();
        assert_eq!(round.answer(), "");
        assert_eq!(round.current_index(), 1);
    }

    #[test]
    fn behavioral_caps_at_five_questions() {
        let round = QaRound::behavioral(questions(9));
        assert_eq!(round.question_count(), 5);
        let round = QaRound::technical(questions(9));
        assert_eq!(round.question_count(), 8);
    }
}
