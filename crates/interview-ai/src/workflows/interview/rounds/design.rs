use rand::seq::SliceRandom;
use tracing::debug;

use super::speech::{Dictation, SpeechCapture};
use super::RoundError;
use crate::workflows::interview::clients::{ClientError, DesignScorer};
use crate::workflows::interview::domain::{Question, RoundResult};

/// Minimum trimmed length for a system-design answer. A design answer is
/// expected to be an essay, not a sentence.
pub const MIN_DESIGN_ANSWER_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DesignPhase {
    Answering,
    Submitting,
    Complete,
}

/// System-design round: one randomly drawn question, answered long-form and
/// scored remotely. The scorer's verdict is stored as-is.
pub struct SystemDesignRound {
    question: Question,
    answer: String,
    dictation: Dictation,
    phase: DesignPhase,
}

impl SystemDesignRound {
    /// Draws one question from the pool at random.
    pub fn new(questions: Vec<Question>) -> Result<Self, RoundError> {
        let question = questions
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(RoundError::NoProblems)?;
        Ok(Self::with_question(question))
    }

    /// Builds the round around a fixed question, bypassing the random draw.
    pub fn with_question(question: Question) -> Self {
        Self {
            question,
            answer: String::new(),
            dictation: Dictation::default(),
            phase: DesignPhase::Answering,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn set_answer(&mut self, text: impl Into<String>) -> Result<(), RoundError> {
        self.ensure_answering()?;
        self.answer = text.into();
        Ok(())
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

    /// Sends the answer for scoring and completes the round with the first
    /// result element, forwarded unmodified.
    pub async fn submit(
        &mut self,
        scorer: &dyn DesignScorer,
        capture: &dyn SpeechCapture,
    ) -> Result<RoundResult, RoundError> {
        self.ensure_answering()?;
        if self.answer.trim().chars().count() < MIN_DESIGN_ANSWER_CHARS {
            return Err(RoundError::AnswerTooShort {
                minimum: MIN_DESIGN_ANSWER_CHARS,
            });
        }

        self.dictation.end(capture);
        self.phase = DesignPhase::Submitting;

        let outcome = scorer
            .score(
                vec![self.question.prompt.clone()],
                vec![self.answer.clone()],
            )
            .await;
        let result = match outcome {
            Ok(mut results) if !results.is_empty() => results.remove(0),
            Ok(_) => {
                self.phase = DesignPhase::Answering;
                return Err(RoundError::Client(ClientError::MalformedResponse(
                    "empty result set".to_string(),
                )));
            }
            Err(err) => {
                self.phase = DesignPhase::Answering;
                return Err(RoundError::Client(err));
            }
        };

        debug!(score = result.score, "design answer scored");
        self.phase = DesignPhase::Complete;
        Ok(result)
    }

    fn ensure_answering(&self) -> Result<(), RoundError> {
        match self.phase {
            DesignPhase::Answering => Ok(()),
            DesignPhase::Submitting => Err(RoundError::SubmissionInFlight),
            DesignPhase::Complete => Err(RoundError::AlreadyComplete),
        }
    }
}
