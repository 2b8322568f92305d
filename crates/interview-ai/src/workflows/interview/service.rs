use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::clients::{AnswerEvaluator, CodeJudge, DesignScorer};
use super::domain::{CodingProblem, Role, RoundKind, RoundResult};
use super::orchestrator::{after_completion, resolve_round, resolve_summary, Navigation};
use super::questions::QuestionBank;
use super::report::{build_report, build_summary, InterviewSummary, ReportDocument};
use super::rounds::{
    CodingProgress, CodingRound, QaProgress, QaRound, RoundError, SpeechCapture,
    SubmissionTrigger, SystemDesignRound, TestCaseOutcome, QUESTION_TIME_LIMIT_SECS,
};
use super::session::InterviewSession;

/// What the client should render for an in-progress round.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundView {
    Qa {
        question: String,
        index: usize,
        total: usize,
        deadline: DateTime<Utc>,
        time_limit_secs: i64,
    },
    Coding {
        problem: CodingProblem,
        language: String,
        code: String,
        index: usize,
        total: usize,
    },
    Design {
        question: String,
        minimum_chars: usize,
    },
}

/// Snapshot of an active round handed back by `start_round`.
#[derive(Debug, Clone, Serialize)]
pub struct RoundSnapshot {
    pub role: Role,
    pub round: u8,
    pub view: RoundView,
}

/// Starting a round either yields its content or redirects the client.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StartOutcome {
    Redirect { navigation: Navigation },
    Round(RoundSnapshot),
}

/// Result of submitting an answer or a coding problem.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Redirect {
        navigation: Navigation,
    },
    NextQuestion {
        view: RoundView,
    },
    RoundComplete {
        result: RoundResult,
        navigation: Navigation,
    },
}

/// Error raised by the interview service.
#[derive(Debug, thiserror::Error)]
pub enum InterviewServiceError {
    #[error("the requested round has not been started")]
    RoundNotStarted,
    #[error("another operation on this round is in flight")]
    Busy,
    #[error("operation does not apply to this round")]
    WrongRound,
    #[error(transparent)]
    Round(#[from] RoundError),
}

enum ActiveRound {
    Qa(QaRound),
    Coding(CodingRound),
    Design(SystemDesignRound),
}

/// A slot is parked as `Busy` while its round is out of the registry for an
/// awaited scoring call, so concurrent requests cannot double-submit.
enum Slot {
    Ready(ActiveRound),
    Busy,
}

/// Service composing the question bank, the per-role session store, and the
/// external scoring collaborators.
pub struct InterviewService<E, D, J> {
    questions: QuestionBank,
    evaluator: Arc<E>,
    design_scorer: Arc<D>,
    judge: Arc<J>,
    speech: Arc<dyn SpeechCapture>,
    session: Mutex<InterviewSession>,
    active: Mutex<HashMap<(Role, RoundKind), Slot>>,
}

impl<E, D, J> InterviewService<E, D, J>
where
    E: AnswerEvaluator + 'static,
    D: DesignScorer + 'static,
    J: CodeJudge + 'static,
{
    pub fn new(
        evaluator: Arc<E>,
        design_scorer: Arc<D>,
        judge: Arc<J>,
        speech: Arc<dyn SpeechCapture>,
    ) -> Self {
        Self {
            questions: QuestionBank::standard(),
            evaluator,
            design_scorer,
            judge,
            speech,
            session: Mutex::new(InterviewSession::new()),
            active: Mutex::new(HashMap::new()),
        }
    }

    pub fn roles(&self) -> Vec<RoleView> {
        Role::ordered()
            .into_iter()
            .map(|role| RoleView {
                id: role.id(),
                title: role.title(),
                track: role.track(),
            })
            .collect()
    }

    /// Starts (or resumes) the given round. Navigation faults resolve to a
    /// redirect payload rather than an error.
    pub fn start_round(
        &self,
        role_raw: &str,
        round_number: u8,
        now: DateTime<Utc>,
    ) -> Result<StartOutcome, InterviewServiceError> {
        let (role, round) = match resolve_round(role_raw, round_number) {
            Navigation::Round { role, round } if round == round_number => {
                (role, RoundKind::from_number(round).ok_or(InterviewServiceError::WrongRound)?)
            }
            navigation => return Ok(StartOutcome::Redirect { navigation }),
        };

        let mut active = self.lock_active();
        if let Some(Slot::Busy) = active.get(&(role, round)) {
            return Err(InterviewServiceError::Busy);
        }
        if let Some(Slot::Ready(existing)) = active.get(&(role, round)) {
            // Resume in place rather than discarding progress.
            if let Some(view) = self.snapshot(existing, now) {
                return Ok(StartOutcome::Round(RoundSnapshot {
                    role,
                    round: round.number(),
                    view,
                }));
            }
        }

        let fresh = self.build_round(role, round, now)?;
        let view = self
            .snapshot(&fresh, now)
            .ok_or(InterviewServiceError::RoundNotStarted)?;
        active.insert((role, round), Slot::Ready(fresh));
        info!(role = role.id(), round = round.number(), "round started");

        Ok(StartOutcome::Round(RoundSnapshot {
            role,
            round: round.number(),
            view,
        }))
    }

    /// Submits a free-text answer for the behavioral, technical, or
    /// system-design round.
    pub async fn submit_answer(
        &self,
        role_raw: &str,
        round_number: u8,
        answer: String,
        trigger: SubmissionTrigger,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, InterviewServiceError> {
        let (role, round) = match self.resolve(role_raw, round_number) {
            Ok(pair) => pair,
            Err(navigation) => return Ok(SubmitOutcome::Redirect { navigation }),
        };

        let taken = self.take_round(role, round)?;
        match taken {
            ActiveRound::Qa(mut qa) => {
                // Expiry observed server-side upgrades the trigger so the
                // minimum-length check is bypassed consistently.
                let trigger = if qa.timer_expired(now) {
                    SubmissionTrigger::TimerExpiry
                } else {
                    trigger
                };
                let set = qa.set_answer(answer);
                if let Err(err) = set {
                    self.restore(role, round, ActiveRound::Qa(qa));
                    return Err(err.into());
                }

                let outcome = qa
                    .submit(self.evaluator.as_ref(), self.speech.as_ref(), trigger, now)
                    .await;
                match outcome {
                    Ok(QaProgress::NextQuestion { .. }) => {
                        debug!(
                            role = role.id(),
                            round = round.number(),
                            "advanced to next question"
                        );
                        let taken = ActiveRound::Qa(qa);
                        let view = self.snapshot(&taken, now);
                        self.restore(role, round, taken);
                        match view {
                            Some(view) => Ok(SubmitOutcome::NextQuestion { view }),
                            None => Err(InterviewServiceError::RoundNotStarted),
                        }
                    }
                    Ok(QaProgress::Complete(result)) => {
                        self.clear_slot(role, round);
                        Ok(self.complete(role, round, result))
                    }
                    Err(err) => {
                        self.restore(role, round, ActiveRound::Qa(qa));
                        Err(err.into())
                    }
                }
            }
            ActiveRound::Design(mut design) => {
                let set = design.set_answer(answer);
                if let Err(err) = set {
                    self.restore(role, round, ActiveRound::Design(design));
                    return Err(err.into());
                }

                let outcome = design
                    .submit(self.design_scorer.as_ref(), self.speech.as_ref())
                    .await;
                match outcome {
                    Ok(result) => {
                        self.clear_slot(role, round);
                        Ok(self.complete(role, round, result))
                    }
                    Err(err) => {
                        self.restore(role, round, ActiveRound::Design(design));
                        Err(err.into())
                    }
                }
            }
            other => {
                self.restore(role, round, other);
                Err(InterviewServiceError::WrongRound)
            }
        }
    }

    /// Runs the coding buffer against the current problem's test cases.
    pub async fn run_code(
        &self,
        role_raw: &str,
        round_number: u8,
        code: String,
        language: Option<String>,
    ) -> Result<Vec<TestCaseOutcome>, InterviewServiceError> {
        let (role, round) = self
            .resolve(role_raw, round_number)
            .map_err(|_| InterviewServiceError::WrongRound)?;

        let taken = self.take_round(role, round)?;
        let ActiveRound::Coding(mut coding) = taken else {
            self.restore(role, round, taken);
            return Err(InterviewServiceError::WrongRound);
        };

        if let Some(raw) = language {
            if raw != coding.language().name() {
                if let Err(err) = coding.select_language(&raw) {
                    self.restore(role, round, ActiveRound::Coding(coding));
                    return Err(err.into());
                }
            }
        }
        if let Err(err) = coding.set_code(code) {
            self.restore(role, round, ActiveRound::Coding(coding));
            return Err(err.into());
        }

        let run = coding.run(self.judge.as_ref()).await;
        match run {
            Ok(results) => {
                let results = results.to_vec();
                self.restore(role, round, ActiveRound::Coding(coding));
                Ok(results)
            }
            Err(err) => {
                self.restore(role, round, ActiveRound::Coding(coding));
                Err(err.into())
            }
        }
    }

    /// Locks in the latest run for the current coding problem.
    pub fn submit_code(
        &self,
        role_raw: &str,
        round_number: u8,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, InterviewServiceError> {
        let (role, round) = self
            .resolve(role_raw, round_number)
            .map_err(|_| InterviewServiceError::WrongRound)?;

        let taken = self.take_round(role, round)?;
        let ActiveRound::Coding(mut coding) = taken else {
            self.restore(role, round, taken);
            return Err(InterviewServiceError::WrongRound);
        };

        match coding.submit() {
            Ok(CodingProgress::NextProblem { .. }) => {
                let taken = ActiveRound::Coding(coding);
                let view = self.snapshot(&taken, now);
                self.restore(role, round, taken);
                match view {
                    Some(view) => Ok(SubmitOutcome::NextQuestion { view }),
                    None => Err(InterviewServiceError::RoundNotStarted),
                }
            }
            Ok(CodingProgress::Complete(result)) => {
                self.clear_slot(role, round);
                Ok(self.complete(role, round, result))
            }
            Err(err) => {
                self.restore(role, round, ActiveRound::Coding(coding));
                Err(err.into())
            }
        }
    }

    /// Summary for a role, or a redirect when nothing is completed yet.
    pub fn summary(&self, role_raw: &str) -> SummaryOutcome {
        let session = self.lock_session();
        match resolve_summary(&session, role_raw) {
            Navigation::Summary { role } => SummaryOutcome::Summary(build_summary(&session, role)),
            navigation => SummaryOutcome::Redirect { navigation },
        }
    }

    /// Printable report for a role with at least one completed round.
    pub fn report(&self, role_raw: &str) -> Result<ReportDocument, Navigation> {
        let session = self.lock_session();
        match resolve_summary(&session, role_raw) {
            Navigation::Summary { role } => Ok(build_report(&session, role)),
            navigation => Err(navigation),
        }
    }

    /// Drops all stored results and any active round for the role.
    pub fn reset(&self, role_raw: &str) -> Navigation {
        let Some(role) = Role::parse(role_raw) else {
            return Navigation::RoleSelection;
        };

        self.lock_session().reset_role(role);
        let mut active = self.lock_active();
        for round in RoundKind::ordered() {
            active.remove(&(role, round));
        }
        info!(role = role.id(), "interview reset");

        Navigation::Round { role, round: 1 }
    }

    fn resolve(&self, role_raw: &str, round_number: u8) -> Result<(Role, RoundKind), Navigation> {
        match resolve_round(role_raw, round_number) {
            Navigation::Round { role, round } if round == round_number => {
                match RoundKind::from_number(round) {
                    Some(kind) => Ok((role, kind)),
                    None => Err(Navigation::Round { role, round: 1 }),
                }
            }
            navigation => Err(navigation),
        }
    }

    fn build_round(
        &self,
        role: Role,
        round: RoundKind,
        now: DateTime<Utc>,
    ) -> Result<ActiveRound, InterviewServiceError> {
        Ok(match round {
            RoundKind::Behavioral => {
                let mut qa = QaRound::behavioral(self.questions.questions(role, round));
                qa.start(now)?;
                ActiveRound::Qa(qa)
            }
            RoundKind::Technical => {
                let mut qa = QaRound::technical(self.questions.questions(role, round));
                qa.start(now)?;
                ActiveRound::Qa(qa)
            }
            RoundKind::Coding => {
                ActiveRound::Coding(CodingRound::new(self.questions.coding_problems(role))?)
            }
            RoundKind::SystemDesign => ActiveRound::Design(SystemDesignRound::new(
                self.questions.questions(role, round),
            )?),
        })
    }

    fn snapshot(&self, round: &ActiveRound, _now: DateTime<Utc>) -> Option<RoundView> {
        match round {
            ActiveRound::Qa(qa) => {
                let question = qa.current_question()?;
                Some(RoundView::Qa {
                    question: question.prompt.clone(),
                    index: qa.current_index(),
                    total: qa.question_count(),
                    deadline: qa.deadline()?,
                    time_limit_secs: QUESTION_TIME_LIMIT_SECS,
                })
            }
            ActiveRound::Coding(coding) => Some(RoundView::Coding {
                problem: coding.current_problem().clone(),
                language: coding.language().name().to_string(),
                code: coding.code().to_string(),
                index: coding.current_index(),
                total: coding.problem_count(),
            }),
            ActiveRound::Design(design) => Some(RoundView::Design {
                question: design.question().prompt.clone(),
                minimum_chars: super::rounds::design::MIN_DESIGN_ANSWER_CHARS,
            }),
        }
    }

    fn complete(&self, role: Role, round: RoundKind, result: RoundResult) -> SubmitOutcome {
        self.lock_session().complete_round(role, round, result.clone());
        info!(
            role = role.id(),
            round = round.number(),
            score = result.score,
            "round completed"
        );
        SubmitOutcome::RoundComplete {
            result,
            navigation: after_completion(role, round),
        }
    }

    fn take_round(&self, role: Role, round: RoundKind) -> Result<ActiveRound, InterviewServiceError> {
        let mut active = self.lock_active();
        match active.remove(&(role, round)) {
            Some(Slot::Ready(state)) => {
                active.insert((role, round), Slot::Busy);
                Ok(state)
            }
            Some(Slot::Busy) => {
                active.insert((role, round), Slot::Busy);
                Err(InterviewServiceError::Busy)
            }
            None => Err(InterviewServiceError::RoundNotStarted),
        }
    }

    fn restore(&self, role: Role, round: RoundKind, state: ActiveRound) {
        self.lock_active().insert((role, round), Slot::Ready(state));
    }

    fn clear_slot(&self, role: Role, round: RoundKind) {
        self.lock_active().remove(&(role, round));
    }

    fn lock_session(&self) -> MutexGuard<'_, InterviewSession> {
        match self.session.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn lock_active(&self) -> MutexGuard<'_, HashMap<(Role, RoundKind), Slot>> {
        match self.active.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// One selectable role, as listed on the role-selection screen.
#[derive(Debug, Clone, Serialize)]
pub struct RoleView {
    pub id: &'static str,
    pub title: &'static str,
    pub track: &'static str,
}

/// Summary request outcome.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SummaryOutcome {
    Redirect { navigation: Navigation },
    Summary(InterviewSummary),
}
