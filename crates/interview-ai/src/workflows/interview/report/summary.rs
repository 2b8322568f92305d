use serde::Serialize;

use crate::workflows::interview::domain::{score_label, Role, RoundKind, RoundResult};
use crate::workflows::interview::session::InterviewSession;

/// Per-round line on the summary screen. Rounds the candidate skipped are
/// listed as incomplete rather than omitted.
#[derive(Debug, Clone, Serialize)]
pub struct RoundStatusEntry {
    pub round: u8,
    pub label: &'static str,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RoundResult>,
}

/// Summary screen payload: the overall average plus the status of each of
/// the four rounds. The average covers completed rounds only.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewSummary {
    pub role: Role,
    pub role_title: &'static str,
    pub completed_rounds: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_label: Option<&'static str>,
    pub rounds: Vec<RoundStatusEntry>,
}

pub fn build_summary(session: &InterviewSession, role: Role) -> InterviewSummary {
    let rounds = RoundKind::ordered()
        .into_iter()
        .map(|kind| {
            let result = session.result(role, kind).cloned();
            RoundStatusEntry {
                round: kind.number(),
                label: kind.label(),
                completed: result.is_some(),
                result,
            }
        })
        .collect::<Vec<_>>();

    let overall_score = session.overall_score(role);
    InterviewSummary {
        role,
        role_title: role.title(),
        completed_rounds: session.completed_count(role),
        overall_score,
        overall_label: overall_score.map(score_label),
        rounds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: f64) -> RoundResult {
        RoundResult {
            score,
            strengths: vec!["Strong fundamentals".to_string()],
            improvements: vec!["Go deeper on tradeoffs".to_string()],
            feedback: "Good showing.".to_string(),
            passed_tests: None,
            total_tests: None,
        }
    }

    #[test]
    fn summary_averages_completed_rounds_only() {
        let mut session = InterviewSession::new();
        session.complete_round(Role::Ai, RoundKind::Behavioral, result(90.0));
        session.complete_round(Role::Ai, RoundKind::Coding, result(50.0));

        let summary = build_summary(&session, Role::Ai);
        assert_eq!(summary.completed_rounds, 2);
        assert_eq!(summary.overall_score, Some(70.0));
        assert_eq!(summary.overall_label, Some("Good"));
        assert_eq!(summary.rounds.len(), 4);
        assert!(summary.rounds[0].completed);
        assert!(!summary.rounds[1].completed);
        assert!(summary.rounds[2].completed);
        assert!(!summary.rounds[3].completed);
    }

    #[test]
    fn empty_session_yields_no_overall_score() {
        let summary = build_summary(&InterviewSession::new(), Role::Devops);
        assert_eq!(summary.completed_rounds, 0);
        assert_eq!(summary.overall_score, None);
        assert_eq!(summary.overall_label, None);
    }
}
