use std::collections::BTreeMap;

use super::domain::{Role, RoundKind, RoundResult};

/// In-memory record of every round completed in this process lifetime.
///
/// The store is mutated through exactly two operations, both total over
/// their typed inputs; nothing here persists across restarts.
#[derive(Debug, Default, Clone)]
pub struct InterviewSession {
    results: BTreeMap<Role, BTreeMap<RoundKind, RoundResult>>,
}

impl InterviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the result for a role and round. Other rounds
    /// for the role are never touched.
    pub fn complete_round(&mut self, role: Role, round: RoundKind, result: RoundResult) {
        self.results.entry(role).or_default().insert(round, result);
    }

    /// Removes all stored results for the role, leaving other roles intact.
    pub fn reset_role(&mut self, role: Role) {
        self.results.remove(&role);
    }

    pub fn rounds_for(&self, role: Role) -> Option<&BTreeMap<RoundKind, RoundResult>> {
        self.results.get(&role)
    }

    pub fn result(&self, role: Role, round: RoundKind) -> Option<&RoundResult> {
        self.results.get(&role).and_then(|rounds| rounds.get(&round))
    }

    pub fn completed_count(&self, role: Role) -> usize {
        self.results.get(&role).map_or(0, BTreeMap::len)
    }

    pub fn has_completed_any(&self, role: Role) -> bool {
        self.completed_count(role) > 0
    }

    /// Mean score over the rounds actually completed for the role; a role
    /// with a single 90% round reads as 90%, not 22.5%. `None` when nothing
    /// has been completed.
    pub fn overall_score(&self, role: Role) -> Option<f64> {
        let rounds = self.results.get(&role)?;
        if rounds.is_empty() {
            return None;
        }
        let total: f64 = rounds.values().map(|result| result.score).sum();
        Some(total / rounds.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: f64) -> RoundResult {
        RoundResult {
            score,
            strengths: vec!["strength".to_string()],
            improvements: vec!["improvement".to_string()],
            feedback: "feedback".to_string(),
            passed_tests: None,
            total_tests: None,
        }
    }

    #[test]
    fn role_entry_appears_only_after_first_completion() {
        let mut session = InterviewSession::new();
        assert!(session.rounds_for(Role::Ai).is_none());

        session.complete_round(Role::Ai, RoundKind::Behavioral, result(75.0));
        assert_eq!(session.completed_count(Role::Ai), 1);
    }

    #[test]
    fn completing_a_round_twice_overwrites_without_touching_others() {
        let mut session = InterviewSession::new();
        session.complete_round(Role::Ai, RoundKind::Behavioral, result(60.0));
        session.complete_round(Role::Ai, RoundKind::Technical, result(80.0));
        session.complete_round(Role::Ai, RoundKind::Behavioral, result(90.0));

        assert_eq!(session.completed_count(Role::Ai), 2);
        assert_eq!(
            session.result(Role::Ai, RoundKind::Behavioral).map(|r| r.score),
            Some(90.0)
        );
        assert_eq!(
            session.result(Role::Ai, RoundKind::Technical).map(|r| r.score),
            Some(80.0)
        );
    }

    #[test]
    fn overall_score_averages_only_completed_rounds() {
        let mut session = InterviewSession::new();
        session.complete_round(Role::Security, RoundKind::Behavioral, result(90.0));
        session.complete_round(Role::Security, RoundKind::Coding, result(50.0));

        // (90 + 50) / 2, not (90 + 0 + 50 + 0) / 4.
        assert_eq!(session.overall_score(Role::Security), Some(70.0));
        assert_eq!(session.overall_score(Role::Devops), None);
    }

    #[test]
    fn reset_clears_one_role_only() {
        let mut session = InterviewSession::new();
        session.complete_round(Role::Ai, RoundKind::Behavioral, result(70.0));
        session.complete_round(Role::Fullstack, RoundKind::Behavioral, result(65.0));

        session.reset_role(Role::Ai);
        assert!(session.rounds_for(Role::Ai).is_none());
        assert_eq!(session.completed_count(Role::Fullstack), 1);
    }

    #[test]
    fn reset_then_complete_leaves_exactly_one_round() {
        let mut session = InterviewSession::new();
        session.complete_round(Role::Ai, RoundKind::Behavioral, result(70.0));
        session.complete_round(Role::Ai, RoundKind::Coding, result(40.0));

        session.reset_role(Role::Ai);
        session.complete_round(Role::Ai, RoundKind::Behavioral, result(88.0));

        let rounds = session.rounds_for(Role::Ai).expect("role present");
        assert_eq!(rounds.len(), 1);
        assert_eq!(rounds[&RoundKind::Behavioral].score, 88.0);
    }
}
