use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::RoundError;
use crate::workflows::interview::clients::{CodeJudge, JudgeLanguage, JudgeSubmission};
use crate::workflows::interview::domain::{CodingProblem, RoundResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodingPhase {
    Editing,
    Running,
    Complete,
}

/// Verdict for one test case, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCaseOutcome {
    pub input: String,
    pub expected: String,
    pub output: String,
    pub passed: bool,
}

/// Outcome of submitting the current problem.
#[derive(Debug)]
pub enum CodingProgress {
    NextProblem { index: usize, total: usize },
    Complete(RoundResult),
}

/// Coding round: two problems, each run against its declared test cases via
/// the judging service before submission locks the pass counts in.
pub struct CodingRound {
    problems: Vec<CodingProblem>,
    current: usize,
    language: JudgeLanguage,
    code: String,
    results: Vec<TestCaseOutcome>,
    total_passed: u32,
    total_cases: u32,
    phase: CodingPhase,
}

impl CodingRound {
    pub fn new(mut problems: Vec<CodingProblem>) -> Result<Self, RoundError> {
        problems.truncate(2);
        if problems.is_empty() {
            return Err(RoundError::NoProblems);
        }
        let language = default_language(&problems[0]);
        Ok(Self {
            code: language.boilerplate().to_string(),
            problems,
            current: 0,
            language,
            results: Vec::new(),
            total_passed: 0,
            total_cases: 0,
            phase: CodingPhase::Editing,
        })
    }

    pub fn current_problem(&self) -> &CodingProblem {
        &self.problems[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn problem_count(&self) -> usize {
        self.problems.len()
    }

    pub fn language(&self) -> JudgeLanguage {
        self.language
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn results(&self) -> &[TestCaseOutcome] {
        &self.results
    }

    pub fn set_code(&mut self, code: impl Into<String>) -> Result<(), RoundError> {
        self.ensure_editing()?;
        self.code = code.into();
        Ok(())
    }

    /// Switches the editor language. The buffer resets to the new language's
    /// starter snippet, discarding any edits.
    pub fn select_language(&mut self, raw: &str) -> Result<(), RoundError> {
        self.ensure_editing()?;
        let language = JudgeLanguage::parse(raw)
            .filter(|l| supports(self.current_problem(), *l))
            .ok_or_else(|| RoundError::UnsupportedLanguage(raw.to_string()))?;
        self.language = language;
        self.code = language.boilerplate().to_string();
        self.results.clear();
        Ok(())
    }

    /// Runs the buffer against every declared test case, sequentially. An
    /// execution failure marks that case failed rather than aborting the
    /// run, so one flaky call cannot wedge the round.
    pub async fn run(&mut self, judge: &dyn CodeJudge) -> Result<&[TestCaseOutcome], RoundError> {
        self.ensure_editing()?;
        self.phase = CodingPhase::Running;
        self.results.clear();

        let problem = self.problems[self.current].clone();
        for (input, expected) in problem.inputs.iter().zip(problem.expected_outputs.iter()) {
            let stdin = value_to_stdin(input);
            let expected_text = value_to_text(expected);
            let submission = JudgeSubmission {
                source_code: self.code.clone(),
                language: self.language,
                stdin,
            };

            let outcome = match judge.execute(submission).await {
                Ok(run) => TestCaseOutcome {
                    input: value_to_stdin(input),
                    expected: expected_text.clone(),
                    passed: run.accepted && run.output.trim() == expected_text.trim(),
                    output: run.output,
                },
                Err(err) => {
                    debug!(error = %err, "test case execution failed");
                    TestCaseOutcome {
                        input: value_to_stdin(input),
                        expected: expected_text,
                        output: "Error executing code".to_string(),
                        passed: false,
                    }
                }
            };
            self.results.push(outcome);
        }

        self.phase = CodingPhase::Editing;
        Ok(&self.results)
    }

    /// Locks the current run results into the pass totals and advances to
    /// the next problem, or finishes the round after the last one.
    pub fn submit(&mut self) -> Result<CodingProgress, RoundError> {
        self.ensure_editing()?;
        if self.results.is_empty() {
            return Err(RoundError::NoResultsYet);
        }

        self.total_passed += self.results.iter().filter(|r| r.passed).count() as u32;
        self.total_cases += self.results.len() as u32;
        self.results.clear();

        if self.current + 1 < self.problems.len() {
            self.current += 1;
            self.language = default_language(&self.problems[self.current]);
            self.code = self.language.boilerplate().to_string();
            Ok(CodingProgress::NextProblem {
                index: self.current,
                total: self.problems.len(),
            })
        } else {
            self.phase = CodingPhase::Complete;
            Ok(CodingProgress::Complete(self.build_result()))
        }
    }

    fn ensure_editing(&self) -> Result<(), RoundError> {
        match self.phase {
            CodingPhase::Editing => Ok(()),
            CodingPhase::Running => Err(RoundError::SubmissionInFlight),
            CodingPhase::Complete => Err(RoundError::AlreadyComplete),
        }
    }

    fn build_result(&self) -> RoundResult {
        let score = if self.total_cases == 0 {
            0.0
        } else {
            (100.0 * f64::from(self.total_passed) / f64::from(self.total_cases)).round()
        };

        // Strengths and improvements are picked independently; a perfect run
        // still gets "Optimize your solution" as its improvement.
        let half = f64::from(self.total_cases) / 2.0;
        let strengths = if self.total_passed == self.total_cases {
            vec!["All test cases passed".to_string()]
        } else if f64::from(self.total_passed) > half {
            vec!["Most test cases passed".to_string()]
        } else {
            vec!["Some test cases passed".to_string()]
        };
        let improvements = if self.total_passed == 0 {
            vec!["Review the problem statements".to_string()]
        } else if f64::from(self.total_passed) < half {
            vec!["Check edge cases".to_string(), "Review logic".to_string()]
        } else {
            vec!["Optimize your solution".to_string()]
        };

        RoundResult {
            score,
            strengths,
            improvements,
            feedback: format!(
                "You passed {} out of {} test cases.",
                self.total_passed, self.total_cases
            ),
            passed_tests: Some(self.total_passed),
            total_tests: Some(self.total_cases),
        }
    }
}

fn default_language(problem: &CodingProblem) -> JudgeLanguage {
    problem
        .languages
        .iter()
        .find_map(|raw| JudgeLanguage::parse(raw))
        .unwrap_or(JudgeLanguage::Python)
}

fn supports(problem: &CodingProblem, language: JudgeLanguage) -> bool {
    problem
        .languages
        .iter()
        .any(|raw| JudgeLanguage::parse(raw) == Some(language))
}

/// Renders a declared test input as stdin. Arrays become one line per
/// element; scalars become a single line.
fn value_to_stdin(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join("\n"),
        other => value_to_text(other),
    }
}

/// Renders a JSON value as comparison text. Strings compare as-is, without
/// surrounding quotes.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::interview::clients::{ClientError, JudgeRun};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct ScriptedJudge {
        runs: Mutex<Vec<Result<JudgeRun, ClientError>>>,
    }

    impl ScriptedJudge {
        fn new(runs: Vec<Result<JudgeRun, ClientError>>) -> Self {
            Self {
                runs: Mutex::new(runs),
            }
        }
    }

    #[async_trait]
    impl CodeJudge for ScriptedJudge {
        async fn execute(&self, _submission: JudgeSubmission) -> Result<JudgeRun, ClientError> {
            self.runs.lock().unwrap().remove(0)
        }
    }

    fn problem(cases: usize) -> CodingProblem {
        CodingProblem {
            prompt: "Echo the input".to_string(),
            inputs: (0..cases).map(|i| json!([i, i + 1])).collect(),
            expected_outputs: (0..cases).map(|i| json!(i)).collect(),
            languages: vec!["python".to_string(), "cpp".to_string()],
            difficulty: "easy".to_string(),
        }
    }

    fn accepted(output: &str) -> Result<JudgeRun, ClientError> {
        Ok(JudgeRun {
            output: output.to_string(),
            accepted: true,
        })
    }

    #[test]
    fn array_inputs_render_one_line_per_element() {
        assert_eq!(value_to_stdin(&json!([3, "abc", 7])), "3\nabc\n7");
        assert_eq!(value_to_stdin(&json!("solo")), "solo");
        assert_eq!(value_to_stdin(&json!(42)), "42");
    }

    #[test]
    fn expected_strings_compare_without_quotes() {
        assert_eq!(value_to_text(&json!("yes")), "yes");
        assert_eq!(value_to_text(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn buffer_starts_with_the_default_language_boilerplate() {
        let round = CodingRound::new(vec![problem(1)]).unwrap();
        assert_eq!(round.language(), JudgeLanguage::Python);
        assert_eq!(round.code(), JudgeLanguage::Python.boilerplate());
    }

    #[test]
    fn selecting_an_unsupported_language_is_rejected() {
        let mut round = CodingRound::new(vec![problem(1)]).unwrap();
        assert!(matches!(
            round.select_language("java"),
            Err(RoundError::UnsupportedLanguage(_))
        ));
        round.select_language("cpp").unwrap();
        assert_eq!(round.code(), JudgeLanguage::Cpp.boilerplate());
    }

    #[tokio::test]
    async fn trailing_whitespace_does_not_fail_a_case() {
        let mut round = CodingRound::new(vec![problem(1)]).unwrap();
        let judge = ScriptedJudge::new(vec![accepted("0\n")]);

        let results = round.run(&judge).await.unwrap();
        assert!(results[0].passed);
    }

    #[tokio::test]
    async fn execution_failure_marks_the_case_failed_and_continues() {
        let mut round = CodingRound::new(vec![problem(2)]).unwrap();
        let judge = ScriptedJudge::new(vec![
            Err(ClientError::Transport("connection refused".to_string())),
            accepted("1"),
        ]);

        let results = round.run(&judge).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(!results[0].passed);
        assert_eq!(results[0].output, "Error executing code");
        assert!(results[1].passed);
    }

    #[tokio::test]
    async fn submit_requires_a_run_first() {
        let mut round = CodingRound::new(vec![problem(1)]).unwrap();
        assert!(matches!(round.submit(), Err(RoundError::NoResultsYet)));
    }

    async fn finish_single_problem_round(
        cases: usize,
        runs: Vec<Result<JudgeRun, ClientError>>,
    ) -> RoundResult {
        let mut round = CodingRound::new(vec![problem(cases)]).unwrap();
        let judge = ScriptedJudge::new(runs);
        round.run(&judge).await.unwrap();
        match round.submit().unwrap() {
            CodingProgress::Complete(result) => result,
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn perfect_run_still_suggests_optimizing() {
        let result =
            finish_single_problem_round(4, vec![accepted("0"), accepted("1"), accepted("2"), accepted("3")])
                .await;
        assert_eq!(result.score, 100.0);
        assert_eq!(result.strengths, vec!["All test cases passed"]);
        assert_eq!(result.improvements, vec!["Optimize your solution"]);
    }

    #[tokio::test]
    async fn zero_passes_point_back_at_the_problem_statements() {
        let result =
            finish_single_problem_round(2, vec![accepted("wrong"), accepted("also wrong")]).await;
        assert_eq!(result.score, 0.0);
        assert_eq!(result.strengths, vec!["Some test cases passed"]);
        assert_eq!(result.improvements, vec!["Review the problem statements"]);
    }

    #[tokio::test]
    async fn exactly_half_is_not_most_and_not_a_logic_review() {
        // 2 of 4: "Most" needs strictly more than half, "Check edge cases"
        // needs strictly fewer.
        let result = finish_single_problem_round(
            4,
            vec![accepted("0"), accepted("1"), accepted("wrong"), accepted("wrong")],
        )
        .await;
        assert_eq!(result.score, 50.0);
        assert_eq!(result.strengths, vec!["Some test cases passed"]);
        assert_eq!(result.improvements, vec!["Optimize your solution"]);
    }

    #[tokio::test]
    async fn full_round_scores_across_both_problems() {
        let mut round = CodingRound::new(vec![problem(2), problem(2)]).unwrap();

        // First problem: both cases pass.
        let judge = ScriptedJudge::new(vec![accepted("0"), accepted("1")]);
        round.run(&judge).await.unwrap();
        assert!(matches!(
            round.submit().unwrap(),
            CodingProgress::NextProblem { index: 1, total: 2 }
        ));

        // Second problem: one of two passes.
        let judge = ScriptedJudge::new(vec![accepted("0"), accepted("wrong")]);
        round.run(&judge).await.unwrap();
        match round.submit().unwrap() {
            CodingProgress::Complete(result) => {
                assert_eq!(result.score, 75.0);
                assert_eq!(result.passed_tests, Some(3));
                assert_eq!(result.total_tests, Some(4));
                assert_eq!(result.strengths, vec!["Most test cases passed"]);
                assert_eq!(result.feedback, "You passed 3 out of 4 test cases.");
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }
}
