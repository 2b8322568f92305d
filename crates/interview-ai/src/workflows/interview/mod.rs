//! The interview workflow: role catalog, question bank, the four round
//! state machines, external scoring clients, and the summary/report views.

pub mod clients;
pub mod domain;
pub(crate) mod feedback;
pub mod orchestrator;
pub(crate) mod questions;
pub mod report;
pub mod rounds;
pub mod router;
pub mod service;
pub mod session;

pub use domain::{score_label, CodingProblem, Question, Role, RoundKind, RoundResult};
pub use orchestrator::Navigation;
pub use report::{build_report, build_summary, InterviewSummary, ReportDocument};
pub use router::interview_router;
pub use service::{
    InterviewService, InterviewServiceError, RoleView, RoundSnapshot, RoundView, StartOutcome,
    SubmitOutcome, SummaryOutcome,
};
pub use session::InterviewSession;
