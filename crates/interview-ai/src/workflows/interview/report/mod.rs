//! Summary view and the printable end-of-interview report.

mod document;
mod summary;

pub use document::{build_report, ReportDocument, ReportLine, ReportPage, ScoreBand};
pub use summary::{build_summary, InterviewSummary, RoundStatusEntry};
