use chrono::Utc;
use serde::Serialize;

use crate::workflows::interview::domain::{score_label, Role, RoundKind};
use crate::workflows::interview::session::InterviewSession;

/// Color band for a score in the printed report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Positive,
    Caution,
    Negative,
}

impl ScoreBand {
    pub fn for_score(score: f64) -> Self {
        if score >= 70.0 {
            ScoreBand::Positive
        } else if score >= 40.0 {
            ScoreBand::Caution
        } else {
            ScoreBand::Negative
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum LineKind {
    Title,
    Heading,
    Text,
}

/// One rendered line. `band` carries the color accent for score lines.
#[derive(Debug, Clone, Serialize)]
pub struct ReportLine {
    kind: LineKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<ScoreBand>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportPage {
    pub lines: Vec<ReportLine>,
}

/// Paginated report document, ready for a fixed-height renderer.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub role: Role,
    pub generated_on: String,
    pub pages: Vec<ReportPage>,
}

// Vertical layout budget per page. Content flows from the top margin and a
// line that would land past the bottom margin starts a new page.
const PAGE_TOP: u32 = 30;
const PAGE_BOTTOM: u32 = 250;

impl LineKind {
    fn height(self) -> u32 {
        match self {
            LineKind::Title => 14,
            LineKind::Heading => 10,
            LineKind::Text => 7,
        }
    }
}

struct PageWriter {
    pages: Vec<ReportPage>,
    cursor: u32,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            pages: vec![ReportPage::default()],
            cursor: PAGE_TOP,
        }
    }

    fn push(&mut self, kind: LineKind, text: String, band: Option<ScoreBand>) {
        let height = kind.height();
        if self.cursor + height > PAGE_BOTTOM {
            self.pages.push(ReportPage::default());
            self.cursor = PAGE_TOP;
        }
        self.cursor += height;
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(ReportLine { kind, text, band });
        }
    }

    fn title(&mut self, text: impl Into<String>) {
        self.push(LineKind::Title, text.into(), None);
    }

    fn heading(&mut self, text: impl Into<String>) {
        self.push(LineKind::Heading, text.into(), None);
    }

    fn text(&mut self, text: impl Into<String>) {
        self.push(LineKind::Text, text.into(), None);
    }

    fn score(&mut self, text: impl Into<String>, score: f64) {
        self.push(LineKind::Text, text.into(), Some(ScoreBand::for_score(score)));
    }
}

/// Renders the stored results for a role into a paginated report. Only
/// completed rounds get a section.
pub fn build_report(session: &InterviewSession, role: Role) -> ReportDocument {
    let mut writer = PageWriter::new();

    writer.title("Mock Interview Report");
    writer.text(format!("Role: {}", role.title()));
    if let Some(overall) = session.overall_score(role) {
        writer.score(
            format!("Overall Score: {:.1} ({})", overall, score_label(overall)),
            overall,
        );
    }

    for kind in RoundKind::ordered() {
        let Some(result) = session.result(role, kind) else {
            continue;
        };

        writer.heading(format!("Round {}: {}", kind.number(), kind.label()));
        writer.score(
            format!("Score: {:.1} ({})", result.score, score_label(result.score)),
            result.score,
        );
        if let (Some(passed), Some(total)) = (result.passed_tests, result.total_tests) {
            writer.text(format!("Test cases: {passed}/{total} passed"));
        }
        if !result.strengths.is_empty() {
            writer.text("Strengths:".to_string());
            for strength in &result.strengths {
                writer.text(format!("  - {strength}"));
            }
        }
        if !result.improvements.is_empty() {
            writer.text("Areas to improve:".to_string());
            for improvement in &result.improvements {
                writer.text(format!("  - {improvement}"));
            }
        }
        if !result.feedback.is_empty() {
            writer.text(result.feedback.clone());
        }
    }

    ReportDocument {
        role,
        generated_on: Utc::now().format("%Y-%m-%d").to_string(),
        pages: writer.pages,
    }
}
