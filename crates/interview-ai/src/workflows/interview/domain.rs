use serde::{Deserialize, Serialize};

/// Fixed catalog of roles a candidate can interview for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Ai,
    Fullstack,
    Security,
    Devops,
}

impl Role {
    pub fn id(&self) -> &'static str {
        match self {
            Role::Ai => "ai",
            Role::Fullstack => "fullstack",
            Role::Security => "security",
            Role::Devops => "devops",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Role::Ai => "AI/ML Engineer",
            Role::Fullstack => "Full Stack Developer",
            Role::Security => "Cybersecurity Analyst",
            Role::Devops => "DevOps/MLOps Engineer",
        }
    }

    pub fn track(&self) -> &'static str {
        match self {
            Role::Ai => "Artificial Intelligence",
            Role::Fullstack => "Web Development",
            Role::Security => "Security",
            Role::Devops => "Infrastructure",
        }
    }

    /// Unknown identifiers yield `None`; callers treat that as a navigation
    /// fault, never an error.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ai" => Some(Role::Ai),
            "fullstack" => Some(Role::Fullstack),
            "security" => Some(Role::Security),
            "devops" => Some(Role::Devops),
            _ => None,
        }
    }

    pub fn ordered() -> [Role; 4] {
        [Role::Ai, Role::Fullstack, Role::Security, Role::Devops]
    }
}

/// The four fixed interview rounds, in interview order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundKind {
    Behavioral,
    Technical,
    Coding,
    SystemDesign,
}

impl RoundKind {
    pub fn number(&self) -> u8 {
        match self {
            RoundKind::Behavioral => 1,
            RoundKind::Technical => 2,
            RoundKind::Coding => 3,
            RoundKind::SystemDesign => 4,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(RoundKind::Behavioral),
            2 => Some(RoundKind::Technical),
            3 => Some(RoundKind::Coding),
            4 => Some(RoundKind::SystemDesign),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoundKind::Behavioral => "HR & Behavioral",
            RoundKind::Technical => "Technical Q&A",
            RoundKind::Coding => "Coding Challenge",
            RoundKind::SystemDesign => "System Design",
        }
    }

    /// Category tag selecting this round's questions in the dataset.
    pub fn category(&self) -> &'static str {
        match self {
            RoundKind::Behavioral => "HR",
            RoundKind::Technical => "Technical Round 1",
            RoundKind::Coding => "coding",
            RoundKind::SystemDesign => "system_design",
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn ordered() -> [RoundKind; 4] {
        [
            RoundKind::Behavioral,
            RoundKind::Technical,
            RoundKind::Coding,
            RoundKind::SystemDesign,
        ]
    }
}

/// A free-text question with the reference material the evaluator scores
/// against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub ideal_answer: String,
    pub keywords: Vec<String>,
}

/// A coding challenge with declared test inputs and expected outputs.
///
/// Inputs and outputs are JSON values so a single case can be a scalar or an
/// argument list; the judge receives the newline-joined rendering as stdin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodingProblem {
    pub prompt: String,
    pub inputs: Vec<serde_json::Value>,
    pub expected_outputs: Vec<serde_json::Value>,
    pub languages: Vec<String>,
    pub difficulty: String,
}

/// Normalized outcome of one completed round. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub score: f64,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passed_tests: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tests: Option<u32>,
}

/// Qualitative label shown next to a 0-100 score in summaries and reports.
pub fn score_label(score: f64) -> &'static str {
    if score >= 85.0 {
        "Excellent"
    } else if score >= 70.0 {
        "Good"
    } else if score >= 50.0 {
        "Fair"
    } else {
        "Needs Improvement"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_numbers_map_both_ways() {
        for kind in RoundKind::ordered() {
            assert_eq!(RoundKind::from_number(kind.number()), Some(kind));
        }
        assert_eq!(RoundKind::from_number(0), None);
        assert_eq!(RoundKind::from_number(5), None);
    }

    #[test]
    fn advancing_past_round_four_ends_the_sequence() {
        assert_eq!(RoundKind::Behavioral.next(), Some(RoundKind::Technical));
        assert_eq!(RoundKind::SystemDesign.next(), None);
    }

    #[test]
    fn unknown_role_parses_to_none() {
        assert_eq!(Role::parse("ai"), Some(Role::Ai));
        assert_eq!(Role::parse(" FULLSTACK "), Some(Role::Fullstack));
        assert_eq!(Role::parse("astronaut"), None);
    }

    #[test]
    fn score_labels_follow_summary_buckets() {
        assert_eq!(score_label(92.0), "Excellent");
        assert_eq!(score_label(70.0), "Good");
        assert_eq!(score_label(50.0), "Fair");
        assert_eq!(score_label(49.9), "Needs Improvement");
    }
}
