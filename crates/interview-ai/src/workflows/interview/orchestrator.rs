use serde::Serialize;

use super::domain::{Role, RoundKind};
use super::session::InterviewSession;

/// Where the client should go next. Navigation faults resolve to a safe
/// screen; nothing here is ever an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum Navigation {
    Round { role: Role, round: u8 },
    Summary { role: Role },
    RoleSelection,
}

/// Resolves a raw role/round pair from a request path.
///
/// Unknown roles redirect to role selection; a round outside 1..=4 falls
/// back to round 1 for the role.
pub fn resolve_round(role_raw: &str, round_number: u8) -> Navigation {
    let Some(role) = Role::parse(role_raw) else {
        return Navigation::RoleSelection;
    };

    match RoundKind::from_number(round_number) {
        Some(round) => Navigation::Round {
            role,
            round: round.number(),
        },
        None => Navigation::Round { role, round: 1 },
    }
}

/// Destination after a round completes: the next round, or the summary once
/// round four is done.
pub fn after_completion(role: Role, round: RoundKind) -> Navigation {
    match round.next() {
        Some(next) => Navigation::Round {
            role,
            round: next.number(),
        },
        None => Navigation::Summary { role },
    }
}

/// Guards deep links into the summary: a role with zero completed rounds is
/// sent back to round 1.
pub fn resolve_summary(session: &InterviewSession, role_raw: &str) -> Navigation {
    let Some(role) = Role::parse(role_raw) else {
        return Navigation::RoleSelection;
    };

    if session.has_completed_any(role) {
        Navigation::Summary { role }
    } else {
        Navigation::Round { role, round: 1 }
    }
}
