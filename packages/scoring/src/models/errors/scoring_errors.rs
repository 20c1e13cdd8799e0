use crate::models::match_status::{MatchAction, MatchStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum ScoringError {
    InvalidPlayer(u8),
    InvalidScoreLabel(String),
    InvalidTransition {
        from: MatchStatus,
        action: MatchAction,
    },
    InvariantViolation(String),
    InvalidConfiguration(String),
}

impl std::fmt::Display for ScoringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringError::InvalidPlayer(player) => write!(f, "Invalid player number: {}", player),
            ScoringError::InvalidScoreLabel(label) => write!(f, "Unknown score label: {}", label),
            ScoringError::InvalidTransition { from, action } => {
                write!(f, "Cannot {} a match that is {}", action, from)
            }
            ScoringError::InvariantViolation(msg) => write!(f, "Invariant violated: {}", msg),
            ScoringError::InvalidConfiguration(msg) => {
                write!(f, "Invalid configuration: {}", msg)
            }
        }
    }
}

impl std::error::Error for ScoringError {}
