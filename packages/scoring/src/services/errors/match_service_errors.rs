use crate::models::errors::scoring_errors::ScoringError;
use crate::repositories::errors::player_repository_errors::PlayerRepositoryError;
use crate::repositories::errors::score_repository_errors::ScoreRepositoryError;

#[derive(Debug, Clone, PartialEq)]
pub enum MatchServiceError {
    MatchNotFound(String),
    PlayerNotFound(String),
    ValidationError(String),
    SnapshotNotFound(String),
    Scoring(ScoringError),
    Repository(String),
}

impl std::fmt::Display for MatchServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchServiceError::MatchNotFound(id) => write!(f, "Match not found: {}", id),
            MatchServiceError::PlayerNotFound(id) => write!(f, "Player not found: {}", id),
            MatchServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            MatchServiceError::SnapshotNotFound(msg) => write!(f, "Snapshot not found: {}", msg),
            MatchServiceError::Scoring(err) => write!(f, "Scoring error: {}", err),
            MatchServiceError::Repository(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for MatchServiceError {}

impl From<ScoringError> for MatchServiceError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::InvalidConfiguration(msg) => MatchServiceError::ValidationError(msg),
            other => MatchServiceError::Scoring(other),
        }
    }
}

impl From<ScoreRepositoryError> for MatchServiceError {
    fn from(err: ScoreRepositoryError) -> Self {
        MatchServiceError::Repository(err.to_string())
    }
}

impl From<PlayerRepositoryError> for MatchServiceError {
    fn from(err: PlayerRepositoryError) -> Self {
        MatchServiceError::Repository(err.to_string())
    }
}
