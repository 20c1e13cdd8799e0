#[derive(Debug, Clone, PartialEq)]
pub enum ScoreRepositoryError {
    NotFound,
    AlreadyExists,
    Storage(String),
}

impl std::fmt::Display for ScoreRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreRepositoryError::NotFound => write!(f, "Score record not found"),
            ScoreRepositoryError::AlreadyExists => write!(f, "Score record already exists"),
            ScoreRepositoryError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for ScoreRepositoryError {}
