#[derive(Debug, Clone, PartialEq)]
pub enum PlayerRepositoryError {
    NotFound,
    AlreadyExists,
    Storage(String),
}

impl std::fmt::Display for PlayerRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerRepositoryError::NotFound => write!(f, "Player not found"),
            PlayerRepositoryError::AlreadyExists => write!(f, "Player already exists"),
            PlayerRepositoryError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for PlayerRepositoryError {}
