pub mod player_repository_errors;
pub mod score_repository_errors;
