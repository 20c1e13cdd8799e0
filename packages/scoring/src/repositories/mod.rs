pub mod errors;
pub mod player_repository;
pub mod score_repository;
