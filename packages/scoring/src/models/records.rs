//! Persisted snapshot shapes exchanged with the score repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::match_status::MatchStatus;
use crate::models::side::Side;

/// Whether a save creates a new row or overwrites the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteMode {
    Insert,
    Update,
}

/// Latest point score of one game, stored as display labels ("0", "15", "30", "40", "A").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRecord {
    pub match_id: String,
    pub set_number: u32,
    pub game_number: u32,
    pub score_one: String,
    pub score_two: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRecord {
    pub match_id: String,
    pub set_number: u32,
    pub games_one: u32,
    pub games_two: u32,
    /// Player who served the first game of the set.
    pub opening_server: Side,
    pub is_tiebreak: bool,
}

impl SetRecord {
    pub fn games_played(&self) -> u32 {
        self.games_one + self.games_two
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TiebreakRecord {
    pub match_id: String,
    pub set_number: u32,
    pub points_one: u32,
    pub points_two: u32,
    pub target_points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    pub player_one_id: String,
    pub player_two_id: String,
    pub sets_to_win: u32,
    pub status: MatchStatus,
    pub winner_id: Option<String>,
    pub sets_one: u32,
    pub sets_two: u32,
    pub scheduled_start: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    /// Accumulated play time in milliseconds.
    pub duration_ms: u64,
}
