use serde::{Deserialize, Serialize};

/// Registry entry for a player with their match record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub matches_won: u32,
    pub matches_lost: u32,
}

impl Player {
    pub fn new(id: &str, name: &str) -> Self {
        Player {
            id: id.to_string(),
            name: name.to_string(),
            matches_won: 0,
            matches_lost: 0,
        }
    }

    pub fn record_win(&mut self) {
        self.matches_won += 1;
    }

    pub fn record_loss(&mut self) {
        self.matches_lost += 1;
    }

    pub fn matches_played(&self) -> u32 {
        self.matches_won + self.matches_lost
    }
}
