use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::errors::scoring_errors::ScoringError;

/// One of the two players on court, by position in the match record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    PlayerOne,
    PlayerTwo,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::PlayerOne => Side::PlayerTwo,
            Side::PlayerTwo => Side::PlayerOne,
        }
    }

    pub fn is_player_one(self) -> bool {
        self == Side::PlayerOne
    }

    pub fn from_player_one_flag(is_player_one: bool) -> Side {
        if is_player_one {
            Side::PlayerOne
        } else {
            Side::PlayerTwo
        }
    }

    /// 1-based player number as the operator enters it.
    pub fn number(self) -> u8 {
        match self {
            Side::PlayerOne => 1,
            Side::PlayerTwo => 2,
        }
    }
}

impl TryFrom<u8> for Side {
    type Error = ScoringError;

    fn try_from(player: u8) -> Result<Self, Self::Error> {
        match player {
            1 => Ok(Side::PlayerOne),
            2 => Ok(Side::PlayerTwo),
            other => Err(ScoringError::InvalidPlayer(other)),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}
