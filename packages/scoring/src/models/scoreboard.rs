use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::models::match_status::MatchStatus;
use crate::models::records::{SetRecord, TiebreakRecord};
use crate::models::side::Side;

/// Final (or interrupted) game line of one set, e.g. "7-6(5)".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub set_number: u32,
    pub games_one: u32,
    pub games_two: u32,
    /// Tiebreak points (player one, player two) when the set went to one.
    pub tiebreak_points: Option<(u32, u32)>,
}

impl SetScore {
    pub fn from_records(set: &SetRecord, tiebreak: Option<&TiebreakRecord>) -> Self {
        SetScore {
            set_number: set.set_number,
            games_one: set.games_one,
            games_two: set.games_two,
            tiebreak_points: tiebreak.map(|t| (t.points_one, t.points_two)),
        }
    }
}

impl fmt::Display for SetScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.games_one, self.games_two)?;
        if let Some((one, two)) = self.tiebreak_points {
            // Convention: only the loser's tiebreak points are shown.
            write!(f, "({})", one.min(two))?;
        }
        Ok(())
    }
}

/// Point score of the unit in play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointScore {
    Game {
        one: &'static str,
        two: &'static str,
    },
    Tiebreak {
        one: u32,
        two: u32,
        target_points: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentScore {
    pub set_number: u32,
    pub games_one: u32,
    pub games_two: u32,
    pub points: Option<PointScore>,
    pub server: Option<Side>,
}

/// Displayable state of a match returned to the operator after each event.
#[derive(Debug, Clone, PartialEq)]
pub struct Scoreboard {
    pub player_one_id: String,
    pub player_two_id: String,
    pub status: MatchStatus,
    pub sets_one: u32,
    pub sets_two: u32,
    pub completed_sets: Vec<SetScore>,
    pub current: Option<CurrentScore>,
    pub winner: Option<Side>,
    pub elapsed: Duration,
}

impl Scoreboard {
    /// Score line over completed sets, e.g. "6-4 7-6(5)".
    pub fn set_line(&self) -> String {
        self.completed_sets
            .iter()
            .map(|set| set.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vs {} [{}] sets {}-{}",
            self.player_one_id, self.player_two_id, self.status, self.sets_one, self.sets_two
        )?;

        if !self.completed_sets.is_empty() {
            write!(f, " ({})", self.set_line())?;
        }

        if let Some(current) = &self.current {
            write!(
                f,
                " | set {} games {}-{}",
                current.set_number, current.games_one, current.games_two
            )?;
            match &current.points {
                Some(PointScore::Game { one, two }) => write!(f, " points {}-{}", one, two)?,
                Some(PointScore::Tiebreak {
                    one,
                    two,
                    target_points,
                }) => write!(f, " tiebreak {}-{} (to {})", one, two, target_points)?,
                None => {}
            }
            if let Some(server) = current.server {
                write!(f, " | serving: {}", server)?;
            }
        }

        if let Some(winner) = self.winner {
            write!(f, " | winner: {}", winner)?;
        }

        let secs = self.elapsed.as_secs();
        write!(
            f,
            " | {:02}:{:02}:{:02}",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        )
    }
}
