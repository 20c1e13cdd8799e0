use serde::{Deserialize, Serialize};

use crate::models::errors::scoring_errors::ScoringError;
use crate::models::records::TiebreakRecord;
use crate::models::side::Side;
use crate::rotation;

pub const TIEBREAK_POINTS: u32 = 7;
pub const SUPER_TIEBREAK_POINTS: u32 = 10;

/// Point-level scoring for the decider played at six games all.
///
/// The server is never stored: it follows from the opening server and the
/// number of points already played, which is what lets a suspended tiebreak
/// resume with the right player serving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tiebreak {
    points_one: u32,
    points_two: u32,
    target_points: u32,
    opening_server: Side,
    set_number: u32,
}

impl Tiebreak {
    pub fn new(opening_server: Side, set_number: u32, target_points: u32) -> Self {
        Tiebreak {
            points_one: 0,
            points_two: 0,
            target_points,
            opening_server,
            set_number,
        }
    }

    pub fn resumed(
        opening_server: Side,
        set_number: u32,
        target_points: u32,
        points_one: u32,
        points_two: u32,
    ) -> Self {
        Tiebreak {
            points_one,
            points_two,
            target_points,
            opening_server,
            set_number,
        }
    }

    /// A 10-point super tiebreak is played only in the last possible set.
    pub fn target_points_for(set_number: u32, sets_to_win: u32) -> u32 {
        if set_number == (sets_to_win * 2).saturating_sub(1) {
            SUPER_TIEBREAK_POINTS
        } else {
            TIEBREAK_POINTS
        }
    }

    pub fn from_tiebreak_record(record: &TiebreakRecord, opening_server: Side) -> Self {
        Tiebreak::resumed(
            opening_server,
            record.set_number,
            record.target_points,
            record.points_one,
            record.points_two,
        )
    }

    pub fn to_tiebreak_record(&self, match_id: &str) -> TiebreakRecord {
        TiebreakRecord {
            match_id: match_id.to_string(),
            set_number: self.set_number,
            points_one: self.points_one,
            points_two: self.points_two,
            target_points: self.target_points,
        }
    }

    pub fn add_point(&mut self, side: Side) -> Result<Option<Side>, ScoringError> {
        if self.is_won() {
            return Err(ScoringError::InvariantViolation(format!(
                "tiebreak in set {} is already decided",
                self.set_number
            )));
        }
        match side {
            Side::PlayerOne => self.points_one += 1,
            Side::PlayerTwo => self.points_two += 1,
        }
        Ok(self.winner())
    }

    pub fn is_won(&self) -> bool {
        self.winner().is_some()
    }

    pub fn winner(&self) -> Option<Side> {
        if self.points_one >= self.target_points && self.points_one >= self.points_two + 2 {
            Some(Side::PlayerOne)
        } else if self.points_two >= self.target_points && self.points_two >= self.points_one + 2
        {
            Some(Side::PlayerTwo)
        } else {
            None
        }
    }

    pub fn points_played(&self) -> u32 {
        self.points_one + self.points_two
    }

    /// Server of the next point.
    pub fn server(&self) -> Side {
        rotation::tiebreak_server(self.points_played(), self.opening_server)
    }

    pub fn points(&self) -> (u32, u32) {
        (self.points_one, self.points_two)
    }

    pub fn target_points(&self) -> u32 {
        self.target_points
    }

    pub fn opening_server(&self) -> Side {
        self.opening_server
    }

    pub fn set_number(&self) -> u32 {
        self.set_number
    }

    pub fn is_super_tiebreak(&self) -> bool {
        self.target_points == SUPER_TIEBREAK_POINTS
    }
}
