use std::time::Duration;

use tracing::{debug, info};

use crate::models::errors::scoring_errors::ScoringError;
use crate::models::game::Game;
use crate::models::records::{PointRecord, SetRecord, TiebreakRecord};
use crate::models::side::Side;
use crate::models::tiebreak::Tiebreak;
use crate::rotation;
use crate::timer::Stopwatch;

pub const GAMES_TO_WIN_SET: u32 = 6;

/// The unit currently being played inside a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetUnit {
    /// Nothing on court yet, or the set is decided.
    Idle,
    Game(Game),
    Tiebreak(Tiebreak),
}

/// What a completed game (or an interruption) means for the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetProgress {
    Undecided,
    TiebreakStarted { target_points: u32 },
    Won(Side),
    TiebreakSuspended,
    TiebreakFinished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interruption {
    Suspend,
    Finish,
}

/// Persisted state of the unit that was in play when the match was suspended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitSnapshot {
    /// Latest point record of the match, if any was found.
    Game(Option<PointRecord>),
    Tiebreak(TiebreakRecord),
}

#[derive(Debug, Clone)]
pub struct Set {
    set_number: u32,
    sets_to_win: u32,
    games_one: u32,
    games_two: u32,
    opening_server: Side,
    unit: SetUnit,
    resumed_in_tiebreak: bool,
    winner_reported: bool,
    stopwatch: Stopwatch,
    elapsed: Duration,
}

impl Set {
    pub fn new(set_number: u32, sets_to_win: u32, opening_server: Side) -> Self {
        Set {
            set_number,
            sets_to_win,
            games_one: 0,
            games_two: 0,
            opening_server,
            unit: SetUnit::Idle,
            resumed_in_tiebreak: false,
            winner_reported: false,
            stopwatch: Stopwatch::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Set restored from its persisted record, with no unit in play yet.
    pub fn from_set_record(record: &SetRecord, sets_to_win: u32) -> Self {
        let mut set = Set::new(record.set_number, sets_to_win, record.opening_server);
        set.games_one = record.games_one;
        set.games_two = record.games_two;
        set
    }

    pub fn to_set_record(&self, match_id: &str) -> SetRecord {
        SetRecord {
            match_id: match_id.to_string(),
            set_number: self.set_number,
            games_one: self.games_one,
            games_two: self.games_two,
            opening_server: self.opening_server,
            is_tiebreak: matches!(self.unit, SetUnit::Tiebreak(_)),
        }
    }

    /// Puts the first game of the set on court.
    pub fn initialize_current_unit(&mut self, server: Side) -> Result<(), ScoringError> {
        if self.unit != SetUnit::Idle {
            return Err(ScoringError::InvariantViolation(format!(
                "set {} already has a unit in play",
                self.set_number
            )));
        }
        let game_number = self.games_played() + 1;
        self.unit = SetUnit::Game(Game::resumed(0, 0, game_number, server));
        self.stopwatch.start();
        debug!(set = self.set_number, %server, "First game of set initialised");
        Ok(())
    }

    /// Rebuilds the unit that was in play from its snapshot.
    ///
    /// Game service follows the number of games already played in the set;
    /// tiebreak service follows the persisted point total, so neither needs
    /// the point history replayed.
    pub fn resume_current_unit(&mut self, snapshot: UnitSnapshot) -> Result<(), ScoringError> {
        if self.unit != SetUnit::Idle {
            return Err(ScoringError::InvariantViolation(format!(
                "cannot resume set {} while a unit is already in play",
                self.set_number
            )));
        }

        let next_server = self.next_game_server();
        let unit = match snapshot {
            UnitSnapshot::Tiebreak(record) => {
                if !self.is_tiebreak_trigger() {
                    return Err(ScoringError::InvariantViolation(format!(
                        "tiebreak snapshot for set {} at {}-{}",
                        self.set_number, self.games_one, self.games_two
                    )));
                }
                if record.set_number != self.set_number {
                    return Err(ScoringError::InvariantViolation(format!(
                        "tiebreak snapshot belongs to set {}, not set {}",
                        record.set_number, self.set_number
                    )));
                }
                let tiebreak = Tiebreak::from_tiebreak_record(&record, next_server);
                if tiebreak.is_won() {
                    return Err(ScoringError::InvariantViolation(format!(
                        "tiebreak snapshot for set {} is already decided",
                        self.set_number
                    )));
                }
                SetUnit::Tiebreak(tiebreak)
            }
            UnitSnapshot::Game(Some(record))
                if record.set_number == self.set_number
                    && record.game_number == self.games_played() + 1 =>
            {
                let game = Game::from_point_record(&record, next_server)?;
                if game.is_won() {
                    return Err(ScoringError::InvariantViolation(format!(
                        "game {} of set {} is already decided",
                        game.game_number(),
                        self.set_number
                    )));
                }
                SetUnit::Game(game)
            }
            UnitSnapshot::Game(_) => {
                // No row for the game in play (missing, another set, or a game
                // already counted in the score): the next game starts at love.
                SetUnit::Game(Game::resumed(0, 0, self.games_played() + 1, next_server))
            }
        };

        self.resumed_in_tiebreak = matches!(unit, SetUnit::Tiebreak(_));
        self.unit = unit;
        self.stopwatch.start();
        Ok(())
    }

    /// Credits a completed game (or tiebreak) to `winner`.
    pub fn add_game_result(&mut self, winner: Side) -> Result<SetProgress, ScoringError> {
        if self.winner_reported || self.is_won() {
            return Err(ScoringError::InvariantViolation(format!(
                "set {} is already decided",
                self.set_number
            )));
        }

        match winner {
            Side::PlayerOne => self.games_one += 1,
            Side::PlayerTwo => self.games_two += 1,
        }
        self.elapsed += self.stopwatch.lap();

        if let Some(set_winner) = self.winner() {
            self.winner_reported = true;
            self.unit = SetUnit::Idle;
            self.elapsed += self.stopwatch.stop();
            info!(
                set = self.set_number,
                "Set won by {} {}-{}", set_winner, self.games_one, self.games_two
            );
            return Ok(SetProgress::Won(set_winner));
        }

        if self.is_tiebreak_trigger() {
            let target_points = Tiebreak::target_points_for(self.set_number, self.sets_to_win);
            let tiebreak = Tiebreak::new(self.next_game_server(), self.set_number, target_points);
            info!(
                set = self.set_number,
                target_points,
                server = %tiebreak.opening_server(),
                "Tiebreak at six games all"
            );
            self.unit = SetUnit::Tiebreak(tiebreak);
            return Ok(SetProgress::TiebreakStarted { target_points });
        }

        Ok(SetProgress::Undecided)
    }

    /// Advances to the next game after one completed without deciding the set.
    pub fn change_unit(&mut self) -> Result<(), ScoringError> {
        match &mut self.unit {
            SetUnit::Game(game) if game.is_won() => {
                game.reset();
                Ok(())
            }
            SetUnit::Game(_) => Err(ScoringError::InvariantViolation(
                "current game is still in progress".to_string(),
            )),
            _ => Err(ScoringError::InvariantViolation(format!(
                "set {} has no game to advance",
                self.set_number
            ))),
        }
    }

    /// Operator suspend or finish while this set is in play.
    pub fn interrupt(&mut self, interruption: Interruption) -> SetProgress {
        self.elapsed += self.stopwatch.stop();
        match (&self.unit, interruption) {
            (SetUnit::Tiebreak(_), Interruption::Suspend) => SetProgress::TiebreakSuspended,
            (SetUnit::Tiebreak(_), Interruption::Finish) => SetProgress::TiebreakFinished,
            _ => SetProgress::Undecided,
        }
    }

    pub fn is_won(&self) -> bool {
        self.winner().is_some()
    }

    /// Six games with a two game lead, or seven-six after a tiebreak.
    pub fn winner(&self) -> Option<Side> {
        let (one, two) = (self.games_one, self.games_two);
        if (one >= GAMES_TO_WIN_SET && one >= two + 2) || (one == 7 && two == 6) {
            Some(Side::PlayerOne)
        } else if (two >= GAMES_TO_WIN_SET && two >= one + 2) || (two == 7 && one == 6) {
            Some(Side::PlayerTwo)
        } else {
            None
        }
    }

    pub fn is_tiebreak_trigger(&self) -> bool {
        self.games_one == GAMES_TO_WIN_SET && self.games_two == GAMES_TO_WIN_SET
    }

    pub fn games_played(&self) -> u32 {
        self.games_one + self.games_two
    }

    pub fn games(&self) -> (u32, u32) {
        (self.games_one, self.games_two)
    }

    /// Server of the next game to be played in this set.
    pub fn next_game_server(&self) -> Side {
        rotation::serves_first(self.games_played(), self.opening_server)
    }

    /// Opening server of the following set.
    pub fn next_set_server(&self) -> Side {
        self.next_game_server()
    }

    /// Server of the point about to be played, if a unit is in play.
    pub fn current_server(&self) -> Option<Side> {
        match &self.unit {
            SetUnit::Game(game) => Some(game.server()),
            SetUnit::Tiebreak(tiebreak) => Some(tiebreak.server()),
            SetUnit::Idle => None,
        }
    }

    pub fn unit(&self) -> &SetUnit {
        &self.unit
    }

    pub fn unit_mut(&mut self) -> &mut SetUnit {
        &mut self.unit
    }

    pub fn tiebreak(&self) -> Option<&Tiebreak> {
        match &self.unit {
            SetUnit::Tiebreak(tiebreak) => Some(tiebreak),
            _ => None,
        }
    }

    pub fn game(&self) -> Option<&Game> {
        match &self.unit {
            SetUnit::Game(game) => Some(game),
            _ => None,
        }
    }

    pub fn set_number(&self) -> u32 {
        self.set_number
    }

    pub fn opening_server(&self) -> Side {
        self.opening_server
    }

    pub fn resumed_in_tiebreak(&self) -> bool {
        self.resumed_in_tiebreak
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed + self.stopwatch.elapsed()
    }
}
