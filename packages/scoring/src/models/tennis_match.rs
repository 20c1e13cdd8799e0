use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::errors::scoring_errors::ScoringError;
use crate::models::match_status::{MatchAction, MatchStatus};
use crate::models::records::{MatchRecord, SetRecord, TiebreakRecord};
use crate::models::scoreboard::{CurrentScore, PointScore, Scoreboard, SetScore};
use crate::models::set::{Interruption, Set, SetProgress, SetUnit, UnitSnapshot};
use crate::models::side::Side;
use crate::timer::{self, Stopwatch};

/// What a single point did to the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointOutcome {
    PointScored,
    /// A game was won and the next game of the same set is on court.
    GameWon { winner: Side },
    TiebreakStarted { target_points: u32 },
    /// A set was won and the next set has started.
    SetWon {
        winner: Side,
        finished: SetRecord,
        tiebreak: Option<TiebreakRecord>,
    },
    MatchWon {
        winner: Side,
        finished: SetRecord,
        tiebreak: Option<TiebreakRecord>,
        /// Play time since the last start or resume.
        elapsed: Duration,
    },
}

/// Result of an operator suspend or finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stoppage {
    pub progress: SetProgress,
    /// Play time since the last start or resume.
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct Match {
    id: String,
    player_one_id: String,
    player_two_id: String,
    sets_to_win: u32,
    status: MatchStatus,
    sets_one: u32,
    sets_two: u32,
    first_server: Option<Side>,
    current_set: Option<Set>,
    winner: Option<Side>,
    completed_sets: Vec<SetScore>,
    scheduled_start: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    duration: Duration,
    stopwatch: Stopwatch,
}

impl Match {
    /// New match, Pending or Delayed depending on `scheduled_start`.
    pub fn schedule(
        player_one_id: impl Into<String>,
        player_two_id: impl Into<String>,
        sets_to_win: u32,
        scheduled_start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self, ScoringError> {
        let player_one_id = player_one_id.into();
        let player_two_id = player_two_id.into();

        if sets_to_win == 0 {
            return Err(ScoringError::InvalidConfiguration(
                "a match needs at least one set to win".to_string(),
            ));
        }
        if player_one_id == player_two_id {
            return Err(ScoringError::InvalidConfiguration(format!(
                "player {} cannot play against themselves",
                player_one_id
            )));
        }

        Ok(Match {
            id: Uuid::new_v4().to_string(),
            player_one_id,
            player_two_id,
            sets_to_win,
            status: MatchStatus::for_schedule(scheduled_start, now),
            sets_one: 0,
            sets_two: 0,
            first_server: None,
            current_set: None,
            winner: None,
            completed_sets: Vec::new(),
            scheduled_start,
            started_at: None,
            duration: Duration::ZERO,
            stopwatch: Stopwatch::new(),
        })
    }

    /// Match restored from its persisted record with no set in play.
    pub fn from_record(record: &MatchRecord) -> Self {
        let winner = match record.winner_id.as_deref() {
            Some(id) if id == record.player_one_id => Some(Side::PlayerOne),
            Some(id) if id == record.player_two_id => Some(Side::PlayerTwo),
            _ => None,
        };

        Match {
            id: record.id.clone(),
            player_one_id: record.player_one_id.clone(),
            player_two_id: record.player_two_id.clone(),
            sets_to_win: record.sets_to_win,
            status: record.status,
            sets_one: record.sets_one,
            sets_two: record.sets_two,
            first_server: None,
            current_set: None,
            winner,
            completed_sets: Vec::new(),
            scheduled_start: record.scheduled_start,
            started_at: record.started_at,
            duration: Duration::from_millis(record.duration_ms),
            stopwatch: Stopwatch::new(),
        }
    }

    pub fn with_completed_sets(mut self, completed_sets: Vec<SetScore>) -> Self {
        self.completed_sets = completed_sets;
        self
    }

    pub fn to_match_record(&self) -> MatchRecord {
        MatchRecord {
            id: self.id.clone(),
            player_one_id: self.player_one_id.clone(),
            player_two_id: self.player_two_id.clone(),
            sets_to_win: self.sets_to_win,
            status: self.status,
            winner_id: self.winner_id().map(str::to_string),
            sets_one: self.sets_one,
            sets_two: self.sets_two,
            scheduled_start: self.scheduled_start,
            started_at: self.started_at,
            duration_ms: timer::whole_millis(self.elapsed()),
        }
    }

    pub fn start(&mut self, first_server: Side, now: DateTime<Utc>) -> Result<(), ScoringError> {
        let next = self.status.transition(MatchAction::Start)?;

        let mut set = Set::new(1, self.sets_to_win, first_server);
        set.initialize_current_unit(first_server)?;

        self.status = next;
        self.first_server = Some(first_server);
        self.started_at = Some(now);
        self.current_set = Some(set);
        self.stopwatch.start();
        info!(match_id = %self.id, %first_server, "Match started");
        Ok(())
    }

    /// Feeds one point to the unit in play and bubbles any result upwards.
    pub fn score_point(&mut self, side: Side) -> Result<PointOutcome, ScoringError> {
        if !self.status.is_in_play() {
            return Err(ScoringError::InvariantViolation(format!(
                "cannot score a point while the match is {}",
                self.status
            )));
        }

        let set = self
            .current_set
            .as_mut()
            .ok_or_else(|| ScoringError::InvariantViolation("no set in play".to_string()))?;
        let set_number = set.set_number();

        let (unit_winner, tiebreak) = match set.unit_mut() {
            SetUnit::Game(game) => (game.add_point(side)?, None),
            SetUnit::Tiebreak(tiebreak) => {
                let winner = tiebreak.add_point(side)?;
                (winner, Some(tiebreak.to_tiebreak_record(&self.id)))
            }
            SetUnit::Idle => {
                return Err(ScoringError::InvariantViolation(format!(
                    "set {} has no unit in play",
                    set_number
                )))
            }
        };

        let Some(unit_winner) = unit_winner else {
            return Ok(PointOutcome::PointScored);
        };

        match set.add_game_result(unit_winner)? {
            SetProgress::Undecided => {
                set.change_unit()?;
                debug!(match_id = %self.id, "Game won by {}", unit_winner);
                Ok(PointOutcome::GameWon {
                    winner: unit_winner,
                })
            }
            SetProgress::TiebreakStarted { target_points } => {
                Ok(PointOutcome::TiebreakStarted { target_points })
            }
            SetProgress::Won(set_winner) => self.complete_set(set_winner, tiebreak),
            other => Err(ScoringError::InvariantViolation(format!(
                "unexpected set progress {:?} after a game result",
                other
            ))),
        }
    }

    fn complete_set(
        &mut self,
        winner: Side,
        tiebreak: Option<TiebreakRecord>,
    ) -> Result<PointOutcome, ScoringError> {
        let sets_after = match winner {
            Side::PlayerOne => self.sets_one + 1,
            Side::PlayerTwo => self.sets_two + 1,
        };
        let match_over = sets_after >= self.sets_to_win;
        let next_status = if match_over {
            Some(self.status.transition(MatchAction::Complete)?)
        } else {
            None
        };

        let set = self
            .current_set
            .take()
            .ok_or_else(|| ScoringError::InvariantViolation("no set in play".to_string()))?;
        let mut finished = set.to_set_record(&self.id);
        finished.is_tiebreak = tiebreak.is_some();
        self.completed_sets
            .push(SetScore::from_records(&finished, tiebreak.as_ref()));
        match winner {
            Side::PlayerOne => self.sets_one = sets_after,
            Side::PlayerTwo => self.sets_two = sets_after,
        }

        if let Some(next_status) = next_status {
            self.status = next_status;
            self.winner = Some(winner);
            let elapsed = self.stopwatch.stop();
            self.duration += elapsed;
            info!(
                match_id = %self.id,
                "Match won by {} {}-{}", winner, self.sets_one, self.sets_two
            );
            return Ok(PointOutcome::MatchWon {
                winner,
                finished,
                tiebreak,
                elapsed,
            });
        }

        // Service alternation runs on across the set boundary.
        let next_server = set.next_set_server();
        let mut next = Set::new(set.set_number() + 1, self.sets_to_win, next_server);
        next.initialize_current_unit(next_server)?;
        info!(
            match_id = %self.id,
            set = next.set_number(),
            server = %next_server,
            "New set started"
        );
        self.current_set = Some(next);

        Ok(PointOutcome::SetWon {
            winner,
            finished,
            tiebreak,
        })
    }

    pub fn suspend(&mut self) -> Result<Stoppage, ScoringError> {
        let next = self.status.transition(MatchAction::Suspend)?;

        let progress = self
            .current_set
            .take()
            .map(|mut set| set.interrupt(Interruption::Suspend))
            .unwrap_or(SetProgress::Undecided);
        let elapsed = self.stopwatch.stop();
        self.duration += elapsed;
        self.status = next;
        info!(match_id = %self.id, ?progress, "Match suspended");

        Ok(Stoppage { progress, elapsed })
    }

    /// Rebuilds the set in play from its persisted snapshot.
    ///
    /// Nothing changes unless every check passes, so a failed resume leaves
    /// the match Suspended and can be retried.
    pub fn resume(
        &mut self,
        set_snapshot: &SetRecord,
        unit_snapshot: UnitSnapshot,
    ) -> Result<(), ScoringError> {
        let next = self.status.transition(MatchAction::Resume)?;
        if self.current_set.is_some() {
            return Err(ScoringError::InvariantViolation(format!(
                "match {} already has a set in play",
                self.id
            )));
        }
        if set_snapshot.match_id != self.id {
            return Err(ScoringError::InvariantViolation(format!(
                "set snapshot belongs to match {}",
                set_snapshot.match_id
            )));
        }

        let mut set = Set::from_set_record(set_snapshot, self.sets_to_win);
        set.resume_current_unit(unit_snapshot)?;

        if set.set_number() == 1 && self.first_server.is_none() {
            self.first_server = Some(set.opening_server());
        }
        info!(
            match_id = %self.id,
            set = set.set_number(),
            tiebreak = set.resumed_in_tiebreak(),
            server = ?set.current_server(),
            "Match resumed"
        );
        self.current_set = Some(set);
        self.status = next;
        self.stopwatch.start();
        Ok(())
    }

    /// Operator ends the match early and names the winner.
    pub fn finish(&mut self, winner: Side) -> Result<Stoppage, ScoringError> {
        let next = self.status.transition(MatchAction::Finish)?;

        let progress = match self.current_set.take() {
            Some(mut set) => {
                let progress = set.interrupt(Interruption::Finish);
                let (games_one, games_two) = set.games();
                if set.games_played() > 0 || set.tiebreak().is_some() {
                    self.completed_sets.push(SetScore {
                        set_number: set.set_number(),
                        games_one,
                        games_two,
                        tiebreak_points: set.tiebreak().map(|tiebreak| tiebreak.points()),
                    });
                }
                progress
            }
            None => SetProgress::Undecided,
        };
        let elapsed = self.stopwatch.stop();
        self.duration += elapsed;
        self.status = next;
        self.winner = Some(winner);
        info!(match_id = %self.id, "Match finished by operator, winner {}", winner);

        Ok(Stoppage { progress, elapsed })
    }

    pub fn scoreboard(&self) -> Scoreboard {
        let current = self.current_set.as_ref().map(|set| {
            let (games_one, games_two) = set.games();
            let points = match set.unit() {
                SetUnit::Game(game) => {
                    let (one, two) = game.score_labels();
                    Some(PointScore::Game { one, two })
                }
                SetUnit::Tiebreak(tiebreak) => {
                    let (one, two) = tiebreak.points();
                    Some(PointScore::Tiebreak {
                        one,
                        two,
                        target_points: tiebreak.target_points(),
                    })
                }
                SetUnit::Idle => None,
            };
            CurrentScore {
                set_number: set.set_number(),
                games_one,
                games_two,
                points,
                server: set.current_server(),
            }
        });

        Scoreboard {
            player_one_id: self.player_one_id.clone(),
            player_two_id: self.player_two_id.clone(),
            status: self.status,
            sets_one: self.sets_one,
            sets_two: self.sets_two,
            completed_sets: self.completed_sets.clone(),
            current,
            winner: self.winner,
            elapsed: self.elapsed(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn player_id(&self, side: Side) -> &str {
        match side {
            Side::PlayerOne => &self.player_one_id,
            Side::PlayerTwo => &self.player_two_id,
        }
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn sets_to_win(&self) -> u32 {
        self.sets_to_win
    }

    pub fn sets(&self) -> (u32, u32) {
        (self.sets_one, self.sets_two)
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn winner_id(&self) -> Option<&str> {
        self.winner.map(|side| self.player_id(side))
    }

    pub fn first_server(&self) -> Option<Side> {
        self.first_server
    }

    pub fn current_set(&self) -> Option<&Set> {
        self.current_set.as_ref()
    }

    pub fn completed_sets(&self) -> &[SetScore] {
        &self.completed_sets
    }

    pub fn scheduled_start(&self) -> DateTime<Utc> {
        self.scheduled_start
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Total play time, including the run in progress.
    pub fn elapsed(&self) -> Duration {
        self.duration + self.stopwatch.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::records::PointRecord;
    use crate::rotation;
    use chrono::Duration as ChronoDuration;

    const ONE: Side = Side::PlayerOne;
    const TWO: Side = Side::PlayerTwo;

    fn started_match(sets_to_win: u32, first_server: Side) -> Match {
        let now = Utc::now();
        let mut tennis_match = Match::schedule("alice", "bob", sets_to_win, now, now).unwrap();
        tennis_match.start(first_server, now).unwrap();
        tennis_match
    }

    fn win_game(tennis_match: &mut Match, side: Side) -> PointOutcome {
        let mut outcome = PointOutcome::PointScored;
        for _ in 0..4 {
            outcome = tennis_match.score_point(side).unwrap();
        }
        outcome
    }

    fn win_games(tennis_match: &mut Match, side: Side, games: u32) -> PointOutcome {
        let mut outcome = PointOutcome::PointScored;
        for _ in 0..games {
            outcome = win_game(tennis_match, side);
        }
        outcome
    }

    fn reach_six_all(tennis_match: &mut Match) -> PointOutcome {
        win_games(tennis_match, ONE, 5);
        win_games(tennis_match, TWO, 6);
        win_game(tennis_match, ONE)
    }

    #[test]
    fn test_schedule_status_follows_start_time() {
        let now = Utc::now();
        let future = Match::schedule("a", "b", 2, now + ChronoDuration::hours(1), now).unwrap();
        assert_eq!(future.status(), MatchStatus::Pending);
        let late = Match::schedule("a", "b", 2, now - ChronoDuration::minutes(5), now).unwrap();
        assert_eq!(late.status(), MatchStatus::Delayed);
    }

    #[test]
    fn test_schedule_rejects_same_player_and_zero_sets() {
        let now = Utc::now();
        assert!(matches!(
            Match::schedule("a", "a", 2, now, now),
            Err(ScoringError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Match::schedule("a", "b", 0, now, now),
            Err(ScoringError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_point_before_start_is_rejected() {
        let now = Utc::now();
        let mut tennis_match = Match::schedule("a", "b", 2, now, now).unwrap();
        assert!(tennis_match.score_point(ONE).is_err());
        assert_eq!(tennis_match.sets(), (0, 0));
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut tennis_match = started_match(2, ONE);
        let err = tennis_match.start(TWO, Utc::now()).unwrap_err();
        assert_eq!(
            err,
            ScoringError::InvalidTransition {
                from: MatchStatus::Started,
                action: MatchAction::Start
            }
        );
        assert_eq!(tennis_match.first_server(), Some(ONE));
    }

    #[test]
    fn test_straight_sets_win() {
        let mut tennis_match = started_match(2, ONE);
        let first = win_games(&mut tennis_match, ONE, 6);
        assert!(matches!(first, PointOutcome::SetWon { winner: ONE, .. }));
        let last = win_games(&mut tennis_match, ONE, 6);

        match last {
            PointOutcome::MatchWon {
                winner, finished, ..
            } => {
                assert_eq!(winner, ONE);
                assert_eq!(finished.set_number, 2);
                assert_eq!((finished.games_one, finished.games_two), (6, 0));
            }
            other => panic!("expected match win, got {:?}", other),
        }
        assert_eq!(tennis_match.status(), MatchStatus::Finished);
        assert_eq!(tennis_match.sets(), (2, 0));
        assert_eq!(tennis_match.winner_id(), Some("alice"));
        assert!(tennis_match.current_set().is_none());
        assert!(tennis_match.score_point(ONE).is_err());
    }

    #[test]
    fn test_game_won_outcome() {
        let mut tennis_match = started_match(2, TWO);
        assert_eq!(
            win_game(&mut tennis_match, ONE),
            PointOutcome::GameWon { winner: ONE }
        );
        let set = tennis_match.current_set().unwrap();
        assert_eq!(set.games(), (1, 0));
        assert_eq!(set.current_server(), Some(ONE));
    }

    #[test]
    fn test_tiebreak_to_seven_six() {
        let mut tennis_match = started_match(2, ONE);
        assert_eq!(
            reach_six_all(&mut tennis_match),
            PointOutcome::TiebreakStarted { target_points: 7 }
        );

        for _ in 0..5 {
            tennis_match.score_point(TWO).unwrap();
        }
        let mut outcome = PointOutcome::PointScored;
        for _ in 0..7 {
            outcome = tennis_match.score_point(ONE).unwrap();
        }

        match outcome {
            PointOutcome::SetWon {
                winner,
                finished,
                tiebreak,
            } => {
                assert_eq!(winner, ONE);
                assert_eq!((finished.games_one, finished.games_two), (7, 6));
                assert!(finished.is_tiebreak);
                let tiebreak = tiebreak.unwrap();
                assert_eq!((tiebreak.points_one, tiebreak.points_two), (7, 5));
            }
            other => panic!("expected set win, got {:?}", other),
        }
        assert_eq!(tennis_match.completed_sets()[0].to_string(), "7-6(5)");
    }

    #[test]
    fn test_deciding_set_plays_super_tiebreak() {
        let mut tennis_match = started_match(2, ONE);
        win_games(&mut tennis_match, ONE, 6);
        win_games(&mut tennis_match, TWO, 6);
        assert_eq!(
            reach_six_all(&mut tennis_match),
            PointOutcome::TiebreakStarted { target_points: 10 }
        );
    }

    #[test]
    fn test_next_set_server_continues_rotation() {
        let mut tennis_match = started_match(2, ONE);
        win_games(&mut tennis_match, TWO, 3);
        win_games(&mut tennis_match, ONE, 6);
        // Nine games played: player two opens set two.
        let set = tennis_match.current_set().unwrap();
        assert_eq!(set.set_number(), 2);
        assert_eq!(set.opening_server(), rotation::serves_first(9, ONE));
        assert_eq!(set.opening_server(), TWO);
        assert_eq!(set.current_server(), Some(TWO));
    }

    #[test]
    fn test_suspend_mid_tiebreak_signals_and_resume_restores_server() {
        let mut tennis_match = started_match(2, ONE);
        reach_six_all(&mut tennis_match);
        for side in [ONE, TWO, ONE, TWO, ONE] {
            tennis_match.score_point(side).unwrap();
        }
        let set_record = tennis_match
            .current_set()
            .unwrap()
            .to_set_record(tennis_match.id());
        let tiebreak_record = tennis_match
            .current_set()
            .unwrap()
            .tiebreak()
            .unwrap()
            .to_tiebreak_record(tennis_match.id());
        let server_before = tennis_match.current_set().unwrap().current_server();

        let stoppage = tennis_match.suspend().unwrap();
        assert_eq!(stoppage.progress, SetProgress::TiebreakSuspended);
        assert_eq!(tennis_match.status(), MatchStatus::Suspended);
        assert!(tennis_match.score_point(ONE).is_err());

        tennis_match
            .resume(&set_record, UnitSnapshot::Tiebreak(tiebreak_record.clone()))
            .unwrap();
        let set = tennis_match.current_set().unwrap();
        let tiebreak = set.tiebreak().unwrap();
        assert_eq!(tiebreak.points(), (3, 2));
        assert_eq!(set.current_server(), server_before);
        assert_eq!(set.current_server(), Some(rotation::tiebreak_server(5, ONE)));
        assert_eq!(tiebreak.to_tiebreak_record(tennis_match.id()), tiebreak_record);
    }

    #[test]
    fn test_failed_resume_leaves_match_suspended() {
        let mut tennis_match = started_match(2, ONE);
        win_game(&mut tennis_match, ONE);
        let set_record = tennis_match
            .current_set()
            .unwrap()
            .to_set_record(tennis_match.id());
        tennis_match.suspend().unwrap();

        let bad = PointRecord {
            match_id: tennis_match.id().to_string(),
            set_number: 1,
            game_number: 2,
            score_one: "50".to_string(),
            score_two: "0".to_string(),
        };
        assert!(matches!(
            tennis_match.resume(&set_record, UnitSnapshot::Game(Some(bad))),
            Err(ScoringError::InvalidScoreLabel(_))
        ));
        assert_eq!(tennis_match.status(), MatchStatus::Suspended);
        assert!(tennis_match.current_set().is_none());

        tennis_match
            .resume(&set_record, UnitSnapshot::Game(None))
            .unwrap();
        assert_eq!(tennis_match.status(), MatchStatus::Started);
        assert!(matches!(
            tennis_match.resume(&set_record, UnitSnapshot::Game(None)),
            Err(ScoringError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_resume_rejects_foreign_snapshot() {
        let mut tennis_match = started_match(2, ONE);
        let mut set_record = tennis_match
            .current_set()
            .unwrap()
            .to_set_record(tennis_match.id());
        tennis_match.suspend().unwrap();
        set_record.match_id = "someone-else".to_string();
        assert!(tennis_match
            .resume(&set_record, UnitSnapshot::Game(None))
            .is_err());
        assert_eq!(tennis_match.status(), MatchStatus::Suspended);
    }

    #[test]
    fn test_operator_finish_mid_tiebreak() {
        let mut tennis_match = started_match(2, ONE);
        reach_six_all(&mut tennis_match);
        tennis_match.score_point(TWO).unwrap();

        let stoppage = tennis_match.finish(TWO).unwrap();
        assert_eq!(stoppage.progress, SetProgress::TiebreakFinished);
        assert_eq!(tennis_match.status(), MatchStatus::Finished);
        assert_eq!(tennis_match.winner_id(), Some("bob"));
        assert_eq!(tennis_match.completed_sets()[0].to_string(), "6-6(0)");
        assert!(tennis_match.finish(ONE).is_err());
    }

    #[test]
    fn test_finish_requires_started() {
        let now = Utc::now();
        let mut tennis_match = Match::schedule("a", "b", 2, now, now).unwrap();
        assert!(tennis_match.finish(ONE).is_err());
        assert_eq!(tennis_match.winner(), None);
    }

    #[test]
    fn test_match_record_round_trip() {
        let mut tennis_match = started_match(2, ONE);
        win_games(&mut tennis_match, TWO, 6);
        tennis_match.suspend().unwrap();

        let record = tennis_match.to_match_record();
        assert_eq!(record.status, MatchStatus::Suspended);
        assert_eq!((record.sets_one, record.sets_two), (0, 1));

        let restored = Match::from_record(&record);
        assert_eq!(restored.to_match_record(), record);
    }

    #[test]
    fn test_scoreboard_reflects_play() {
        let mut tennis_match = started_match(2, TWO);
        win_game(&mut tennis_match, ONE);
        tennis_match.score_point(TWO).unwrap();
        let board = tennis_match.scoreboard();
        let current = board.current.unwrap();
        assert_eq!((current.games_one, current.games_two), (1, 0));
        assert_eq!(
            current.points,
            Some(PointScore::Game {
                one: "0",
                two: "15"
            })
        );
        assert_eq!(current.server, Some(ONE));
    }
}
