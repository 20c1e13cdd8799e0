use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::ScoringConfig;
use crate::models::match_status::{MatchAction, MatchStatus};
use crate::models::records::{MatchRecord, PointRecord, SetRecord, TiebreakRecord, WriteMode};
use crate::models::scoreboard::SetScore;
use crate::models::set::{SetProgress, SetUnit, UnitSnapshot};
use crate::models::side::Side;
use crate::models::tennis_match::{Match, PointOutcome, Stoppage};
use crate::repositories::errors::score_repository_errors::ScoreRepositoryError;
use crate::repositories::player_repository::PlayerRepository;
use crate::repositories::score_repository::ScoreRepository;
use crate::services::errors::match_service_errors::MatchServiceError;
use crate::timer::whole_millis;

/// Operator-facing entry point: drives a [`Match`] and records every engine
/// event with the score repository.
#[derive(Clone)]
pub struct MatchService {
    score_repository: Arc<dyn ScoreRepository + Send + Sync>,
    player_repository: Arc<dyn PlayerRepository + Send + Sync>,
    config: ScoringConfig,
}

impl MatchService {
    pub fn new(
        score_repository: Arc<dyn ScoreRepository + Send + Sync>,
        player_repository: Arc<dyn PlayerRepository + Send + Sync>,
        config: ScoringConfig,
    ) -> Self {
        MatchService {
            score_repository,
            player_repository,
            config,
        }
    }

    pub fn schedule_match(
        &self,
        player_one_id: &str,
        player_two_id: &str,
        sets_to_win: u32,
        scheduled_start: DateTime<Utc>,
    ) -> Result<Match, MatchServiceError> {
        if player_one_id == player_two_id {
            return Err(MatchServiceError::ValidationError(format!(
                "player {} cannot play against themselves",
                player_one_id
            )));
        }
        self.config.validate_sets_to_win(sets_to_win)?;

        for player_id in [player_one_id, player_two_id] {
            if !self.player_repository.player_exists(player_id)? {
                warn!(player_id, "Cannot schedule match for unknown player");
                return Err(MatchServiceError::PlayerNotFound(player_id.to_string()));
            }
        }

        let tennis_match = Match::schedule(
            player_one_id,
            player_two_id,
            sets_to_win,
            scheduled_start,
            Utc::now(),
        )?;
        self.score_repository
            .create_match(&tennis_match.to_match_record())?;

        info!(
            match_id = tennis_match.id(),
            status = %tennis_match.status(),
            "Match scheduled: {} vs {}", player_one_id, player_two_id
        );
        Ok(tennis_match)
    }

    pub fn start_match(&self, match_id: &str) -> Result<Match, MatchServiceError> {
        let record = self.load_match(match_id)?;
        let mut tennis_match = Match::from_record(&record);

        let now = Utc::now();
        tennis_match.start(self.config.first_server.pick(), now)?;

        self.write(
            "match status",
            self.score_repository
                .update_match_status(match_id, MatchStatus::Started),
        )?;
        self.write(
            "match start time",
            self.score_repository.mark_match_started(match_id, now),
        )?;
        self.persist_new_set(&tennis_match)?;

        Ok(tennis_match)
    }

    /// Point for the player numbered 1 or 2, as the operator enters it.
    pub fn award_point(
        &self,
        tennis_match: &mut Match,
        player: u8,
    ) -> Result<PointOutcome, MatchServiceError> {
        let side = Side::try_from(player)?;
        self.score_point(tennis_match, side)
    }

    /// Scores a point and persists what it changed.
    ///
    /// A write failure is returned after the point has been scored in memory.
    pub fn score_point(
        &self,
        tennis_match: &mut Match,
        side: Side,
    ) -> Result<PointOutcome, MatchServiceError> {
        let outcome = tennis_match.score_point(side)?;
        self.persist_outcome(tennis_match, &outcome)?;
        Ok(outcome)
    }

    pub fn suspend_match(&self, tennis_match: &mut Match) -> Result<Stoppage, MatchServiceError> {
        let stoppage = tennis_match.suspend()?;
        let match_id = tennis_match.id();

        if stoppage.progress == SetProgress::TiebreakSuspended {
            info!(match_id, "Suspended during a tiebreak");
        }
        self.write(
            "match status",
            self.score_repository
                .update_match_status(match_id, MatchStatus::Suspended),
        )?;
        self.write(
            "match duration",
            self.score_repository
                .update_match_duration(match_id, whole_millis(stoppage.elapsed)),
        )?;
        Ok(stoppage)
    }

    /// Loads a suspended match and rebuilds the set and unit in play.
    ///
    /// A missing set or tiebreak snapshot aborts the resume and leaves the
    /// stored match Suspended.
    pub fn resume_match(&self, match_id: &str) -> Result<Match, MatchServiceError> {
        let record = self.load_match(match_id)?;
        record.status.transition(MatchAction::Resume)?;

        let set_snapshot = self
            .score_repository
            .load_latest_set(match_id)?
            .ok_or_else(|| {
                MatchServiceError::SnapshotNotFound(format!("no set recorded for match {}", match_id))
            })?;

        let unit_snapshot = if set_snapshot.is_tiebreak {
            let tiebreak = self
                .score_repository
                .load_latest_tiebreak(match_id, set_snapshot.set_number)?
                .ok_or_else(|| {
                    MatchServiceError::SnapshotNotFound(format!(
                        "no tiebreak recorded for set {} of match {}",
                        set_snapshot.set_number, match_id
                    ))
                })?;
            UnitSnapshot::Tiebreak(tiebreak)
        } else {
            UnitSnapshot::Game(self.latest_game_or_default(match_id, &set_snapshot))
        };
        let loaded_game = match &unit_snapshot {
            UnitSnapshot::Game(Some(record)) => Some((record.set_number, record.game_number)),
            _ => None,
        };

        let completed_sets = self.completed_set_lines(match_id, set_snapshot.set_number);
        let mut tennis_match = Match::from_record(&record).with_completed_sets(completed_sets);
        tennis_match.resume(&set_snapshot, unit_snapshot)?;

        // A fresh game stood in for a missing record: give it a row to update.
        if let Some(set) = tennis_match.current_set() {
            if let SetUnit::Game(game) = set.unit() {
                if loaded_game != Some((set.set_number(), game.game_number())) {
                    let point = game.to_point_record(match_id, set.set_number());
                    let inserted = match self
                        .score_repository
                        .save_point_record(&point, WriteMode::Insert)
                    {
                        Err(ScoreRepositoryError::AlreadyExists) => self
                            .score_repository
                            .save_point_record(&point, WriteMode::Update),
                        other => other,
                    };
                    self.write("point record", inserted)?;
                }
            }
        }

        self.write(
            "match status",
            self.score_repository
                .update_match_status(match_id, MatchStatus::Started),
        )?;
        Ok(tennis_match)
    }

    /// Operator ends the match (retirement, walkover) and names the winner.
    pub fn finish_match(
        &self,
        tennis_match: &mut Match,
        winner: Side,
    ) -> Result<Stoppage, MatchServiceError> {
        let stoppage = tennis_match.finish(winner)?;

        if stoppage.progress == SetProgress::TiebreakFinished {
            info!(match_id = tennis_match.id(), "Finished during a tiebreak");
        }
        self.persist_match_end(tennis_match, winner, whole_millis(stoppage.elapsed))?;
        Ok(stoppage)
    }

    fn persist_outcome(
        &self,
        tennis_match: &Match,
        outcome: &PointOutcome,
    ) -> Result<(), MatchServiceError> {
        let match_id = tennis_match.id();

        match outcome {
            PointOutcome::PointScored => {
                let Some(set) = tennis_match.current_set() else {
                    return Ok(());
                };
                match set.unit() {
                    SetUnit::Game(game) => self.write(
                        "point record",
                        self.score_repository.save_point_record(
                            &game.to_point_record(match_id, set.set_number()),
                            WriteMode::Update,
                        ),
                    ),
                    SetUnit::Tiebreak(tiebreak) => self.write(
                        "tiebreak record",
                        self.score_repository.save_tiebreak_record(
                            &tiebreak.to_tiebreak_record(match_id),
                            WriteMode::Update,
                        ),
                    ),
                    SetUnit::Idle => Ok(()),
                }
            }
            PointOutcome::GameWon { .. } => {
                let Some(set) = tennis_match.current_set() else {
                    return Ok(());
                };
                self.write(
                    "set record",
                    self.score_repository
                        .save_set_record(&set.to_set_record(match_id), WriteMode::Update),
                )?;
                if let Some(game) = set.game() {
                    self.write(
                        "point record",
                        self.score_repository.save_point_record(
                            &game.to_point_record(match_id, set.set_number()),
                            WriteMode::Insert,
                        ),
                    )?;
                }
                Ok(())
            }
            PointOutcome::TiebreakStarted { .. } => {
                let Some(set) = tennis_match.current_set() else {
                    return Ok(());
                };
                self.write(
                    "set record",
                    self.score_repository
                        .save_set_record(&set.to_set_record(match_id), WriteMode::Update),
                )?;
                if let Some(tiebreak) = set.tiebreak() {
                    self.write(
                        "tiebreak record",
                        self.score_repository.save_tiebreak_record(
                            &tiebreak.to_tiebreak_record(match_id),
                            WriteMode::Insert,
                        ),
                    )?;
                }
                Ok(())
            }
            PointOutcome::SetWon {
                finished, tiebreak, ..
            } => {
                self.persist_finished_set(tennis_match, finished, tiebreak.as_ref())?;
                self.persist_new_set(tennis_match)
            }
            PointOutcome::MatchWon {
                winner,
                finished,
                tiebreak,
                elapsed,
            } => {
                self.persist_finished_set(tennis_match, finished, tiebreak.as_ref())?;
                self.persist_match_end(tennis_match, *winner, whole_millis(*elapsed))
            }
        }
    }

    fn persist_finished_set(
        &self,
        tennis_match: &Match,
        finished: &SetRecord,
        tiebreak: Option<&TiebreakRecord>,
    ) -> Result<(), MatchServiceError> {
        if let Some(tiebreak) = tiebreak {
            self.write(
                "tiebreak record",
                self.score_repository
                    .save_tiebreak_record(tiebreak, WriteMode::Update),
            )?;
        }
        self.write(
            "set record",
            self.score_repository
                .save_set_record(finished, WriteMode::Update),
        )?;
        let (sets_one, sets_two) = tennis_match.sets();
        self.write(
            "match sets",
            self.score_repository
                .update_match_sets(tennis_match.id(), sets_one, sets_two),
        )
    }

    fn persist_new_set(&self, tennis_match: &Match) -> Result<(), MatchServiceError> {
        let match_id = tennis_match.id();
        let Some(set) = tennis_match.current_set() else {
            return Ok(());
        };
        self.write(
            "set record",
            self.score_repository
                .save_set_record(&set.to_set_record(match_id), WriteMode::Insert),
        )?;
        if let Some(game) = set.game() {
            self.write(
                "point record",
                self.score_repository.save_point_record(
                    &game.to_point_record(match_id, set.set_number()),
                    WriteMode::Insert,
                ),
            )?;
        }
        Ok(())
    }

    fn persist_match_end(
        &self,
        tennis_match: &Match,
        winner: Side,
        elapsed_ms: u64,
    ) -> Result<(), MatchServiceError> {
        let match_id = tennis_match.id();
        let winner_id = tennis_match.player_id(winner);
        let loser_id = tennis_match.player_id(winner.opponent());

        self.write(
            "match status",
            self.score_repository
                .update_match_status(match_id, MatchStatus::Finished),
        )?;
        self.write(
            "match winner",
            self.score_repository.update_match_winner(match_id, winner_id),
        )?;
        self.write(
            "match duration",
            self.score_repository
                .update_match_duration(match_id, elapsed_ms),
        )?;
        self.player_repository
            .record_match_result(winner_id, loser_id)
            .map_err(|e| {
                error!(match_id, winner_id, "Failed to record player results: {}", e);
                MatchServiceError::from(e)
            })?;

        info!(
            match_id,
            winner_id,
            score = %tennis_match.scoreboard().set_line(),
            "Match finished"
        );
        Ok(())
    }

    fn load_match(&self, match_id: &str) -> Result<MatchRecord, MatchServiceError> {
        match self.score_repository.get_match(match_id) {
            Ok(record) => Ok(record),
            Err(ScoreRepositoryError::NotFound) => {
                warn!(match_id, "Match not found");
                Err(MatchServiceError::MatchNotFound(match_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Latest point record, or `None` when it cannot be read, belongs to an
    /// earlier set or to a game the set score already counts; the set then
    /// starts a fresh game.
    fn latest_game_or_default(
        &self,
        match_id: &str,
        set_snapshot: &SetRecord,
    ) -> Option<PointRecord> {
        match self.score_repository.load_latest_game(match_id) {
            Ok(Some(record))
                if record.set_number == set_snapshot.set_number
                    && record.game_number == set_snapshot.games_played() + 1 =>
            {
                Some(record)
            }
            Ok(Some(record)) if record.set_number == set_snapshot.set_number => {
                warn!(
                    match_id,
                    game = record.game_number,
                    games_played = set_snapshot.games_played(),
                    "Latest game is already counted in the set score, starting a fresh game"
                );
                None
            }
            Ok(Some(record)) => {
                warn!(
                    match_id,
                    record_set = record.set_number,
                    set = set_snapshot.set_number,
                    "Latest game belongs to another set, starting a fresh game"
                );
                None
            }
            Ok(None) => {
                warn!(match_id, "No game recorded, starting a fresh game");
                None
            }
            Err(e) => {
                warn!(match_id, "Could not load latest game, starting a fresh game: {}", e);
                None
            }
        }
    }

    /// Score lines of the sets before `current_set`. Read failures only cost
    /// the display lines.
    fn completed_set_lines(&self, match_id: &str, current_set: u32) -> Vec<SetScore> {
        let records = match self.score_repository.load_set_records(match_id) {
            Ok(records) => records,
            Err(e) => {
                warn!(match_id, "Could not load completed sets: {}", e);
                return Vec::new();
            }
        };

        records
            .iter()
            .filter(|record| record.set_number < current_set)
            .map(|record| {
                let tiebreak = if record.is_tiebreak {
                    self.score_repository
                        .load_latest_tiebreak(match_id, record.set_number)
                        .unwrap_or_else(|e| {
                            warn!(match_id, set = record.set_number, "Could not load tiebreak: {}", e);
                            None
                        })
                } else {
                    None
                };
                SetScore::from_records(record, tiebreak.as_ref())
            })
            .collect()
    }

    fn write(
        &self,
        what: &str,
        result: Result<(), ScoreRepositoryError>,
    ) -> Result<(), MatchServiceError> {
        result.map_err(|e| {
            error!("Failed to write {}: {}", what, e);
            MatchServiceError::from(e)
        })
    }
}
