use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard};

use crate::models::match_status::MatchStatus;
use crate::models::records::{MatchRecord, PointRecord, SetRecord, TiebreakRecord, WriteMode};
use crate::repositories::errors::score_repository_errors::ScoreRepositoryError;

#[cfg(test)]
use mockall::automock;

/// Storage for match metadata and the point, set and tiebreak snapshots
/// that let a suspended match be resumed.
#[cfg_attr(test, automock)]
pub trait ScoreRepository: Send + Sync {
    fn create_match(&self, record: &MatchRecord) -> Result<(), ScoreRepositoryError>;
    fn get_match(&self, match_id: &str) -> Result<MatchRecord, ScoreRepositoryError>;
    fn update_match_status(
        &self,
        match_id: &str,
        status: MatchStatus,
    ) -> Result<(), ScoreRepositoryError>;
    fn mark_match_started(
        &self,
        match_id: &str,
        started_at: DateTime<Utc>,
    ) -> Result<(), ScoreRepositoryError>;
    fn update_match_winner(&self, match_id: &str, winner_id: &str)
        -> Result<(), ScoreRepositoryError>;
    /// Adds `delta_ms` milliseconds to the stored play time.
    fn update_match_duration(&self, match_id: &str, delta_ms: u64)
        -> Result<(), ScoreRepositoryError>;
    fn update_match_sets(
        &self,
        match_id: &str,
        sets_one: u32,
        sets_two: u32,
    ) -> Result<(), ScoreRepositoryError>;

    fn save_point_record(
        &self,
        record: &PointRecord,
        mode: WriteMode,
    ) -> Result<(), ScoreRepositoryError>;
    fn save_set_record(&self, record: &SetRecord, mode: WriteMode)
        -> Result<(), ScoreRepositoryError>;
    fn save_tiebreak_record(
        &self,
        record: &TiebreakRecord,
        mode: WriteMode,
    ) -> Result<(), ScoreRepositoryError>;

    /// Point record of the most recent game of the match.
    fn load_latest_game(&self, match_id: &str) -> Result<Option<PointRecord>, ScoreRepositoryError>;
    fn load_latest_set(&self, match_id: &str) -> Result<Option<SetRecord>, ScoreRepositoryError>;
    fn load_latest_tiebreak(
        &self,
        match_id: &str,
        set_number: u32,
    ) -> Result<Option<TiebreakRecord>, ScoreRepositoryError>;
    /// Every set record of the match, ordered by set number.
    fn load_set_records(&self, match_id: &str) -> Result<Vec<SetRecord>, ScoreRepositoryError>;
}

#[derive(Default)]
struct ScoreTables {
    matches: HashMap<String, MatchRecord>,
    points: HashMap<(String, u32, u32), PointRecord>,
    sets: HashMap<(String, u32), SetRecord>,
    tiebreaks: HashMap<(String, u32), TiebreakRecord>,
}

fn write_row<K: Eq + Hash, V>(
    table: &mut HashMap<K, V>,
    key: K,
    value: V,
    mode: WriteMode,
) -> Result<(), ScoreRepositoryError> {
    match mode {
        WriteMode::Insert => {
            if table.contains_key(&key) {
                return Err(ScoreRepositoryError::AlreadyExists);
            }
            table.insert(key, value);
        }
        WriteMode::Update => {
            let row = table.get_mut(&key).ok_or(ScoreRepositoryError::NotFound)?;
            *row = value;
        }
    }
    Ok(())
}

#[derive(Default)]
pub struct InMemoryScoreRepository {
    tables: Mutex<ScoreTables>,
}

impl InMemoryScoreRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All point records of a match in (set, game) order.
    pub fn point_records(&self, match_id: &str) -> Result<Vec<PointRecord>, ScoreRepositoryError> {
        let tables = self.tables()?;
        let mut records: Vec<PointRecord> = tables
            .points
            .values()
            .filter(|record| record.match_id == match_id)
            .cloned()
            .collect();
        records.sort_by_key(|record| (record.set_number, record.game_number));
        Ok(records)
    }

    fn tables(&self) -> Result<MutexGuard<'_, ScoreTables>, ScoreRepositoryError> {
        self.tables
            .lock()
            .map_err(|e| ScoreRepositoryError::Storage(e.to_string()))
    }

    fn with_match<F>(&self, match_id: &str, update: F) -> Result<(), ScoreRepositoryError>
    where
        F: FnOnce(&mut MatchRecord),
    {
        let mut tables = self.tables()?;
        let record = tables
            .matches
            .get_mut(match_id)
            .ok_or(ScoreRepositoryError::NotFound)?;
        update(record);
        Ok(())
    }
}

impl ScoreRepository for InMemoryScoreRepository {
    fn create_match(&self, record: &MatchRecord) -> Result<(), ScoreRepositoryError> {
        let mut tables = self.tables()?;
        write_row(
            &mut tables.matches,
            record.id.clone(),
            record.clone(),
            WriteMode::Insert,
        )
    }

    fn get_match(&self, match_id: &str) -> Result<MatchRecord, ScoreRepositoryError> {
        self.tables()?
            .matches
            .get(match_id)
            .cloned()
            .ok_or(ScoreRepositoryError::NotFound)
    }

    fn update_match_status(
        &self,
        match_id: &str,
        status: MatchStatus,
    ) -> Result<(), ScoreRepositoryError> {
        self.with_match(match_id, |record| record.status = status)
    }

    fn mark_match_started(
        &self,
        match_id: &str,
        started_at: DateTime<Utc>,
    ) -> Result<(), ScoreRepositoryError> {
        self.with_match(match_id, |record| record.started_at = Some(started_at))
    }

    fn update_match_winner(
        &self,
        match_id: &str,
        winner_id: &str,
    ) -> Result<(), ScoreRepositoryError> {
        self.with_match(match_id, |record| {
            record.winner_id = Some(winner_id.to_string())
        })
    }

    fn update_match_duration(
        &self,
        match_id: &str,
        delta_ms: u64,
    ) -> Result<(), ScoreRepositoryError> {
        self.with_match(match_id, |record| {
            record.duration_ms = record.duration_ms.saturating_add(delta_ms)
        })
    }

    fn update_match_sets(
        &self,
        match_id: &str,
        sets_one: u32,
        sets_two: u32,
    ) -> Result<(), ScoreRepositoryError> {
        self.with_match(match_id, |record| {
            record.sets_one = sets_one;
            record.sets_two = sets_two;
        })
    }

    fn save_point_record(
        &self,
        record: &PointRecord,
        mode: WriteMode,
    ) -> Result<(), ScoreRepositoryError> {
        let key = (
            record.match_id.clone(),
            record.set_number,
            record.game_number,
        );
        write_row(&mut self.tables()?.points, key, record.clone(), mode)
    }

    fn save_set_record(
        &self,
        record: &SetRecord,
        mode: WriteMode,
    ) -> Result<(), ScoreRepositoryError> {
        let key = (record.match_id.clone(), record.set_number);
        write_row(&mut self.tables()?.sets, key, record.clone(), mode)
    }

    fn save_tiebreak_record(
        &self,
        record: &TiebreakRecord,
        mode: WriteMode,
    ) -> Result<(), ScoreRepositoryError> {
        let key = (record.match_id.clone(), record.set_number);
        write_row(&mut self.tables()?.tiebreaks, key, record.clone(), mode)
    }

    fn load_latest_game(&self, match_id: &str) -> Result<Option<PointRecord>, ScoreRepositoryError> {
        Ok(self
            .tables()?
            .points
            .values()
            .filter(|record| record.match_id == match_id)
            .max_by_key(|record| (record.set_number, record.game_number))
            .cloned())
    }

    fn load_latest_set(&self, match_id: &str) -> Result<Option<SetRecord>, ScoreRepositoryError> {
        Ok(self
            .tables()?
            .sets
            .values()
            .filter(|record| record.match_id == match_id)
            .max_by_key(|record| record.set_number)
            .cloned())
    }

    fn load_latest_tiebreak(
        &self,
        match_id: &str,
        set_number: u32,
    ) -> Result<Option<TiebreakRecord>, ScoreRepositoryError> {
        Ok(self
            .tables()?
            .tiebreaks
            .get(&(match_id.to_string(), set_number))
            .cloned())
    }

    fn load_set_records(&self, match_id: &str) -> Result<Vec<SetRecord>, ScoreRepositoryError> {
        let mut records: Vec<SetRecord> = self
            .tables()?
            .sets
            .values()
            .filter(|record| record.match_id == match_id)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.set_number);
        Ok(records)
    }
}
