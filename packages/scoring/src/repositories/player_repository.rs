use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::models::player::Player;
use crate::repositories::errors::player_repository_errors::PlayerRepositoryError;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
pub trait PlayerRepository: Send + Sync {
    fn player_exists(&self, player_id: &str) -> Result<bool, PlayerRepositoryError>;
    fn record_match_result(
        &self,
        winner_id: &str,
        loser_id: &str,
    ) -> Result<(), PlayerRepositoryError>;
}

#[derive(Default)]
pub struct InMemoryPlayerRepository {
    players: Mutex<HashMap<String, Player>>,
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_players(players: Vec<Player>) -> Self {
        let players = players
            .into_iter()
            .map(|player| (player.id.clone(), player))
            .collect();
        Self {
            players: Mutex::new(players),
        }
    }

    pub fn add_player(&self, player: Player) -> Result<(), PlayerRepositoryError> {
        let mut players = self.players()?;
        if players.contains_key(&player.id) {
            return Err(PlayerRepositoryError::AlreadyExists);
        }
        players.insert(player.id.clone(), player);
        Ok(())
    }

    pub fn get_player(&self, player_id: &str) -> Result<Player, PlayerRepositoryError> {
        self.players()?
            .get(player_id)
            .cloned()
            .ok_or(PlayerRepositoryError::NotFound)
    }

    fn players(&self) -> Result<MutexGuard<'_, HashMap<String, Player>>, PlayerRepositoryError> {
        self.players
            .lock()
            .map_err(|e| PlayerRepositoryError::Storage(e.to_string()))
    }
}

impl PlayerRepository for InMemoryPlayerRepository {
    fn player_exists(&self, player_id: &str) -> Result<bool, PlayerRepositoryError> {
        Ok(self.players()?.contains_key(player_id))
    }

    fn record_match_result(
        &self,
        winner_id: &str,
        loser_id: &str,
    ) -> Result<(), PlayerRepositoryError> {
        let mut players = self.players()?;
        if !players.contains_key(winner_id) || !players.contains_key(loser_id) {
            return Err(PlayerRepositoryError::NotFound);
        }
        if let Some(winner) = players.get_mut(winner_id) {
            winner.record_win();
        }
        if let Some(loser) = players.get_mut(loser_id) {
            loser.record_loss();
        }
        Ok(())
    }
}
