use std::env;
use std::str::FromStr;

use crate::models::errors::scoring_errors::ScoringError;
use crate::models::side::Side;

pub const DEFAULT_MAX_SETS_TO_WIN: u32 = 3;

/// Who serves the very first game of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstServerPolicy {
    /// Coin toss.
    Random,
    PlayerOne,
    PlayerTwo,
}

impl FirstServerPolicy {
    pub fn pick(self) -> Side {
        match self {
            FirstServerPolicy::Random => Side::from_player_one_flag(rand::random::<bool>()),
            FirstServerPolicy::PlayerOne => Side::PlayerOne,
            FirstServerPolicy::PlayerTwo => Side::PlayerTwo,
        }
    }
}

impl FromStr for FirstServerPolicy {
    type Err = ScoringError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(FirstServerPolicy::Random),
            "one" | "1" => Ok(FirstServerPolicy::PlayerOne),
            "two" | "2" => Ok(FirstServerPolicy::PlayerTwo),
            other => Err(ScoringError::InvalidConfiguration(format!(
                "unknown first server policy: {}",
                other
            ))),
        }
    }
}

/// Engine settings shared by every match a service runs.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Upper bound for the sets a player needs to win a match.
    pub max_sets_to_win: u32,
    pub first_server: FirstServerPolicy,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_sets_to_win: DEFAULT_MAX_SETS_TO_WIN,
            first_server: FirstServerPolicy::Random,
        }
    }
}

impl ScoringConfig {
    /// Defaults overridden by `SCORING_*` environment variables that parse.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(max_sets) = env::var("SCORING_MAX_SETS_TO_WIN") {
            if let Ok(max_sets) = max_sets.parse::<u32>() {
                if max_sets > 0 {
                    config.max_sets_to_win = max_sets;
                }
            }
        }

        if let Ok(first_server) = env::var("SCORING_FIRST_SERVER") {
            if let Ok(policy) = first_server.parse() {
                config.first_server = policy;
            }
        }

        config
    }

    pub fn with_first_server(mut self, first_server: FirstServerPolicy) -> Self {
        self.first_server = first_server;
        self
    }

    pub fn validate_sets_to_win(&self, sets_to_win: u32) -> Result<(), ScoringError> {
        if sets_to_win == 0 || sets_to_win > self.max_sets_to_win {
            return Err(ScoringError::InvalidConfiguration(format!(
                "sets to win must be between 1 and {}, got {}",
                self.max_sets_to_win, sets_to_win
            )));
        }
        Ok(())
    }
}
