use std::env;
use std::path::PathBuf;

/// Simulator settings, overridable through `SIMULATOR_*` environment variables.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub sets_to_win: u32,
    /// Seed for random play; a fresh one is drawn when unset.
    pub seed: Option<u64>,
    /// Event script to replay instead of random play.
    pub script: Option<PathBuf>,
    pub log_level: tracing::Level,
    /// Suspend and resume after every N points of random play.
    pub suspend_every: Option<u32>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            sets_to_win: 2,
            seed: None,
            script: None,
            log_level: tracing::Level::INFO,
            suspend_every: None,
        }
    }
}

impl SimulatorConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(sets_to_win) = env::var("SIMULATOR_SETS_TO_WIN") {
            if let Ok(sets_to_win) = sets_to_win.parse() {
                config.sets_to_win = sets_to_win;
            }
        }

        if let Ok(seed) = env::var("SIMULATOR_SEED") {
            if let Ok(seed) = seed.parse() {
                config.seed = Some(seed);
            }
        }

        if let Ok(script) = env::var("SIMULATOR_SCRIPT") {
            if !script.trim().is_empty() {
                config.script = Some(PathBuf::from(script));
            }
        }

        if let Ok(level) = env::var("SIMULATOR_LOG_LEVEL") {
            if let Ok(level) = level.parse() {
                config.log_level = level;
            }
        }

        if let Ok(every) = env::var("SIMULATOR_SUSPEND_EVERY") {
            if let Ok(every) = every.parse::<u32>() {
                if every > 0 {
                    config.suspend_every = Some(every);
                }
            }
        }

        config
    }
}
