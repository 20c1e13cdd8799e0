mod config;
mod events;
mod simulator;

use config::SimulatorConfig;
use scoring::config::ScoringConfig;
use simulator::{Error, MatchSimulator};

fn main() -> Result<(), Error> {
    let config = SimulatorConfig::from_env();

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(false)
        .without_time()
        .init();

    let simulator = MatchSimulator::new(config, ScoringConfig::from_env())?;
    let scoreboard = simulator.run()?;
    tracing::info!("Final score: {}", scoreboard);
    Ok(())
}
