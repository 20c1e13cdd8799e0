use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::{debug, info, warn};

use scoring::config::ScoringConfig;
use scoring::models::match_status::MatchStatus;
use scoring::models::player::Player;
use scoring::models::scoreboard::Scoreboard;
use scoring::models::side::Side;
use scoring::models::tennis_match::{Match, PointOutcome};
use scoring::repositories::player_repository::InMemoryPlayerRepository;
use scoring::repositories::score_repository::InMemoryScoreRepository;
use scoring::services::match_service::MatchService;

use crate::config::SimulatorConfig;
use crate::events::{parse_script, OperatorEvent};

pub type Error = Box<dyn std::error::Error + Send + Sync>;

const PLAYER_ONE: &str = "player-1";
const PLAYER_TWO: &str = "player-2";
/// Random play gives up after this many points.
const MAX_RANDOM_POINTS: u32 = 10_000;

/// Plays one match against in-memory storage, from a script or at random.
#[derive(Clone)]
pub struct MatchSimulator {
    service: MatchService,
    config: SimulatorConfig,
}

impl MatchSimulator {
    pub fn new(config: SimulatorConfig, scoring_config: ScoringConfig) -> Result<Self, Error> {
        let players = InMemoryPlayerRepository::new();
        players.add_player(Player::new(PLAYER_ONE, "Player One"))?;
        players.add_player(Player::new(PLAYER_TWO, "Player Two"))?;

        let service = MatchService::new(
            Arc::new(InMemoryScoreRepository::new()),
            Arc::new(players),
            scoring_config,
        );
        Ok(Self { service, config })
    }

    pub fn run(&self) -> Result<Scoreboard, Error> {
        match &self.config.script {
            Some(path) => {
                info!("Replaying event script {}", path.display());
                let script = std::fs::read_to_string(path)?;
                self.replay(&parse_script(&script)?)
            }
            None => self.play_random(),
        }
    }

    fn start(&self) -> Result<Match, Error> {
        let scheduled =
            self.service
                .schedule_match(PLAYER_ONE, PLAYER_TWO, self.config.sets_to_win, Utc::now())?;
        Ok(self.service.start_match(scheduled.id())?)
    }

    /// Applies scripted events in order. Rejected events are logged and skipped.
    pub fn replay(&self, events: &[OperatorEvent]) -> Result<Scoreboard, Error> {
        let mut tennis_match = self.start()?;

        for event in events {
            if let Err(e) = self.apply(&mut tennis_match, *event) {
                warn!("Event {:?} rejected: {}", event, e);
            }
        }

        Ok(tennis_match.scoreboard())
    }

    pub fn play_random(&self) -> Result<Scoreboard, Error> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        info!(seed, "Playing a random match");
        let mut rng = StdRng::seed_from_u64(seed);
        let mut tennis_match = self.start()?;

        let mut points = 0;
        while tennis_match.status() != MatchStatus::Finished {
            if points >= MAX_RANDOM_POINTS {
                return Err(format!("match undecided after {} points", points).into());
            }
            let side = Side::from_player_one_flag(rng.gen_bool(0.5));
            self.apply(&mut tennis_match, OperatorEvent::Point(side))?;
            points += 1;

            if let Some(every) = self.config.suspend_every {
                if points % every == 0 && tennis_match.status() == MatchStatus::Started {
                    self.apply(&mut tennis_match, OperatorEvent::Suspend)?;
                    self.apply(&mut tennis_match, OperatorEvent::Resume)?;
                }
            }
        }

        Ok(tennis_match.scoreboard())
    }

    fn apply(&self, tennis_match: &mut Match, event: OperatorEvent) -> Result<(), Error> {
        match event {
            OperatorEvent::Point(side) => {
                let outcome = self.service.score_point(tennis_match, side)?;
                log_outcome(&outcome);
            }
            OperatorEvent::Suspend => {
                self.service.suspend_match(tennis_match)?;
            }
            OperatorEvent::Resume => {
                *tennis_match = self.service.resume_match(tennis_match.id())?;
            }
            OperatorEvent::Finish(winner) => {
                self.service.finish_match(tennis_match, winner)?;
            }
        }
        debug!("{}", tennis_match.scoreboard());
        Ok(())
    }
}

fn log_outcome(outcome: &PointOutcome) {
    match outcome {
        PointOutcome::PointScored => {}
        PointOutcome::GameWon { winner } => debug!("Game {}", winner),
        PointOutcome::TiebreakStarted { target_points } => {
            info!("Tiebreak to {} points", target_points)
        }
        PointOutcome::SetWon {
            winner, finished, ..
        } => info!(
            "Set {} to {} {}-{}",
            finished.set_number, winner, finished.games_one, finished.games_two
        ),
        PointOutcome::MatchWon { winner, .. } => info!("Game, set and match {}", winner),
    }
}
