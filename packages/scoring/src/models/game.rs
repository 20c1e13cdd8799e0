use serde::{Deserialize, Serialize};

use crate::models::errors::scoring_errors::ScoringError;
use crate::models::records::PointRecord;
use crate::models::side::Side;

/// Level both players sit at when the game reaches deuce (40-40).
pub const DEUCE_LEVEL: u8 = 3;

/// Display label for an ordinal point level. Levels 4 and 5 both read "A".
pub fn label_for_level(level: u8) -> &'static str {
    match level {
        0 => "0",
        1 => "15",
        2 => "30",
        3 => "40",
        _ => "A",
    }
}

/// Ordinal point level for a persisted label.
pub fn level_for_label(label: &str) -> Result<u8, ScoringError> {
    match label {
        "0" => Ok(0),
        "15" => Ok(1),
        "30" => Ok(2),
        "40" => Ok(3),
        "A" => Ok(4),
        other => Err(ScoringError::InvalidScoreLabel(other.to_string())),
    }
}

/// Point-level scoring inside one standard game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    points_one: u8,
    points_two: u8,
    game_number: u32,
    server: Side,
}

impl Game {
    pub fn new(server: Side) -> Self {
        Game {
            points_one: 0,
            points_two: 0,
            game_number: 1,
            server,
        }
    }

    pub fn resumed(points_one: u8, points_two: u8, game_number: u32, server: Side) -> Self {
        Game {
            points_one,
            points_two,
            game_number,
            server,
        }
    }

    /// Rebuilds a game from its latest persisted point record.
    ///
    /// Advantage is only legal against 40, so "A" paired with anything else
    /// is rejected.
    pub fn from_point_record(record: &PointRecord, server: Side) -> Result<Self, ScoringError> {
        let points_one = level_for_label(&record.score_one)?;
        let points_two = level_for_label(&record.score_two)?;
        let advantage = points_one.max(points_two) > DEUCE_LEVEL;
        if advantage && points_one.min(points_two) != DEUCE_LEVEL {
            return Err(ScoringError::InvalidScoreLabel(format!(
                "{}-{}",
                record.score_one, record.score_two
            )));
        }
        Ok(Game::resumed(
            points_one,
            points_two,
            record.game_number,
            server,
        ))
    }

    pub fn to_point_record(&self, match_id: &str, set_number: u32) -> PointRecord {
        let (score_one, score_two) = self.score_labels();
        PointRecord {
            match_id: match_id.to_string(),
            set_number,
            game_number: self.game_number,
            score_one: score_one.to_string(),
            score_two: score_two.to_string(),
        }
    }

    /// Scores a point and returns the winner if it decided the game.
    pub fn add_point(&mut self, side: Side) -> Result<Option<Side>, ScoringError> {
        if self.is_won() {
            return Err(ScoringError::InvariantViolation(format!(
                "game {} is already decided",
                self.game_number
            )));
        }

        let (scorer, opponent) = match side {
            Side::PlayerOne => (&mut self.points_one, &mut self.points_two),
            Side::PlayerTwo => (&mut self.points_two, &mut self.points_one),
        };

        if *scorer >= DEUCE_LEVEL && *opponent >= DEUCE_LEVEL {
            if *scorer == DEUCE_LEVEL && *opponent == DEUCE_LEVEL + 1 {
                // Breaks the opponent's advantage: back to deuce.
                *opponent -= 1;
            } else {
                *scorer += 1;
            }
        } else {
            *scorer += 1;
        }

        Ok(self.winner())
    }

    pub fn is_won(&self) -> bool {
        self.winner().is_some()
    }

    pub fn winner(&self) -> Option<Side> {
        if self.points_one >= 4 && self.points_one >= self.points_two + 2 {
            Some(Side::PlayerOne)
        } else if self.points_two >= 4 && self.points_two >= self.points_one + 2 {
            Some(Side::PlayerTwo)
        } else {
            None
        }
    }

    /// Moves on to the next game of the set: next number, other server, love-all.
    pub fn reset(&mut self) {
        self.points_one = 0;
        self.points_two = 0;
        self.game_number += 1;
        self.server = self.server.opponent();
    }

    pub fn is_deuce(&self) -> bool {
        self.points_one == DEUCE_LEVEL && self.points_two == DEUCE_LEVEL
    }

    pub fn score_labels(&self) -> (&'static str, &'static str) {
        (
            label_for_level(self.points_one),
            label_for_level(self.points_two),
        )
    }

    pub fn points(&self) -> (u8, u8) {
        (self.points_one, self.points_two)
    }

    pub fn game_number(&self) -> u32 {
        self.game_number
    }

    pub fn server(&self) -> Side {
        self.server
    }

    pub fn set_server(&mut self, server: Side) {
        self.server = server;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn play(game: &mut Game, points: &[Side]) -> Option<Side> {
        let mut winner = None;
        for side in points {
            winner = game.add_point(*side).unwrap();
        }
        winner
    }

    const ONE: Side = Side::PlayerOne;
    const TWO: Side = Side::PlayerTwo;

    #[test]
    fn test_love_game() {
        let mut game = Game::new(ONE);
        assert_eq!(play(&mut game, &[ONE, ONE, ONE]), None);
        assert_eq!(game.score_labels(), ("40", "0"));
        assert_eq!(game.add_point(ONE).unwrap(), Some(ONE));
        assert_eq!(game.points(), (4, 0));
    }

    #[test]
    fn test_deuce_advantage_and_back() {
        let mut game = Game::new(ONE);
        play(&mut game, &[ONE, ONE, ONE, TWO, TWO, TWO]);
        assert!(game.is_deuce());

        game.add_point(ONE).unwrap();
        assert_eq!(game.points(), (4, 3));
        assert_eq!(game.score_labels(), ("A", "40"));

        game.add_point(TWO).unwrap();
        assert_eq!(game.points(), (3, 3));
        assert!(!game.is_won());
    }

    #[test]
    fn test_advantage_converted() {
        let mut game = Game::new(TWO);
        play(&mut game, &[ONE, ONE, ONE, TWO, TWO, TWO, TWO]);
        assert_eq!(game.points(), (3, 4));
        assert_eq!(game.add_point(TWO).unwrap(), Some(TWO));
        assert_eq!(game.points(), (3, 5));
    }

    #[test]
    fn test_forty_thirty_is_not_deuce_region() {
        let mut game = Game::new(ONE);
        play(&mut game, &[ONE, ONE, ONE, TWO, TWO]);
        assert_eq!(game.add_point(ONE).unwrap(), Some(ONE));
        assert_eq!(game.points(), (4, 2));
    }

    #[test]
    fn test_point_on_decided_game_is_rejected() {
        let mut game = Game::new(ONE);
        play(&mut game, &[TWO, TWO, TWO, TWO]);
        let before = game.clone();
        assert!(matches!(
            game.add_point(ONE),
            Err(ScoringError::InvariantViolation(_))
        ));
        assert_eq!(game, before);
    }

    #[test]
    fn test_reset_flips_server_and_numbers_next_game() {
        let mut game = Game::new(ONE);
        play(&mut game, &[ONE, ONE, ONE, ONE]);
        game.reset();
        assert_eq!(game.game_number(), 2);
        assert_eq!(game.server(), TWO);
        assert_eq!(game.points(), (0, 0));
    }

    #[rstest]
    #[case("0", 0)]
    #[case("15", 1)]
    #[case("30", 2)]
    #[case("40", 3)]
    #[case("A", 4)]
    fn test_labels(#[case] label: &str, #[case] level: u8) {
        assert_eq!(level_for_label(label).unwrap(), level);
        assert_eq!(label_for_level(level), label);
    }

    #[test]
    fn test_level_five_displays_as_advantage() {
        assert_eq!(label_for_level(5), "A");
    }

    #[test]
    fn test_unknown_label_is_error() {
        assert_eq!(
            level_for_label("Ad"),
            Err(ScoringError::InvalidScoreLabel("Ad".to_string()))
        );
    }

    #[test]
    fn test_resume_from_record_rejects_bad_label() {
        let record = PointRecord {
            match_id: "m".to_string(),
            set_number: 1,
            game_number: 3,
            score_one: "45".to_string(),
            score_two: "0".to_string(),
        };
        assert!(Game::from_point_record(&record, ONE).is_err());
    }

    #[rstest]
    #[case("A", "A")]
    #[case("A", "30")]
    #[case("0", "A")]
    fn test_resume_rejects_unreachable_advantage(#[case] one: &str, #[case] two: &str) {
        let record = PointRecord {
            match_id: "m".to_string(),
            set_number: 1,
            game_number: 1,
            score_one: one.to_string(),
            score_two: two.to_string(),
        };
        assert_eq!(
            Game::from_point_record(&record, ONE),
            Err(ScoringError::InvalidScoreLabel(format!("{}-{}", one, two)))
        );
    }

    #[test]
    fn test_resume_from_record() {
        let record = PointRecord {
            match_id: "m".to_string(),
            set_number: 2,
            game_number: 5,
            score_one: "40".to_string(),
            score_two: "A".to_string(),
        };
        let game = Game::from_point_record(&record, TWO).unwrap();
        assert_eq!(game.points(), (3, 4));
        assert_eq!(game.game_number(), 5);
        assert_eq!(game.server(), TWO);
        assert_eq!(game.to_point_record("m", 2), record);
    }

    fn side_strategy() -> impl Strategy<Value = Side> {
        prop_oneof![Just(Side::PlayerOne), Just(Side::PlayerTwo)]
    }

    proptest! {
        #[test]
        fn prop_levels_bounded_and_win_rule_holds(points in prop::collection::vec(side_strategy(), 0..80)) {
            let mut game = Game::new(Side::PlayerOne);
            for side in points {
                if game.is_won() {
                    break;
                }
                let winner = game.add_point(side).unwrap();
                let (one, two) = game.points();
                prop_assert!(one <= 5 && two <= 5);
                if let Some(w) = winner {
                    let (own, other) = if w == Side::PlayerOne { (one, two) } else { (two, one) };
                    prop_assert!(own >= 4 && own - other >= 2);
                } else {
                    prop_assert!(!(one >= 4 && one >= two + 2));
                    prop_assert!(!(two >= 4 && two >= one + 2));
                }
            }
        }

        #[test]
        fn prop_deuce_region_never_exceeds_one_point_lead(points in prop::collection::vec(side_strategy(), 0..80)) {
            let mut game = Game::new(Side::PlayerOne);
            for side in points {
                if game.is_won() {
                    break;
                }
                game.add_point(side).unwrap();
                let (one, two) = game.points();
                if !game.is_won() && one >= DEUCE_LEVEL && two >= DEUCE_LEVEL {
                    prop_assert!(one.abs_diff(two) <= 1);
                    prop_assert!(one <= 4 && two <= 4);
                }
            }
        }

        #[test]
        fn prop_record_round_trip(one in 0u8..=4, two in 0u8..=4, number in 1u32..13) {
            prop_assume!(!(one == 4 && two == 4));
            let game = Game::resumed(one, two, number, Side::PlayerTwo);
            let record = game.to_point_record("m", 1);
            let restored = Game::from_point_record(&record, Side::PlayerTwo).unwrap();
            prop_assert_eq!(restored.to_point_record("m", 1), record);
        }
    }
}
