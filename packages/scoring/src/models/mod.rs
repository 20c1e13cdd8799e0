pub mod errors;
pub mod game;
pub mod match_status;
pub mod player;
pub mod records;
pub mod scoreboard;
pub mod set;
pub mod side;
pub mod tennis_match;
pub mod tiebreak;
