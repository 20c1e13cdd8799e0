//! Serve rotation policy.
//!
//! Service alternates every game for the whole match, across set boundaries,
//! so the server of any game follows from how many games were completed
//! before it and who served the first of them. Inside a tiebreak the opening
//! server takes one point, then each player serves two in turn.

use crate::models::side::Side;

/// Who serves the next game after `total_games` completed games, given the
/// player who served the first of them.
pub fn serves_first(total_games: u32, starting_server: Side) -> Side {
    if total_games % 2 == 0 {
        starting_server
    } else {
        starting_server.opponent()
    }
}

/// Boolean form of [`serves_first`], expressed from player one's point of view.
pub fn server_is_player_one(total_games: u32, player_one_started: bool) -> bool {
    serves_first(total_games, Side::from_player_one_flag(player_one_started)).is_player_one()
}

/// Server of the upcoming tiebreak point once `points_played` points are done.
pub fn tiebreak_server(points_played: u32, opening_server: Side) -> Side {
    match points_played % 4 {
        0 | 3 => opening_server,
        _ => opening_server.opponent(),
    }
}
