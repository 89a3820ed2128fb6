use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub current_elo: f64,
    pub games_played: i32,
    pub wins: i32,
    pub losses: i32,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct Match {
    pub id: i64,
    pub player1_id: i64,
    pub player2_id: i64,
    pub winner_id: i64,
    pub sets: Option<String>,
    pub player1_elo_before: f64,
    pub player2_elo_before: f64,
    pub player1_elo_after: f64,
    pub player2_elo_after: f64,
    pub elo_change: f64,
    pub played_at: NaiveDateTime,
}

// DTO for joined listings
#[derive(Debug, Clone)]
pub struct MatchWithNames {
    pub match_row: Match,
    pub player1_name: String,
    pub player2_name: String,
    pub winner_name: String,
}

/// One match seen from a single player's side, joined with the opponent.
/// `elo_delta` is signed: positive for a win, negative for a loss.
#[derive(Debug, Clone)]
pub struct MatchResultRow {
    pub match_id: i64,
    pub opponent_id: i64,
    pub opponent_name: String,
    pub won: bool,
    pub elo_delta: f64,
    pub played_at: NaiveDateTime,
}

/// One point of a player's rating trajectory, read off the stored match
/// snapshots in playing order.
#[derive(Debug, Clone)]
pub struct RatingHistoryRow {
    pub match_id: i64,
    pub played_at: NaiveDateTime,
    pub elo_before: f64,
    pub elo_after: f64,
    pub won: bool,
}
