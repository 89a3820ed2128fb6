use std::collections::HashMap;

use crate::domain::SetScore;

pub type PlayerId = i64;
pub type MatchId = i64;
pub type RatingValue = f64;
pub type RatingMap = HashMap<PlayerId, RatingValue>;

/// Result of scoring one finished match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingChange {
    pub winner_new_elo: f64,
    pub loser_new_elo: f64,
    pub elo_change: f64,
}

/// Cumulative per-player counters. `games_played` always equals
/// `wins + losses`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub games_played: i32,
    pub wins: i32,
    pub losses: i32,
}

/// The slice of a stored match the replayer needs. An empty set list stands
/// for a legacy row without per-set scores.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub id: MatchId,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    pub winner_id: PlayerId,
    pub sets: Vec<SetScore>,
}

/// Before/after ratings recorded against one match during a replay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchSnapshot {
    pub player1_elo_before: f64,
    pub player2_elo_before: f64,
    pub player1_elo_after: f64,
    pub player2_elo_after: f64,
    pub elo_change: f64,
}

/// Output of a full history replay: final ratings and counters per roster
/// player, plus the rating trail per match in replay order.
#[derive(Debug, Clone, Default)]
pub struct ReplayOutcome {
    pub ratings: RatingMap,
    pub stats: HashMap<PlayerId, PlayerStats>,
    pub snapshots: Vec<(MatchId, MatchSnapshot)>,
}
