use serde::{Deserialize, Serialize};

use crate::database::{MatchWithNames, Player, RatingHistoryRow};
use crate::domain::stats::{HeadToHeadRecord, PlayerStatistics};
use crate::domain::{parse_sets, SetScore};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerItem {
    pub id: i64,
    pub name: String,
    pub current_elo: f64,
    pub games_played: i32,
    pub wins: i32,
    pub losses: i32,
    pub created_at: Option<String>,
}

impl From<Player> for PlayerItem {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            name: player.name,
            current_elo: player.current_elo,
            games_played: player.games_played,
            wins: player.wins,
            losses: player.losses,
            created_at: player.created_at.map(|t| t.to_string()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    #[serde(flatten)]
    pub player: PlayerItem,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub players: Vec<LeaderboardEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlayerRequest {
    pub name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchItem {
    pub id: i64,
    pub player1_id: i64,
    pub player1_name: String,
    pub player2_id: i64,
    pub player2_name: String,
    pub winner_id: i64,
    pub winner_name: String,
    pub sets: Vec<SetScore>,
    pub player1_elo_before: f64,
    pub player2_elo_before: f64,
    pub player1_elo_after: f64,
    pub player2_elo_after: f64,
    pub elo_change: f64,
    pub played_at: String,
}

impl From<MatchWithNames> for MatchItem {
    fn from(row: MatchWithNames) -> Self {
        let m = row.match_row;
        Self {
            id: m.id,
            player1_id: m.player1_id,
            player1_name: row.player1_name,
            player2_id: m.player2_id,
            player2_name: row.player2_name,
            winner_id: m.winner_id,
            winner_name: row.winner_name,
            sets: parse_sets(m.sets.as_deref()),
            player1_elo_before: m.player1_elo_before,
            player2_elo_before: m.player2_elo_before,
            player1_elo_after: m.player1_elo_after,
            player2_elo_after: m.player2_elo_after,
            elo_change: m.elo_change,
            played_at: m.played_at.to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchListResponse {
    pub matches: Vec<MatchItem>,
    pub total: i64,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMatchRequest {
    pub player1_id: i64,
    pub player2_id: i64,
    pub sets: Vec<SetScore>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingHistoryPoint {
    pub match_id: i64,
    pub played_at: String,
    pub elo_before: f64,
    pub elo_after: f64,
    pub won: bool,
}

impl From<RatingHistoryRow> for RatingHistoryPoint {
    fn from(row: RatingHistoryRow) -> Self {
        Self {
            match_id: row.match_id,
            played_at: row.played_at.to_string(),
            elo_before: row.elo_before,
            elo_after: row.elo_after,
            won: row.won,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingHistoryResponse {
    pub player_id: i64,
    pub initial_rating: f64,
    pub points: Vec<RatingHistoryPoint>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHeadItem {
    pub opponent_id: i64,
    pub opponent_name: String,
    pub total_matches: usize,
    pub wins: usize,
    pub losses: usize,
}

impl From<HeadToHeadRecord> for HeadToHeadItem {
    fn from(record: HeadToHeadRecord) -> Self {
        Self {
            opponent_id: record.opponent_id,
            opponent_name: record.opponent_name,
            total_matches: record.total_matches,
            wins: record.wins,
            losses: record.losses,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatsResponse {
    pub player_id: i64,
    pub biggest_gain: f64,
    pub biggest_loss: f64,
    pub current_streak: usize,
    pub streak_type: Option<String>,
    pub head_to_head: Vec<HeadToHeadItem>,
}

impl PlayerStatsResponse {
    pub fn new(player_id: i64, stats: PlayerStatistics) -> Self {
        Self {
            player_id,
            biggest_gain: stats.biggest_gain,
            biggest_loss: stats.biggest_loss,
            current_streak: stats.current_streak,
            streak_type: stats.streak_kind.map(|kind| kind.as_str().to_string()),
            head_to_head: stats.head_to_head.into_iter().map(HeadToHeadItem::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecalculateResponse {
    pub matches_replayed: usize,
}
