use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{
    LeaderboardEntry, LeaderboardResponse, NewPlayerRequest, PlayerItem, PlayerStatsResponse,
    RatingHistoryPoint, RatingHistoryResponse,
};
use crate::database;
use crate::domain;

use super::AppState;

pub async fn get_players(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let players = match database::players::list_leaderboard(&conn) {
        Ok(rows) => rows,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response()
        }
    };

    let entries = players
        .into_iter()
        .enumerate()
        .map(|(i, player)| LeaderboardEntry {
            rank: i + 1,
            player: PlayerItem::from(player),
        })
        .collect();

    Json(LeaderboardResponse { players: entries }).into_response()
}

pub async fn create_player(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewPlayerRequest>,
) -> impl IntoResponse {
    let name = request.name.trim();
    if name.is_empty() {
        return (StatusCode::BAD_REQUEST, "Player name must not be empty").into_response();
    }

    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    // The UNIQUE index on the name is the arbiter; a pre-check would race
    // with concurrent inserts.
    match database::players::insert_player(&conn, name, state.config.rating.initial_rating) {
        Ok(player) => (StatusCode::CREATED, Json(PlayerItem::from(player))).into_response(),
        Err(e) if database::players::is_unique_name_violation(&e) => {
            (StatusCode::CONFLICT, "A player with that name already exists").into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
            .into_response(),
    }
}

pub async fn get_player_detail(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<i64>,
) -> impl IntoResponse {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::players::find_by_id(&conn, player_id) {
        Ok(Some(player)) => Json(PlayerItem::from(player)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
            .into_response(),
    }
}

pub async fn get_player_history(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<i64>,
) -> impl IntoResponse {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::players::find_by_id(&conn, player_id) {
        Ok(Some(_)) => {}
        Ok(None) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response()
        }
    }

    match database::matches::rating_history_for_player(&conn, player_id) {
        Ok(rows) => Json(RatingHistoryResponse {
            player_id,
            initial_rating: state.config.rating.initial_rating,
            points: rows.into_iter().map(RatingHistoryPoint::from).collect(),
        })
        .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
            .into_response(),
    }
}

pub async fn get_player_stats(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<i64>,
) -> impl IntoResponse {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::players::find_by_id(&conn, player_id) {
        Ok(Some(_)) => {}
        Ok(None) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response()
        }
    }

    match database::matches::results_for_player(&conn, player_id) {
        Ok(results) => {
            let stats = domain::summarize_results(&results);
            Json(PlayerStatsResponse::new(player_id, stats)).into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
            .into_response(),
    }
}
