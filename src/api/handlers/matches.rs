use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{MatchItem, MatchListResponse, NewMatchRequest};
use crate::database;
use crate::errors::RecordError;
use crate::services::recording::{self, MatchSubmission};

use super::{AppState, PageParams};

pub async fn get_matches(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    let limit = params.limit.unwrap_or(50).clamp(1, 500);
    let offset = params.offset.unwrap_or(0);

    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let rows = match database::matches::list_recent(&conn, limit, offset) {
        Ok(rows) => rows,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response()
        }
    };

    let total = match database::matches::count_all(&conn) {
        Ok(total) => total,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response()
        }
    };

    Json(MatchListResponse {
        matches: rows.into_iter().map(MatchItem::from).collect(),
        total,
        limit,
        offset,
    })
    .into_response()
}

pub async fn get_match(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<i64>,
) -> impl IntoResponse {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::matches::find_with_names(&conn, match_id) {
        Ok(Some(row)) => Json(MatchItem::from(row)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
            .into_response(),
    }
}

pub async fn create_match(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewMatchRequest>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let submission = MatchSubmission {
        player1_id: request.player1_id,
        player2_id: request.player2_id,
        sets: request.sets,
    };

    let match_row = match recording::record_match(&mut conn, &submission, &state.config.rating) {
        Ok(row) => row,
        Err(RecordError::Invalid(e)) => {
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(RecordError::PlayerNotFound(id)) => {
            return (StatusCode::NOT_FOUND, format!("Player {} not found", id)).into_response()
        }
        Err(RecordError::Internal(e)) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", e)).into_response()
        }
    };

    match database::matches::find_with_names(&conn, match_row.id) {
        Ok(Some(row)) => (StatusCode::CREATED, Json(MatchItem::from(row))).into_response(),
        Ok(None) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
            .into_response(),
    }
}
