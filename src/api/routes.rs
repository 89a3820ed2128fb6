use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    admin::admin_recalculate,
    matches::{create_match, get_match, get_matches},
    players::{create_player, get_player_detail, get_player_history, get_player_stats, get_players},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/players", get(get_players).post(create_player))
        .route("/api/players/:id", get(get_player_detail))
        .route("/api/players/:id/history", get(get_player_history))
        .route("/api/players/:id/stats", get(get_player_stats))
        .route("/api/matches", get(get_matches).post(create_match))
        .route("/api/matches/:id", get(get_match))
        .route("/api/admin/recalculate", post(admin_recalculate))
        .with_state(state)
}
