use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::RecalculateResponse;
use crate::config::settings::AppConfig;
use crate::services::recalculation::RecalculationService;

use super::AppState;

/// Triggers a full-history replay. Guarded by a bearer token so only the
/// operator can run it; the replay itself is transactional, so a failure
/// here leaves the previous ratings in place.
pub async fn admin_recalculate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let auth_header = headers.get("Authorization").and_then(|h| h.to_str().ok());
    let expected = format!("Bearer {}", AppConfig::admin_token());
    if auth_header != Some(expected.as_str()) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let service = RecalculationService::new(state.config.clone());
    match service.recalculate(&mut conn) {
        Ok(matches_replayed) => {
            log::info!("Admin triggered recalculation replayed {} matches", matches_replayed);
            Json(RecalculateResponse { matches_replayed }).into_response()
        }
        Err(e) => {
            log::error!("Recalculation failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Recalculation failed: {}", e),
            )
                .into_response()
        }
    }
}
