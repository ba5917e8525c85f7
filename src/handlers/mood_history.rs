use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::models::models::{AppState, MoodHistoryResponse};
use crate::services::mood_service::MoodService;
use axum::{extract::State, Extension, Json};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/mood/history",
    responses(
        (status = 200, description = "Entries newest-first", body = MoodHistoryResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearerAuth" = [])),
    tag = "Mood"
)]
pub async fn mood_history(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<MoodHistoryResponse>, ApiError> {
    let user_id = claims.user_id()?;
    let mut conn = state.db.get()?;
    let entries = MoodService::history(&mut conn, user_id)?;

    Ok(Json(MoodHistoryResponse {
        success: true,
        entries,
    }))
}
