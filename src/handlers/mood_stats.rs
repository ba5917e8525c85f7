use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::models::models::{AppState, MoodStatsResponse};
use crate::services::mood_service::MoodService;
use axum::{extract::State, Extension, Json};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/mood/stats",
    responses(
        (status = 200, description = "Aggregate mood statistics", body = MoodStatsResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearerAuth" = [])),
    tag = "Mood"
)]
pub async fn mood_stats(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<MoodStatsResponse>, ApiError> {
    let user_id = claims.user_id()?;
    let mut conn = state.db.get()?;
    let stats = MoodService::stats(&mut conn, user_id)?;

    Ok(Json(MoodStatsResponse {
        success: true,
        stats,
    }))
}
