use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::models::models::{AppState, MoodEntryResponse, MoodRequest};
use crate::services::mood_service::MoodService;
use axum::{extract::State, Extension, Json};
use std::sync::Arc;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/mood",
    request_body = MoodRequest,
    responses(
        (status = 200, description = "Entry stored with Luna's insight", body = MoodEntryResponse),
        (status = 400, description = "Mood outside 1-5"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearerAuth" = [])),
    tag = "Mood"
)]
pub async fn mood(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<MoodRequest>,
) -> Result<Json<MoodEntryResponse>, ApiError> {
    payload.validate()?;

    let user_id = claims.user_id()?;
    let submission = MoodService::submit(&state, user_id, &payload).await?;

    Ok(Json(MoodEntryResponse {
        success: true,
        entry_id: submission.entry_id,
        ai_insight: submission.ai_insight,
    }))
}
