use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::models::models::{AppState, OkResponse};
use crate::services::chat_service::ChatService;
use axum::{extract::State, Extension, Json};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/chat/clear",
    responses(
        (status = 200, description = "History cleared, fresh greeting seeded", body = OkResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearerAuth" = [])),
    tag = "Chat"
)]
pub async fn chat_clear(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<OkResponse>, ApiError> {
    let user_id = claims.user_id()?;
    let mut conn = state.db.get()?;
    ChatService::clear(&mut conn, user_id)?;

    Ok(Json(OkResponse { success: true }))
}
