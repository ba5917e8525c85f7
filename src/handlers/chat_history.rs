use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::models::models::{AppState, ChatHistoryResponse};
use crate::services::chat_service::ChatService;
use axum::{extract::State, Extension, Json};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/chat/history",
    responses(
        (status = 200, description = "Conversation oldest-first", body = ChatHistoryResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearerAuth" = [])),
    tag = "Chat"
)]
pub async fn chat_history(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ChatHistoryResponse>, ApiError> {
    let user_id = claims.user_id()?;
    let mut conn = state.db.get()?;
    let history = ChatService::history(&mut conn, user_id)?;

    Ok(Json(ChatHistoryResponse {
        success: true,
        history,
    }))
}
