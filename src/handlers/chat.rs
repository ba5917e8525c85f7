use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::models::models::{AppState, ChatReplyResponse, ChatRequest};
use crate::services::chat_service::ChatService;
use axum::{extract::State, Extension, Json};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Luna's reply", body = ChatReplyResponse),
        (status = 400, description = "Empty message"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearerAuth" = [])),
    tag = "Chat"
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatReplyResponse>, ApiError> {
    let user_id = claims.user_id()?;
    let reply = ChatService::authenticated_turn(&state, user_id, &payload.message).await?;

    Ok(Json(ChatReplyResponse {
        success: true,
        response: reply.text,
        timestamp: reply.timestamp,
    }))
}
