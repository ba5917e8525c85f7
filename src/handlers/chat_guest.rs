use crate::error::ApiError;
use crate::models::models::{AppState, ChatReplyResponse, GuestChatRequest};
use crate::services::chat_service::ChatService;
use axum::{extract::State, Json};
use std::sync::Arc;

/// Unauthenticated chat: the caller carries its own history and nothing is
/// stored server-side.
#[utoipa::path(
    post,
    path = "/api/chat/guest",
    request_body = GuestChatRequest,
    responses(
        (status = 200, description = "Luna's reply", body = ChatReplyResponse),
        (status = 400, description = "Empty message")
    ),
    tag = "Chat"
)]
pub async fn chat_guest(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GuestChatRequest>,
) -> Result<Json<ChatReplyResponse>, ApiError> {
    let reply = ChatService::guest_turn(&state, &payload).await?;

    Ok(Json(ChatReplyResponse {
        success: true,
        response: reply.text,
        timestamp: reply.timestamp,
    }))
}
