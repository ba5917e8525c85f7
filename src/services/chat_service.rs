use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::ai::prompt::{cleared_chat_greeting, AUTH_CONTEXT_WINDOW, GUEST_CONTEXT_WINDOW};
use crate::error::ApiError;
use crate::models::models::{
    AppState, ChatMessageDto, ContextMessage, GuestChatRequest, MessageRole,
};
use crate::repositories::chat_repository::ChatRepository;
use crate::repositories::user_repository::UserRepository;

/// Rows returned by a history fetch.
pub const HISTORY_LIMIT: i64 = 50;

pub struct ChatReply {
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

pub struct ChatService;

impl ChatService {
    /// One authenticated turn: resolve a reply from the recent context, then
    /// persist the user line and the assistant line in that order. Fallback
    /// replies are persisted too, so history shows exactly what the user saw.
    pub async fn authenticated_turn(
        state: &AppState,
        user_id: i32,
        message: &str,
    ) -> Result<ChatReply, ApiError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ApiError::BadRequest("Пустое сообщение".to_string()));
        }

        // The pooled connection is released before the (slow) remote call.
        let context = {
            let mut conn = state.db.get()?;
            ChatRepository::recent_context(&mut conn, user_id, AUTH_CONTEXT_WINDOW as i64)?
        };

        let resolution = state
            .resolver
            .resolve_chat(message, &context, AUTH_CONTEXT_WINDOW)
            .await;

        let mut conn = state.db.get()?;
        ChatRepository::append(&mut conn, user_id, MessageRole::User, message)?;
        let assistant_row =
            ChatRepository::append(&mut conn, user_id, MessageRole::Assistant, &resolution.text)?;

        Ok(ChatReply {
            text: resolution.text,
            timestamp: assistant_row.created_at.and_utc(),
        })
    }

    /// Guest turn: the caller supplies its own history and nothing touches
    /// the database.
    pub async fn guest_turn(
        state: &AppState,
        payload: &GuestChatRequest,
    ) -> Result<ChatReply, ApiError> {
        let message = payload.message.trim();
        if message.is_empty() {
            return Err(ApiError::BadRequest("Пустое сообщение".to_string()));
        }

        let history: Vec<ContextMessage> = payload.history.clone();
        let resolution = state
            .resolver
            .resolve_chat(message, &history, GUEST_CONTEXT_WINDOW)
            .await;

        Ok(ChatReply {
            text: resolution.text,
            timestamp: Utc::now(),
        })
    }

    pub fn history(
        conn: &mut SqliteConnection,
        user_id: i32,
    ) -> Result<Vec<ChatMessageDto>, ApiError> {
        Ok(ChatRepository::history(conn, user_id, HISTORY_LIMIT)?
            .into_iter()
            .map(ChatMessageDto::from)
            .collect())
    }

    /// Deletes everything, then seeds a single fresh greeting so the
    /// conversation never renders empty.
    pub fn clear(conn: &mut SqliteConnection, user_id: i32) -> Result<(), ApiError> {
        let user = UserRepository::find_by_id(conn, user_id)?
            .ok_or_else(|| ApiError::Auth("Пользователь не найден".to_string()))?;

        ChatRepository::clear(conn, user_id)?;
        ChatRepository::append(
            conn,
            user_id,
            MessageRole::Assistant,
            &cleared_chat_greeting(&user.username),
        )?;
        Ok(())
    }
}
