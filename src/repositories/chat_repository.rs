use chrono::Utc;
use diesel::prelude::*;

use crate::error::ApiError;
use crate::models::models::{ChatMessage, ContextMessage, MessageRole, NewChatMessage};
use crate::schema::chat_messages;

pub struct ChatRepository;

impl ChatRepository {
    pub fn append(
        conn: &mut SqliteConnection,
        user_id: i32,
        role: MessageRole,
        content: &str,
    ) -> Result<ChatMessage, ApiError> {
        diesel::insert_into(chat_messages::table)
            .values(NewChatMessage {
                user_id,
                role: role.as_str().to_string(),
                content: content.to_string(),
                created_at: Utc::now().naive_utc(),
            })
            .get_result::<ChatMessage>(conn)
            .map_err(ApiError::Database)
    }

    /// Oldest first, as displayed.
    pub fn history(
        conn: &mut SqliteConnection,
        user_id: i32,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, ApiError> {
        chat_messages::table
            .filter(chat_messages::user_id.eq(user_id))
            .order((chat_messages::created_at.asc(), chat_messages::id.asc()))
            .limit(limit)
            .load::<ChatMessage>(conn)
            .map_err(ApiError::Database)
    }

    /// The most recent `limit` turns for prompt context. Reads newest-first
    /// to pick the tail, then reverses back to oldest-first.
    pub fn recent_context(
        conn: &mut SqliteConnection,
        user_id: i32,
        limit: i64,
    ) -> Result<Vec<ContextMessage>, ApiError> {
        let mut rows = chat_messages::table
            .filter(chat_messages::user_id.eq(user_id))
            .order((chat_messages::created_at.desc(), chat_messages::id.desc()))
            .limit(limit)
            .load::<ChatMessage>(conn)
            .map_err(ApiError::Database)?;

        rows.reverse();
        Ok(rows
            .into_iter()
            .map(|row| ContextMessage {
                role: MessageRole::from_db(&row.role),
                content: row.content,
            })
            .collect())
    }

    pub fn clear(conn: &mut SqliteConnection, user_id: i32) -> Result<usize, ApiError> {
        diesel::delete(chat_messages::table.filter(chat_messages::user_id.eq(user_id)))
            .execute(conn)
            .map_err(ApiError::Database)
    }
}
