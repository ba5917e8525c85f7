use crate::ai::LunaResolver;
use crate::db::DbPool;
use crate::schema::{chat_messages, mood_entries, user_settings, users};
use crate::utility::{validate_avatar_color, validate_password, validate_username};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Queryable, Selectable, Identifiable, Debug)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(table_name = users)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub avatar_color: String,
    pub created_at: NaiveDateTime,
}

// avatar_color is omitted so the column default applies
#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Identifiable, Debug)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(table_name = mood_entries)]
pub struct MoodEntry {
    pub id: i32,
    pub user_id: i32,
    pub mood: i32,
    pub note: Option<String>,
    pub ai_insight: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = mood_entries)]
pub struct NewMoodEntry {
    pub user_id: i32,
    pub mood: i32,
    pub note: Option<String>,
    pub ai_insight: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Identifiable, Debug)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(table_name = chat_messages)]
pub struct ChatMessage {
    pub id: i32,
    pub user_id: i32,
    pub role: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = chat_messages)]
pub struct NewChatMessage {
    pub user_id: i32,
    pub role: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Identifiable, Debug)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(table_name = user_settings)]
pub struct UserSettings {
    pub id: i32,
    pub user_id: i32,
    pub theme: String,
    pub notifications: i32,
}

// theme/notifications fall back to the column defaults ('dark', 1)
#[derive(Insertable, Debug)]
#[diesel(table_name = user_settings)]
pub struct NewUserSettings {
    pub user_id: i32,
}

/// Chat roles as stored in `chat_messages.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }

    // The role column carries a CHECK constraint, so anything that is not
    // 'user' can only be 'assistant'.
    pub fn from_db(raw: &str) -> MessageRole {
        if raw == "user" {
            MessageRole::User
        } else {
            MessageRole::Assistant
        }
    }
}

/// One prior conversation turn, as fed into the prompt builder. Also the
/// wire shape of the history a guest caller supplies.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContextMessage {
    pub role: MessageRole,
    pub content: String,
}

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub jwt_secret: String,
    pub resolver: LunaResolver,
}

// ---- Request DTOs ----

#[derive(Deserialize, ToSchema, Validate, Debug)]
pub struct RegisterRequest {
    #[validate(custom(function = validate_username))]
    pub username: String,
    #[validate(custom(function = validate_password))]
    pub password: String,
    pub confirm_password: String,
    #[validate(email(message = "Некорректный email"))]
    pub email: Option<String>,
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema, Validate, Debug, Default)]
pub struct UpdateProfileRequest {
    #[validate(custom(function = validate_username))]
    pub username: Option<String>,
    #[validate(email(message = "Некорректный email"))]
    pub email: Option<String>,
    #[validate(custom(function = validate_avatar_color))]
    pub avatar_color: Option<String>,
    #[validate(custom(function = validate_password))]
    pub new_password: Option<String>,
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct GuestChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ContextMessage>,
}

#[derive(Deserialize, ToSchema, Validate, Debug)]
pub struct MoodRequest {
    #[validate(range(min = 1, max = 5, message = "Выбери настроение от 1 до 5"))]
    pub mood: i32,
    pub note: Option<String>,
}

#[derive(Deserialize, ToSchema, Debug, Default)]
pub struct UpdateSettingsRequest {
    pub theme: Option<String>,
    pub notifications: Option<bool>,
}

// ---- Response DTOs ----

/// Public view of a user. The password hash never leaves the entity.
#[derive(Serialize, ToSchema, Debug)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    pub avatar_color: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            username: user.username,
            email: user.email,
            avatar_color: user.avatar_color,
            created_at: user.created_at.and_utc(),
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: UserDto,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: UserDto,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct ChatReplyResponse {
    pub success: bool,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct ChatMessageDto {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ChatMessage> for ChatMessageDto {
    fn from(message: ChatMessage) -> Self {
        ChatMessageDto {
            role: MessageRole::from_db(&message.role),
            content: message.content,
            timestamp: message.created_at.and_utc(),
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct ChatHistoryResponse {
    pub success: bool,
    pub history: Vec<ChatMessageDto>,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct OkResponse {
    pub success: bool,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct MoodEntryResponse {
    pub success: bool,
    pub entry_id: i32,
    pub ai_insight: String,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct MoodEntryDto {
    pub id: i32,
    pub user_id: i32,
    pub mood: i32,
    pub note: Option<String>,
    pub ai_insight: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<MoodEntry> for MoodEntryDto {
    fn from(entry: MoodEntry) -> Self {
        MoodEntryDto {
            id: entry.id,
            user_id: entry.user_id,
            mood: entry.mood,
            note: entry.note,
            ai_insight: entry.ai_insight,
            created_at: entry.created_at.and_utc(),
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct MoodHistoryResponse {
    pub success: bool,
    pub entries: Vec<MoodEntryDto>,
}

#[derive(Serialize, ToSchema, Debug, PartialEq)]
pub struct DailyMood {
    pub date: NaiveDate,
    pub avg_mood: f64,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct MoodStats {
    pub average: f64,
    pub total: i64,
    pub distribution: BTreeMap<i32, i64>,
    pub weekly: Vec<DailyMood>,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct MoodStatsResponse {
    pub success: bool,
    pub stats: MoodStats,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct SettingsDto {
    pub theme: String,
    pub notifications: bool,
}

impl From<UserSettings> for SettingsDto {
    fn from(settings: UserSettings) -> Self {
        SettingsDto {
            theme: settings.theme,
            notifications: settings.notifications != 0,
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct SettingsResponse {
    pub success: bool,
    pub settings: SettingsDto,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct HealthResponse {
    pub status: String,
}
