use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::error::ApiError;
use crate::models::models::{MoodEntry, NewMoodEntry};
use crate::schema::mood_entries;

pub struct MoodRepository;

impl MoodRepository {
    /// Range check happens before any SQL; the table's CHECK constraint is a
    /// second line of defense only.
    pub fn insert(
        conn: &mut SqliteConnection,
        user_id: i32,
        mood: i32,
        note: Option<&str>,
        ai_insight: Option<&str>,
    ) -> Result<MoodEntry, ApiError> {
        if !(1..=5).contains(&mood) {
            return Err(ApiError::BadRequest(
                "Выбери настроение от 1 до 5".to_string(),
            ));
        }

        diesel::insert_into(mood_entries::table)
            .values(NewMoodEntry {
                user_id,
                mood,
                note: note.map(str::to_string),
                ai_insight: ai_insight.map(str::to_string),
                created_at: Utc::now().naive_utc(),
            })
            .get_result::<MoodEntry>(conn)
            .map_err(ApiError::Database)
    }

    /// Newest first.
    pub fn list_for_user(
        conn: &mut SqliteConnection,
        user_id: i32,
        limit: i64,
    ) -> Result<Vec<MoodEntry>, ApiError> {
        mood_entries::table
            .filter(mood_entries::user_id.eq(user_id))
            .order((mood_entries::created_at.desc(), mood_entries::id.desc()))
            .limit(limit)
            .load::<MoodEntry>(conn)
            .map_err(ApiError::Database)
    }

    /// Every entry for the user, as fed into the stats computation.
    pub fn all_for_user(
        conn: &mut SqliteConnection,
        user_id: i32,
    ) -> Result<Vec<MoodEntry>, ApiError> {
        mood_entries::table
            .filter(mood_entries::user_id.eq(user_id))
            .order((mood_entries::created_at.asc(), mood_entries::id.asc()))
            .load::<MoodEntry>(conn)
            .map_err(ApiError::Database)
    }

    pub fn entries_since(
        conn: &mut SqliteConnection,
        user_id: i32,
        since: NaiveDateTime,
    ) -> Result<Vec<MoodEntry>, ApiError> {
        mood_entries::table
            .filter(mood_entries::user_id.eq(user_id))
            .filter(mood_entries::created_at.ge(since))
            .order((mood_entries::created_at.asc(), mood_entries::id.asc()))
            .load::<MoodEntry>(conn)
            .map_err(ApiError::Database)
    }
}
