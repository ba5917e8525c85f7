use diesel::prelude::*;

use crate::error::ApiError;
use crate::models::models::{NewUserSettings, SettingsDto, UserSettings};
use crate::schema::user_settings;

pub struct SettingsRepository;

impl SettingsRepository {
    /// The settings row is created with the user, but a missing row still
    /// answers with the defaults rather than an error.
    pub fn for_user(conn: &mut SqliteConnection, user_id: i32) -> Result<SettingsDto, ApiError> {
        let row = user_settings::table
            .filter(user_settings::user_id.eq(user_id))
            .first::<UserSettings>(conn)
            .optional()
            .map_err(ApiError::Database)?;

        Ok(row.map(SettingsDto::from).unwrap_or(SettingsDto {
            theme: "dark".to_string(),
            notifications: true,
        }))
    }

    pub fn update(
        conn: &mut SqliteConnection,
        user_id: i32,
        theme: Option<&str>,
        notifications: Option<bool>,
    ) -> Result<SettingsDto, ApiError> {
        // Older accounts may predate the settings row; create it on demand.
        let exists = user_settings::table
            .filter(user_settings::user_id.eq(user_id))
            .count()
            .get_result::<i64>(conn)
            .map_err(ApiError::Database)?
            > 0;
        if !exists {
            diesel::insert_into(user_settings::table)
                .values(NewUserSettings { user_id })
                .execute(conn)
                .map_err(ApiError::Database)?;
        }

        if let Some(theme) = theme {
            diesel::update(user_settings::table.filter(user_settings::user_id.eq(user_id)))
                .set(user_settings::theme.eq(theme))
                .execute(conn)
                .map_err(ApiError::Database)?;
        }
        if let Some(notifications) = notifications {
            diesel::update(user_settings::table.filter(user_settings::user_id.eq(user_id)))
                .set(user_settings::notifications.eq(notifications as i32))
                .execute(conn)
                .map_err(ApiError::Database)?;
        }

        Self::for_user(conn, user_id)
    }
}
