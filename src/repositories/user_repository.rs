use chrono::Utc;
use diesel::prelude::*;

use crate::error::ApiError;
use crate::models::models::{NewUser, NewUserSettings, User};
use crate::schema::{user_settings, users};

pub struct UserRepository;

impl UserRepository {
    /// Inserts the user together with its default settings row; both succeed
    /// or the user id never becomes visible.
    pub fn create(
        conn: &mut SqliteConnection,
        username: &str,
        password_hash: &str,
        email: Option<&str>,
    ) -> Result<User, ApiError> {
        conn.transaction(|conn| {
            let user = diesel::insert_into(users::table)
                .values(NewUser {
                    username: username.to_string(),
                    password_hash: password_hash.to_string(),
                    email: email.map(str::to_string),
                    created_at: Utc::now().naive_utc(),
                })
                .get_result::<User>(conn)
                .map_err(map_unique_violation)?;

            diesel::insert_into(user_settings::table)
                .values(NewUserSettings { user_id: user.id })
                .execute(conn)
                .map_err(ApiError::Database)?;

            Ok(user)
        })
    }

    pub fn find_by_id(conn: &mut SqliteConnection, user_id: i32) -> Result<Option<User>, ApiError> {
        users::table
            .find(user_id)
            .first::<User>(conn)
            .optional()
            .map_err(ApiError::Database)
    }

    pub fn find_by_username(
        conn: &mut SqliteConnection,
        name: &str,
    ) -> Result<Option<User>, ApiError> {
        users::table
            .filter(users::username.eq(name))
            .first::<User>(conn)
            .optional()
            .map_err(ApiError::Database)
    }

    pub fn update_username(
        conn: &mut SqliteConnection,
        user_id: i32,
        username: &str,
    ) -> Result<(), ApiError> {
        diesel::update(users::table.find(user_id))
            .set(users::username.eq(username))
            .execute(conn)
            .map_err(map_unique_violation)?;
        Ok(())
    }

    pub fn update_email(
        conn: &mut SqliteConnection,
        user_id: i32,
        email: &str,
    ) -> Result<(), ApiError> {
        diesel::update(users::table.find(user_id))
            .set(users::email.eq(email))
            .execute(conn)
            .map_err(ApiError::Database)?;
        Ok(())
    }

    pub fn update_avatar_color(
        conn: &mut SqliteConnection,
        user_id: i32,
        color: &str,
    ) -> Result<(), ApiError> {
        diesel::update(users::table.find(user_id))
            .set(users::avatar_color.eq(color))
            .execute(conn)
            .map_err(ApiError::Database)?;
        Ok(())
    }

    /// `password_hash` is already bcrypt output; plaintext never reaches here.
    pub fn update_password_hash(
        conn: &mut SqliteConnection,
        user_id: i32,
        password_hash: &str,
    ) -> Result<(), ApiError> {
        diesel::update(users::table.find(user_id))
            .set(users::password_hash.eq(password_hash))
            .execute(conn)
            .map_err(ApiError::Database)?;
        Ok(())
    }
}

fn map_unique_violation(e: diesel::result::Error) -> ApiError {
    if matches!(
        e,
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _
        )
    ) {
        ApiError::DuplicateUsername
    } else {
        ApiError::Database(e)
    }
}
