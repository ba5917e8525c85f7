use bcrypt::{hash, verify};
use diesel::prelude::*;
use tracing::{info, warn};

use crate::ai::prompt::registration_greeting;
use crate::error::ApiError;
use crate::models::models::{MessageRole, RegisterRequest, UpdateProfileRequest, User};
use crate::repositories::chat_repository::ChatRepository;
use crate::repositories::user_repository::UserRepository;

const BCRYPT_COST: u32 = 12;

// Valid bcrypt hash of a random throwaway password, verified on the
// missing-user path so both login failures take comparable time.
const DUMMY_HASH: &str = "$2b$12$C0s1PZb2zv8bRlCKODFIeuAOwk0bHOCywWbEojRAZTZVQNII0nyTW";

pub struct AuthService;

impl AuthService {
    /// Creates the user, its default settings and the welcome message from
    /// Luna. The caller has already run the DTO validators.
    pub fn register(
        conn: &mut SqliteConnection,
        payload: &RegisterRequest,
    ) -> Result<User, ApiError> {
        if payload.password != payload.confirm_password {
            return Err(ApiError::BadRequest("Пароли не совпадают".to_string()));
        }

        let username = payload.username.trim();
        let password_hash = hash(&payload.password, BCRYPT_COST)?;

        let user = UserRepository::create(conn, username, &password_hash, payload.email.as_deref())?;

        ChatRepository::append(
            conn,
            user.id,
            MessageRole::Assistant,
            &registration_greeting(&user.username),
        )?;

        info!("User {} registered", user.id);
        Ok(user)
    }

    /// Both failure modes answer with the same neutral message.
    pub fn login(
        conn: &mut SqliteConnection,
        username: &str,
        password: &str,
    ) -> Result<User, ApiError> {
        let user = UserRepository::find_by_username(conn, username.trim())?;

        let user = match user {
            Some(user) => user,
            None => {
                // Dummy verification to level timing against unknown names
                let _ = verify(password, DUMMY_HASH)?;
                warn!("Login attempt for unknown username");
                return Err(ApiError::Auth("Неверное имя или пароль".to_string()));
            }
        };

        if !verify(password, &user.password_hash)? {
            warn!("Invalid password for user {}", user.id);
            return Err(ApiError::Auth("Неверное имя или пароль".to_string()));
        }

        info!("User {} logged in", user.id);
        Ok(user)
    }

    /// Whitelisted profile fields only; anything else in the payload never
    /// deserializes in the first place. A new password is rehashed here.
    pub fn update_profile(
        conn: &mut SqliteConnection,
        user_id: i32,
        payload: &UpdateProfileRequest,
    ) -> Result<User, ApiError> {
        if let Some(ref username) = payload.username {
            UserRepository::update_username(conn, user_id, username.trim())?;
        }
        if let Some(ref email) = payload.email {
            UserRepository::update_email(conn, user_id, email)?;
        }
        if let Some(ref color) = payload.avatar_color {
            UserRepository::update_avatar_color(conn, user_id, color)?;
        }
        if let Some(ref new_password) = payload.new_password {
            let password_hash = hash(new_password, BCRYPT_COST)?;
            UserRepository::update_password_hash(conn, user_id, &password_hash)?;
        }

        UserRepository::find_by_id(conn, user_id)?
            .ok_or_else(|| ApiError::Auth("Пользователь не найден".to_string()))
    }
}
