use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::models::models::{AppState, ProfileResponse, UserDto};
use crate::repositories::user_repository::UserRepository;
use axum::{extract::State, Extension, Json};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current user profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearerAuth" = [])),
    tag = "Profile"
)]
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user_id = claims.user_id()?;
    let mut conn = state.db.get()?;

    let user = UserRepository::find_by_id(&mut conn, user_id)?
        .ok_or_else(|| ApiError::Auth("Пользователь не найден".to_string()))?;

    Ok(Json(ProfileResponse {
        success: true,
        user: UserDto::from(user),
    }))
}
