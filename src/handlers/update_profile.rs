use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::models::models::{AppState, ProfileResponse, UpdateProfileRequest, UserDto};
use crate::services::auth_service::AuthService;
use axum::{extract::State, Extension, Json};
use std::sync::Arc;
use validator::Validate;

#[utoipa::path(
    put,
    path = "/api/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Invalid input or username taken"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearerAuth" = [])),
    tag = "Profile"
)]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    payload.validate()?;

    let user_id = claims.user_id()?;
    let mut conn = state.db.get()?;
    let user = AuthService::update_profile(&mut conn, user_id, &payload)?;

    Ok(Json(ProfileResponse {
        success: true,
        user: UserDto::from(user),
    }))
}
