use crate::config::security_config::create_token;
use crate::error::ApiError;
use crate::models::models::{AppState, AuthResponse, RegisterRequest, UserDto};
use crate::services::auth_service::AuthService;
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Invalid input or username taken"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    payload.validate()?;

    let mut conn = state.db.get()?;
    let user = AuthService::register(&mut conn, &payload)?;
    let token = create_token(&state, &user.id.to_string())?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            token,
            user: UserDto::from(user),
        }),
    ))
}
