use crate::config::security_config::create_token;
use crate::error::ApiError;
use crate::models::models::{AppState, AuthResponse, LoginRequest, UserDto};
use crate::services::auth_service::AuthService;
use axum::{extract::State, Json};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid username or password"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let mut conn = state.db.get()?;
    let user = AuthService::login(&mut conn, &payload.username, &payload.password)?;
    let token = create_token(&state, &user.id.to_string())?;

    Ok(Json(AuthResponse {
        success: true,
        token,
        user: UserDto::from(user),
    }))
}
