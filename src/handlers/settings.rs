use crate::config::security_config::Claims;
use crate::error::ApiError;
use crate::models::models::{AppState, SettingsResponse, UpdateSettingsRequest};
use crate::repositories::settings_repository::SettingsRepository;
use axum::{extract::State, Extension, Json};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "User settings", body = SettingsResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearerAuth" = [])),
    tag = "Settings"
)]
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let user_id = claims.user_id()?;
    let mut conn = state.db.get()?;
    let settings = SettingsRepository::for_user(&mut conn, user_id)?;

    Ok(Json(SettingsResponse {
        success: true,
        settings,
    }))
}

#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Settings updated", body = SettingsResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearerAuth" = [])),
    tag = "Settings"
)]
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let user_id = claims.user_id()?;
    let mut conn = state.db.get()?;
    let settings = SettingsRepository::update(
        &mut conn,
        user_id,
        payload.theme.as_deref(),
        payload.notifications,
    )?;

    Ok(Json(SettingsResponse {
        success: true,
        settings,
    }))
}
