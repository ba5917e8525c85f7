use axum::{middleware, Router};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::security_config::auth_middleware;
use crate::config::swagger_config::ApiDoc;
use crate::handlers::{
    chat::chat, chat_clear::chat_clear, chat_guest::chat_guest, chat_history::chat_history,
    current_user::current_user, health::health, login::login, mood::mood,
    mood_history::mood_history, mood_stats::mood_stats, register::register,
    settings::get_settings, settings::update_settings, update_profile::update_profile,
};
use crate::models::models::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Public routes (no authentication)
    let public_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", axum::routing::get(health))
        .route("/api/register", axum::routing::post(register))
        .route("/api/login", axum::routing::post(login))
        .route("/api/chat/guest", axum::routing::post(chat_guest));

    // Protected routes (require JWT authentication)
    let protected_router = Router::new()
        .route("/api/me", axum::routing::get(current_user))
        .route("/api/profile", axum::routing::put(update_profile))
        .route("/api/chat", axum::routing::post(chat))
        .route("/api/chat/history", axum::routing::get(chat_history))
        .route("/api/chat/clear", axum::routing::post(chat_clear))
        .route("/api/mood", axum::routing::post(mood))
        .route("/api/mood/history", axum::routing::get(mood_history))
        .route("/api/mood/stats", axum::routing::get(mood_stats))
        .route(
            "/api/settings",
            axum::routing::get(get_settings).put(update_settings),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_router)
        .merge(protected_router)
        .with_state(state)
}
