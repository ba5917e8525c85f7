use crate::handlers::{
    chat::__path_chat, chat_clear::__path_chat_clear, chat_guest::__path_chat_guest,
    chat_history::__path_chat_history, current_user::__path_current_user, health::__path_health,
    login::__path_login, mood::__path_mood, mood_history::__path_mood_history,
    mood_stats::__path_mood_stats, register::__path_register, settings::__path_get_settings,
    settings::__path_update_settings, update_profile::__path_update_profile,
};
use crate::models::models::*;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        register, login, current_user, update_profile,
        chat, chat_guest, chat_history, chat_clear,
        mood, mood_history, mood_stats,
        get_settings, update_settings, health
    ),
    components(schemas(RegisterRequest, LoginRequest, UpdateProfileRequest, ChatRequest,
        GuestChatRequest, MoodRequest, UpdateSettingsRequest)),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Profile", description = "User profile"),
        (name = "Chat", description = "Conversations with Luna"),
        (name = "Mood", description = "Mood diary and statistics"),
        (name = "Settings", description = "Per-user settings"),
        (name = "Health", description = "Liveness")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        // Define the security scheme in components.securitySchemes
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "bearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
