use std::env;
use std::time::Duration;

pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Runtime configuration for the AI layer, read once at startup. Two key
/// slots, both optional; a blank slot is kept in the rotation so the cursor
/// arithmetic matches the configured slot count.
#[derive(Debug, Clone)]
pub struct LunaConfig {
    pub api_keys: Vec<String>,
    pub api_url: String,
    pub timeout: Duration,
    pub enabled: bool,
}

impl LunaConfig {
    pub fn from_env() -> Self {
        let api_keys = vec![
            env::var("GEMINI_API_KEY_1").unwrap_or_default(),
            env::var("GEMINI_API_KEY_2").unwrap_or_default(),
        ];

        let api_url =
            env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string());

        let timeout_secs = env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(30);

        let disabled = env::var("LUNA_AI_DISABLED")
            .map(|raw| matches!(raw.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let has_key = api_keys.iter().any(|key| !key.trim().is_empty());
        let enabled = !disabled && has_key;

        LunaConfig {
            api_keys,
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            enabled,
        }
    }
}
