mod common;

use common::spawn_app;
use moonline::config::luna_config::{LunaConfig, DEFAULT_GEMINI_API_URL};
use moonline::config::security_config::{create_token, verify_token};
use serial_test::serial;
use std::env;
use std::time::Duration;

#[tokio::test]
async fn create_and_verify_token_roundtrip() {
    let app = spawn_app();

    let token = create_token(&app.state, "42").expect("create token");
    assert!(!token.is_empty());

    let claims = verify_token(&app.state, &token).expect("verify token");
    assert_eq!(claims.sub, "42");
    assert_eq!(claims.user_id().expect("numeric sub"), 42);
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let app = spawn_app();

    assert!(verify_token(&app.state, "invalid.token.here").is_err());

    let token = create_token(&app.state, "42").expect("create token");
    let mut tampered = token.clone();
    tampered.pop();
    assert!(verify_token(&app.state, &tampered).is_err());
}

#[test]
#[serial]
fn luna_config_reads_keys_and_defaults() {
    env::set_var("GEMINI_API_KEY_1", "key-one");
    env::remove_var("GEMINI_API_KEY_2");
    env::remove_var("GEMINI_API_URL");
    env::remove_var("GEMINI_TIMEOUT_SECS");
    env::remove_var("LUNA_AI_DISABLED");

    let config = LunaConfig::from_env();
    assert_eq!(config.api_keys, vec!["key-one".to_string(), String::new()]);
    assert_eq!(config.api_url, DEFAULT_GEMINI_API_URL);
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.enabled);

    env::remove_var("GEMINI_API_KEY_1");
}

#[test]
#[serial]
fn luna_config_disable_flag_wins_over_keys() {
    env::set_var("GEMINI_API_KEY_1", "key-one");
    env::set_var("LUNA_AI_DISABLED", "true");

    let config = LunaConfig::from_env();
    assert!(!config.enabled);

    env::remove_var("GEMINI_API_KEY_1");
    env::remove_var("LUNA_AI_DISABLED");
}

#[test]
#[serial]
fn luna_config_without_keys_is_disabled() {
    env::remove_var("GEMINI_API_KEY_1");
    env::remove_var("GEMINI_API_KEY_2");
    env::remove_var("LUNA_AI_DISABLED");

    let config = LunaConfig::from_env();
    assert!(!config.enabled);
}

#[test]
#[serial]
fn luna_config_timeout_override() {
    env::set_var("GEMINI_TIMEOUT_SECS", "10");
    let config = LunaConfig::from_env();
    assert_eq!(config.timeout, Duration::from_secs(10));
    env::remove_var("GEMINI_TIMEOUT_SECS");
}
