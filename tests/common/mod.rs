use axum_test::TestServer;
use moonline::ai::client::GeminiClient;
use moonline::ai::rotation::KeyRotation;
use moonline::ai::LunaResolver;
use moonline::app::create_router;
use moonline::db::{build_pool, run_migrations};
use moonline::models::models::AppState;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    // Keeps the SQLite file alive for the duration of the test
    _db_dir: TempDir,
}

/// App with remote generation disabled: every reply comes from the fallback
/// table and no network call is ever attempted.
#[allow(dead_code)]
pub fn spawn_app() -> TestApp {
    spawn_app_with_ai(None)
}

/// App with remote generation pointed at a mock Gemini endpoint.
#[allow(dead_code)]
pub fn spawn_app_with_ai(gemini: Option<(String, Vec<String>)>) -> TestApp {
    let db_dir = tempfile::tempdir().expect("temp dir");
    let db_path = db_dir.path().join("moonline_test.db");

    let pool = build_pool(db_path.to_str().expect("utf8 path"), 5).expect("test pool");
    {
        let mut conn = pool.get().expect("test connection");
        run_migrations(&mut conn).expect("test migrations");
    }

    let (api_url, keys, enabled) = match gemini {
        Some((url, keys)) => (url, keys, true),
        None => (
            // Never dialed while disabled
            "http://127.0.0.1:1".to_string(),
            vec![String::new(), String::new()],
            false,
        ),
    };

    let client = GeminiClient::new(reqwest::Client::new(), &api_url, Duration::from_secs(5))
        .expect("test client");
    let rotation = Arc::new(KeyRotation::new(keys));
    let resolver = LunaResolver::new(client, rotation, enabled);

    let state = Arc::new(AppState {
        db: pool,
        jwt_secret: "test_secret_key_minimum_32_characters_long_for_testing".to_string(),
        resolver,
    });

    let server = TestServer::new(create_router(state.clone())).expect("test server");

    TestApp {
        server,
        state,
        _db_dir: db_dir,
    }
}

/// Registers a user and returns the bearer token.
#[allow(dead_code)]
pub async fn register_user(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/api/register")
        .json(&json!({
            "username": username,
            "password": password,
            "confirm_password": password,
        }))
        .await;

    response.assert_status(http::StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    body["token"].as_str().expect("token in response").to_string()
}

/// A wiremock response body in the Gemini generateContent shape.
#[allow(dead_code)]
pub fn gemini_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    })
}
