mod common;

use common::{register_user, spawn_app};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn mood_entry_is_stored_with_an_insight() {
    let app = spawn_app();
    let token = register_user(&app.server, "Ann", "1234").await;

    let response = app
        .server
        .post("/api/mood")
        .authorization_bearer(&token)
        .json(&json!({"mood": 2, "note": "rough day"}))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert!(body["entry_id"].as_i64().unwrap() > 0);
    assert!(!body["ai_insight"].as_str().unwrap().is_empty());

    let history = app
        .server
        .get("/api/mood/history")
        .authorization_bearer(&token)
        .await;
    history.assert_status_ok();
    let history: serde_json::Value = history.json();
    let entries = history["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["mood"], 2);
    assert_eq!(entries[0]["note"], "rough day");
    assert!(!entries[0]["ai_insight"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn out_of_range_mood_is_rejected_without_writing_a_row() {
    let app = spawn_app();
    let token = register_user(&app.server, "ann", "1234").await;

    for bad_mood in [0, 6, -1] {
        let response = app
            .server
            .post("/api/mood")
            .authorization_bearer(&token)
            .json(&json!({ "mood": bad_mood }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Выбери настроение от 1 до 5");
    }

    let history = app
        .server
        .get("/api/mood/history")
        .authorization_bearer(&token)
        .await;
    let history: serde_json::Value = history.json();
    assert!(history["entries"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn the_whole_mood_scale_is_accepted() {
    let app = spawn_app();
    let token = register_user(&app.server, "ann", "1234").await;

    for mood in 1..=5 {
        let response = app
            .server
            .post("/api/mood")
            .authorization_bearer(&token)
            .json(&json!({ "mood": mood }))
            .await;
        response.assert_status_ok();
    }
}

#[tokio::test]
async fn mood_history_is_newest_first() {
    let app = spawn_app();
    let token = register_user(&app.server, "ann", "1234").await;

    for (mood, note) in [(1, "first"), (3, "second"), (5, "third")] {
        app.server
            .post("/api/mood")
            .authorization_bearer(&token)
            .json(&json!({ "mood": mood, "note": note }))
            .await
            .assert_status_ok();
    }

    let history = app
        .server
        .get("/api/mood/history")
        .authorization_bearer(&token)
        .await;
    let history: serde_json::Value = history.json();
    let notes: Vec<&str> = history["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["note"].as_str().unwrap())
        .collect();
    assert_eq!(notes, ["third", "second", "first"]);
}

#[tokio::test]
async fn stats_are_zero_for_a_fresh_user() {
    let app = spawn_app();
    let token = register_user(&app.server, "ann", "1234").await;

    let response = app
        .server
        .get("/api/mood/stats")
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let stats = &body["stats"];
    assert_eq!(stats["average"], 0.0);
    assert_eq!(stats["total"], 0);
    assert_eq!(stats["distribution"], json!({}));
    assert_eq!(stats["weekly"], json!([]));
}

#[tokio::test]
async fn stats_average_and_distribution_match_the_entries() {
    let app = spawn_app();
    let token = register_user(&app.server, "ann", "1234").await;

    for mood in [2, 3, 5] {
        app.server
            .post("/api/mood")
            .authorization_bearer(&token)
            .json(&json!({ "mood": mood }))
            .await
            .assert_status_ok();
    }

    let response = app
        .server
        .get("/api/mood/stats")
        .authorization_bearer(&token)
        .await;
    let body: serde_json::Value = response.json();
    let stats = &body["stats"];

    // (2 + 3 + 5) / 3 = 3.33 after rounding
    assert_eq!(stats["average"], 3.33);
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["distribution"]["2"], 1);
    assert_eq!(stats["distribution"]["3"], 1);
    assert_eq!(stats["distribution"]["5"], 1);

    // All three entries landed today
    let weekly = stats["weekly"].as_array().unwrap();
    assert_eq!(weekly.len(), 1);
    assert_eq!(weekly[0]["avg_mood"], 3.33);
}

#[tokio::test]
async fn mood_entries_are_scoped_to_their_owner() {
    let app = spawn_app();
    let ann = register_user(&app.server, "ann", "1234").await;
    let bob = register_user(&app.server, "bob", "1234").await;

    app.server
        .post("/api/mood")
        .authorization_bearer(&ann)
        .json(&json!({"mood": 5}))
        .await
        .assert_status_ok();

    let bobs = app
        .server
        .get("/api/mood/history")
        .authorization_bearer(&bob)
        .await;
    let bobs: serde_json::Value = bobs.json();
    assert!(bobs["entries"].as_array().unwrap().is_empty());
}
