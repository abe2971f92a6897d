mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, tag_names, TestApp};
use serde_json::json;

#[tokio::test]
async fn tags_are_listed_by_name() {
    let app = TestApp::new().await;
    app.create_tag("Work", "#4444ff").await;
    app.create_tag("Important", "#ff4444").await;

    let resp = app.get("/api/tags").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let tags = body_json(resp).await;
    let names: Vec<&str> = tags
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Important", "Work"]);
    assert_eq!(tags[0]["color"], "#ff4444");
}

#[tokio::test]
async fn create_tag_requires_name_and_color() {
    let app = TestApp::new().await;

    let resp = app
        .send_json("POST", "/api/tags", json!({ "name": "No color" }))
        .await;
    assert_error(
        resp,
        StatusCode::BAD_REQUEST,
        "Tag name and color are required",
    )
    .await;

    let resp = app
        .send_json("POST", "/api/tags", json!({ "name": "", "color": "#fff" }))
        .await;
    assert_error(
        resp,
        StatusCode::BAD_REQUEST,
        "Tag name and color are required",
    )
    .await;
}

#[tokio::test]
async fn duplicate_tag_name_is_a_bad_request() {
    let app = TestApp::new().await;
    app.create_tag("Important", "#ff4444").await;

    let resp = app
        .send_json(
            "POST",
            "/api/tags",
            json!({ "name": "Important", "color": "#000000" }),
        )
        .await;
    assert_error(resp, StatusCode::BAD_REQUEST, "Tag name already exists").await;

    let tags = body_json(app.get("/api/tags").await).await;
    assert_eq!(tags.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn renaming_onto_existing_name_is_a_bad_request() {
    let app = TestApp::new().await;
    app.create_tag("Important", "#ff4444").await;
    let work = app.create_tag("Work", "#4444ff").await;

    let resp = app
        .send_json(
            "PUT",
            &format!("/api/tags/{}", work),
            json!({ "name": "Important", "color": "#4444ff" }),
        )
        .await;
    assert_error(resp, StatusCode::BAD_REQUEST, "Tag name already exists").await;
}

#[tokio::test]
async fn update_tag_changes_what_notes_show() {
    let app = TestApp::new().await;
    let nb = app.create_notebook("Work").await;
    let tag = app.create_tag("Urgent", "#ff0000").await;
    app.create_note(&nb, "Fire", "", false, &[&tag]).await;

    let resp = app
        .send_json(
            "PUT",
            &format!("/api/tags/{}", tag),
            json!({ "name": "Later", "color": "#00ff00" }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["message"], "Tag updated successfully");

    let notes = app.notes_of(&nb).await;
    assert_eq!(tag_names(&notes[0]), vec!["Later"]);
    assert_eq!(notes[0]["tags"][0]["color"], "#00ff00");
}

#[tokio::test]
async fn update_missing_tag_is_not_found() {
    let app = TestApp::new().await;

    let resp = app
        .send_json(
            "PUT",
            "/api/tags/nope",
            json!({ "name": "x", "color": "#000" }),
        )
        .await;
    assert_error(resp, StatusCode::NOT_FOUND, "Tag not found").await;
}

#[tokio::test]
async fn delete_tag_detaches_it_from_notes() {
    let app = TestApp::new().await;
    let nb = app.create_notebook("Work").await;
    let keep = app.create_tag("Keep", "#111111").await;
    let dropped = app.create_tag("Drop", "#222222").await;
    app.create_note(&nb, "Tagged", "", false, &[&keep, &dropped]).await;

    let resp = app.delete(&format!("/api/tags/{}", dropped)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["message"], "Tag deleted successfully");

    let notes = app.notes_of(&nb).await;
    assert_eq!(tag_names(&notes[0]), vec!["Keep"]);
}

#[tokio::test]
async fn delete_missing_tag_is_not_found() {
    let app = TestApp::new().await;

    let resp = app.delete("/api/tags/nope").await;
    assert_error(resp, StatusCode::NOT_FOUND, "Tag not found").await;
}
