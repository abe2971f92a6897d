#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use tempfile::TempDir;

use cahier::config::Config;

const BOUNDARY: &str = "cahier-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub db: SqlitePool,
    pub uploads: TempDir,
}

/// One part of a multipart form body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

impl TestApp {
    pub async fn new() -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("Failed to create in-memory SQLite pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let uploads = tempfile::tempdir().expect("Failed to create uploads dir");
        let config = Config {
            uploads_dir: uploads.path().to_path_buf(),
            ..Config::default()
        };

        let router = cahier::build_app(pool.clone(), &config)
            .await
            .expect("Failed to build app");

        Self {
            router,
            db: pool,
            uploads,
        }
    }

    pub fn uploads_dir(&self) -> &Path {
        self.uploads.path()
    }

    /// Send a request through the app and return the response.
    pub async fn request(&self, req: Request<Body>) -> Response {
        tower::ServiceExt::oneshot(self.router.clone(), req)
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.request(req).await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        let req = Request::builder()
            .uri(uri)
            .method("DELETE")
            .body(Body::empty())
            .unwrap();
        self.request(req).await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: Value) -> Response {
        let req = Request::builder()
            .uri(uri)
            .method(method)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(req).await
    }

    pub async fn send_multipart(&self, method: &str, uri: &str, parts: &[Part<'_>]) -> Response {
        let req = Request::builder()
            .uri(uri)
            .method(method)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        self.request(req).await
    }

    /// Create a notebook through the API and return its id.
    pub async fn create_notebook(&self, title: &str) -> String {
        let resp = self
            .send_json("POST", "/api/notebooks", serde_json::json!({ "title": title }))
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        body_json(resp).await["notebook_id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    /// Create a tag through the API and return its id.
    pub async fn create_tag(&self, name: &str, color: &str) -> String {
        let resp = self
            .send_json(
                "POST",
                "/api/tags",
                serde_json::json!({ "name": name, "color": color }),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        body_json(resp).await["tag_id"].as_str().unwrap().to_string()
    }

    /// Create a note through the API and return its id.
    pub async fn create_note(
        &self,
        notebook_id: &str,
        title: &str,
        content: &str,
        is_pinned: bool,
        tag_ids: &[&str],
    ) -> String {
        let pinned = if is_pinned { "true" } else { "false" };
        let mut parts = vec![
            Part::Text("notebook_id", notebook_id),
            Part::Text("title", title),
            Part::Text("content", content),
            Part::Text("is_pinned", pinned),
        ];
        for &id in tag_ids {
            parts.push(Part::Text("tag_ids[]", id));
        }

        let resp = self.send_multipart("POST", "/api/notes", &parts).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        body_json(resp).await["note_id"].as_str().unwrap().to_string()
    }

    /// Insert `count` notes titled `note <n>` straight into the store.
    pub async fn insert_bulk_notes(&self, notebook_id: &str, count: i64) {
        sqlx::query(
            r#"
            WITH RECURSIVE seq(n) AS (
                SELECT 1 UNION ALL SELECT n + 1 FROM seq WHERE n < ?
            )
            INSERT INTO notes (id, notebook_id, title, content, is_pinned, created_at, updated_at)
            SELECT 'bulk-' || n, ?, 'note ' || n, 'bulk content', 0,
                   '2024-01-01T00:00:00.000000Z', '2024-01-01T00:00:00.000000Z'
            FROM seq
            "#,
        )
        .bind(count)
        .bind(notebook_id)
        .execute(&self.db)
        .await
        .expect("Failed to insert bulk notes");
    }

    /// Fetch the notes of a notebook as JSON.
    pub async fn notes_of(&self, notebook_id: &str) -> Vec<Value> {
        let resp = self
            .get(&format!("/api/notebooks/{}/notes", notebook_id))
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        body_json(resp).await.as_array().unwrap().clone()
    }
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Read the full response body as a String.
pub async fn body_string(resp: Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Read the full response body as JSON.
pub async fn body_json(resp: Response) -> Value {
    let body = body_string(resp).await;
    serde_json::from_str(&body).unwrap_or_else(|e| panic!("invalid JSON {body:?}: {e}"))
}

/// Assert the response carries the given status and `{"error": message}` body.
pub async fn assert_error(resp: Response, status: StatusCode, message: &str) {
    assert_eq!(resp.status(), status);
    let body = body_json(resp).await;
    assert_eq!(body["error"], message);
}

/// Names of the tags attached to a note JSON object, sorted.
pub fn tag_names(note: &Value) -> Vec<String> {
    let mut names: Vec<String> = note["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    names
}
