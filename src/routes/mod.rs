pub mod database;
pub mod notebooks;
pub mod notes;
pub mod search;
pub mod tags;

use axum::Json;
use serde_json::{json, Value};

/// `{"message": ...}` body for successful mutations.
pub(crate) fn message(text: &str) -> Json<Value> {
    Json(json!({ "message": text }))
}
