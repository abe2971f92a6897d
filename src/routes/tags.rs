use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::message;
use crate::error::AppError;
use crate::repo::tags;
use crate::AppState;

#[derive(Deserialize)]
pub struct TagPayload {
    #[serde(default)]
    name: String,
    #[serde(default)]
    color: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tags", get(list_tags).post(create_tag))
        .route("/api/tags/{id}", put(update_tag).delete(delete_tag))
}

async fn list_tags(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(tags::list_tags(&state.db).await?))
}

async fn create_tag(
    State(state): State<AppState>,
    payload: Result<Json<TagPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let id = tags::create_tag(&state.db, &payload.name, &payload.color).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Tag created successfully",
            "tag_id": id,
        })),
    ))
}

async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TagPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    tags::update_tag(&state.db, &id, &payload.name, &payload.color).await?;
    Ok(message("Tag updated successfully"))
}

async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tags::delete_tag(&state.db, &id).await?;
    Ok(message("Tag deleted successfully"))
}
