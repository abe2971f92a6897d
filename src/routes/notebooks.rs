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
use crate::repo::{notebooks, notes};
use crate::AppState;

#[derive(Deserialize)]
pub struct NotebookPayload {
    #[serde(default)]
    title: String,
    description: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/notebooks", get(list_notebooks).post(create_notebook))
        .route("/api/notebooks/{id}", put(update_notebook).delete(delete_notebook))
        .route("/api/notebooks/{id}/notes", get(list_notes))
}

async fn list_notebooks(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(notebooks::list_notebooks(&state.db).await?))
}

async fn create_notebook(
    State(state): State<AppState>,
    payload: Result<Json<NotebookPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let id = notebooks::create_notebook(&state.db, &payload.title, payload.description).await?;

    tracing::info!(notebook_id = %id, "notebook created");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Notebook created successfully",
            "notebook_id": id,
        })),
    ))
}

async fn update_notebook(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NotebookPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    notebooks::update_notebook(&state.db, &id, &payload.title, payload.description).await?;
    Ok(message("Notebook updated successfully"))
}

async fn delete_notebook(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let removed = notebooks::delete_notebook(&state.db, &id).await?;

    tracing::info!(notebook_id = %id, notes_removed = removed, "notebook deleted");
    Ok(message("Notebook deleted successfully"))
}

async fn list_notes(
    State(state): State<AppState>,
    Path(notebook_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(notes::list_notes_by_notebook(&state.db, &notebook_id).await?))
}
