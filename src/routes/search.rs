use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::repo::search;
use crate::AppState;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    query: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/search", get(search_notes))
}

async fn search_notes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(search::search(&state.db, &params.query).await?))
}
