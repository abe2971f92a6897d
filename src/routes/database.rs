use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};

use crate::error::AppError;
use crate::repo::tables;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/database/tables", get(list_tables))
}

async fn list_tables(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(tables::dump_tables(&state.db).await?))
}
