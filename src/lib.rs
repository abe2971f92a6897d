pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repo;
pub mod routes;

use std::path::PathBuf;

use axum::http::{header, HeaderValue};
use axum::{routing::get, Router};
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub uploads_dir: PathBuf,
}

async fn health() -> &'static str {
    "ok"
}

/// Build the full Axum application router.
///
/// Caller is responsible for running database migrations on `pool` beforehand.
/// The uploads directory from `config` is created if it does not exist.
pub async fn build_app(pool: SqlitePool, config: &Config) -> std::io::Result<Router> {
    tokio::fs::create_dir_all(&config.uploads_dir).await?;

    let state = AppState {
        db: pool,
        uploads_dir: config.uploads_dir.clone(),
    };

    let router = Router::new()
        .route("/health", get(health))
        .merge(routes::notebooks::router())
        .merge(routes::notes::router(config.max_upload_bytes))
        .merge(routes::tags::router())
        .merge(routes::search::router())
        .merge(routes::database::router())
        .nest_service(
            "/uploads",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("public, max-age=86400"),
                ))
                .service(ServeDir::new(&config.uploads_dir)),
        )
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state);

    Ok(router)
}
