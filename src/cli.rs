use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use sqlx::SqlitePool;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::models::timestamp;

#[derive(Parser)]
#[command(name = "cahier")]
#[command(author, version, about = "Notebooks, notes and tags over a JSON API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Insert the sample notebooks, tags and notes
    Seed,
}

pub async fn serve(pool: SqlitePool, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let app = crate::build_app(pool, config).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

const SAMPLE_NOTEBOOKS: &[(&str, &str, &str)] = &[
    ("nb1", "Work Notes", "All work-related notes and documents"),
    ("nb2", "Personal Notes", "Personal thoughts and ideas"),
];

const SAMPLE_TAGS: &[(&str, &str, &str)] = &[
    ("tag1", "Important", "#ff4444"),
    ("tag2", "Work", "#4444ff"),
];

// (id, notebook_id, title, content, is_pinned)
const SAMPLE_NOTES: &[(&str, &str, &str, &str, bool)] = &[
    ("n1", "nb1", "Meeting Notes", "Discussion points from team meeting...", true),
    ("n2", "nb2", "Ideas", "Random thoughts and ideas...", false),
];

const SAMPLE_LINKS: &[(&str, &str)] = &[("n1", "tag1"), ("n1", "tag2")];

/// Insert the sample data set. Rows that already exist are left alone.
pub async fn seed_sample_data(pool: &SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
    let now = timestamp();
    let mut tx = pool.begin().await?;

    for &(id, title, description) in SAMPLE_NOTEBOOKS {
        sqlx::query(
            "INSERT OR IGNORE INTO notebooks (id, title, description, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;
    }

    for &(id, name, color) in SAMPLE_TAGS {
        sqlx::query("INSERT OR IGNORE INTO tags (id, name, color) VALUES (?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(color)
            .execute(&mut *tx)
            .await?;
    }

    for &(id, notebook_id, title, content, is_pinned) in SAMPLE_NOTES {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO notes (id, notebook_id, title, content, is_pinned, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(notebook_id)
        .bind(title)
        .bind(content)
        .bind(is_pinned)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;
    }

    for &(note_id, tag_id) in SAMPLE_LINKS {
        sqlx::query("INSERT OR IGNORE INTO note_tags (note_id, tag_id) VALUES (?, ?)")
            .bind(note_id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    println!(
        "Seeded {} notebooks, {} tags, {} notes",
        SAMPLE_NOTEBOOKS.len(),
        SAMPLE_TAGS.len(),
        SAMPLE_NOTES.len()
    );
    Ok(())
}
