use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::{timestamp, Notebook};

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::validation("Title is required"));
    }
    Ok(())
}

pub async fn list_notebooks(db: &SqlitePool) -> Result<Vec<Notebook>, AppError> {
    let notebooks: Vec<Notebook> = sqlx::query_as("SELECT * FROM notebooks ORDER BY updated_at DESC")
        .fetch_all(db)
        .await?;
    Ok(notebooks)
}

pub async fn create_notebook(
    db: &SqlitePool,
    title: &str,
    description: Option<String>,
) -> Result<String, AppError> {
    validate_title(title)?;

    let notebook = Notebook::new(title.to_string(), description);
    sqlx::query(
        "INSERT INTO notebooks (id, title, description, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&notebook.id)
    .bind(&notebook.title)
    .bind(&notebook.description)
    .bind(&notebook.created_at)
    .bind(&notebook.updated_at)
    .execute(db)
    .await?;

    Ok(notebook.id)
}

pub async fn update_notebook(
    db: &SqlitePool,
    id: &str,
    title: &str,
    description: Option<String>,
) -> Result<(), AppError> {
    validate_title(title)?;

    let result = sqlx::query(
        "UPDATE notebooks SET title = ?, description = ?, updated_at = ? WHERE id = ?",
    )
    .bind(title.trim())
    .bind(&description)
    .bind(timestamp())
    .bind(id)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Notebook not found"));
    }
    Ok(())
}

/// Delete a notebook together with its notes and their tag links.
///
/// Returns the number of notes removed.
pub async fn delete_notebook(db: &SqlitePool, id: &str) -> Result<u64, AppError> {
    let mut tx = db.begin().await?;

    sqlx::query(
        "DELETE FROM note_tags WHERE note_id IN (SELECT id FROM notes WHERE notebook_id = ?)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    let notes = sqlx::query("DELETE FROM notes WHERE notebook_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM notebooks WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Notebook not found"));
    }

    tx.commit().await?;
    Ok(notes.rows_affected())
}
