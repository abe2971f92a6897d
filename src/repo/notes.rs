use std::collections::BTreeSet;

use sqlx::{SqliteConnection, SqlitePool};

use super::tags_by_note;
use crate::error::AppError;
use crate::models::{timestamp, Note, NoteWithTags};

/// Fields shared by note creation and update.
#[derive(Debug, Clone, Default)]
pub struct NoteInput {
    pub title: String,
    pub content: Option<String>,
    pub is_pinned: bool,
    /// `None` leaves the links of an existing note untouched.
    pub tag_ids: Option<Vec<String>>,
    /// `None` keeps the stored attachment on update.
    pub pdf_path: Option<String>,
}

/// Attach every tag in `tag_ids` to the note, ignoring repeats.
///
/// Fails on the first id that names no tag.
async fn link_tags(
    conn: &mut SqliteConnection,
    note_id: &str,
    tag_ids: &[String],
) -> Result<(), AppError> {
    let distinct: BTreeSet<&str> = tag_ids
        .iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .collect();

    for tag_id in distinct {
        let result = sqlx::query(
            "INSERT INTO note_tags (note_id, tag_id) SELECT ?, id FROM tags WHERE id = ?",
        )
        .bind(note_id)
        .bind(tag_id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::validation(format!("Unknown tag id: {tag_id}")));
        }
    }
    Ok(())
}

/// Turn a foreign-key failure on `notes.notebook_id` into a validation error.
fn map_missing_notebook(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            AppError::validation("Notebook does not exist")
        }
        _ => AppError::Database(e),
    }
}

pub async fn list_notes_by_notebook(
    db: &SqlitePool,
    notebook_id: &str,
) -> Result<Vec<NoteWithTags>, AppError> {
    let notes: Vec<Note> = sqlx::query_as(
        r#"
        SELECT * FROM notes
        WHERE notebook_id = ?
        ORDER BY is_pinned DESC, updated_at DESC
        "#,
    )
    .bind(notebook_id)
    .fetch_all(db)
    .await?;

    let mut tags = tags_by_note(
        db,
        "SELECT id FROM notes WHERE notebook_id = ?",
        &[notebook_id],
    )
    .await?;

    Ok(notes
        .into_iter()
        .map(|note| {
            let tags = tags.remove(&note.id).unwrap_or_default();
            NoteWithTags { note, tags }
        })
        .collect())
}

pub async fn create_note(
    db: &SqlitePool,
    notebook_id: &str,
    input: NoteInput,
) -> Result<String, AppError> {
    let notebook_id = notebook_id.trim();
    if notebook_id.is_empty() || input.title.trim().is_empty() {
        return Err(AppError::validation("Notebook ID and title are required"));
    }

    // The insert is the first statement so the transaction takes the write
    // lock up front; a stale read snapshot cannot be upgraded under WAL.
    let mut tx = db.begin().await?;

    let note = Note::new(
        notebook_id.to_string(),
        input.title,
        input.content,
        input.is_pinned,
        input.pdf_path,
    );

    sqlx::query(
        r#"
        INSERT INTO notes (id, notebook_id, title, content, is_pinned, created_at, updated_at, pdf_path)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&note.id)
    .bind(&note.notebook_id)
    .bind(&note.title)
    .bind(&note.content)
    .bind(note.is_pinned)
    .bind(&note.created_at)
    .bind(&note.updated_at)
    .bind(&note.pdf_path)
    .execute(&mut *tx)
    .await
    .map_err(map_missing_notebook)?;

    if let Some(tag_ids) = &input.tag_ids {
        link_tags(&mut *tx, &note.id, tag_ids).await?;
    }

    tx.commit().await?;
    Ok(note.id)
}

/// Update a note's columns and, when `tag_ids` is given, replace its tag set.
pub async fn update_note(db: &SqlitePool, id: &str, input: NoteInput) -> Result<(), AppError> {
    if input.title.trim().is_empty() {
        return Err(AppError::validation("Title is required"));
    }

    let mut tx = db.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE notes
        SET title = ?, content = ?, is_pinned = ?, updated_at = ?, pdf_path = COALESCE(?, pdf_path)
        WHERE id = ?
        "#,
    )
    .bind(input.title.trim())
    .bind(&input.content)
    .bind(input.is_pinned)
    .bind(timestamp())
    .bind(&input.pdf_path)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Note not found"));
    }

    if let Some(tag_ids) = &input.tag_ids {
        sqlx::query("DELETE FROM note_tags WHERE note_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        link_tags(&mut *tx, id, tag_ids).await?;
    }

    tx.commit().await?;
    Ok(())
}

pub async fn delete_note(db: &SqlitePool, id: &str) -> Result<(), AppError> {
    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM note_tags WHERE note_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM notes WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Note not found"));
    }

    tx.commit().await?;
    Ok(())
}
