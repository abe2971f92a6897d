use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::Tag;

const DUPLICATE_NAME: &str = "Tag name already exists";

fn validate(name: &str, color: &str) -> Result<(), AppError> {
    if name.trim().is_empty() || color.trim().is_empty() {
        return Err(AppError::validation("Tag name and color are required"));
    }
    Ok(())
}

/// Turn a unique-constraint failure on `tags.name` into a conflict.
fn map_duplicate_name(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict(DUPLICATE_NAME.to_string())
        }
        _ => AppError::Database(e),
    }
}

pub async fn list_tags(db: &SqlitePool) -> Result<Vec<Tag>, AppError> {
    let tags: Vec<Tag> = sqlx::query_as("SELECT * FROM tags ORDER BY name ASC")
        .fetch_all(db)
        .await?;
    Ok(tags)
}

pub async fn create_tag(db: &SqlitePool, name: &str, color: &str) -> Result<String, AppError> {
    validate(name, color)?;

    let tag = Tag::new(name.to_string(), color.to_string());
    sqlx::query("INSERT INTO tags (id, name, color) VALUES (?, ?, ?)")
        .bind(&tag.id)
        .bind(&tag.name)
        .bind(&tag.color)
        .execute(db)
        .await
        .map_err(map_duplicate_name)?;

    Ok(tag.id)
}

pub async fn update_tag(db: &SqlitePool, id: &str, name: &str, color: &str) -> Result<(), AppError> {
    validate(name, color)?;

    let result = sqlx::query("UPDATE tags SET name = ?, color = ? WHERE id = ?")
        .bind(name.trim())
        .bind(color.trim())
        .bind(id)
        .execute(db)
        .await
        .map_err(map_duplicate_name)?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Tag not found"));
    }
    Ok(())
}

/// Remove a tag and every link to it.
pub async fn delete_tag(db: &SqlitePool, id: &str) -> Result<(), AppError> {
    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM note_tags WHERE tag_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM tags WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Tag not found"));
    }

    tx.commit().await?;
    Ok(())
}
