use sqlx::SqlitePool;

use super::tags_by_note;
use crate::error::AppError;
use crate::models::note::NoteWithNotebook;
use crate::models::SearchHit;

/// Escape `LIKE` wildcards so the query matches as a literal substring.
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Notes whose title or content contains `query`, newest first.
pub async fn search(db: &SqlitePool, query: &str) -> Result<Vec<SearchHit>, AppError> {
    if query.is_empty() {
        return Err(AppError::validation("Search query is required"));
    }

    let pattern = like_pattern(query);
    let rows: Vec<NoteWithNotebook> = sqlx::query_as(
        r#"
        SELECT n.*, nb.title AS notebook_title
        FROM notes n
        JOIN notebooks nb ON nb.id = n.notebook_id
        WHERE n.title LIKE ? ESCAPE '\' OR n.content LIKE ? ESCAPE '\'
        ORDER BY n.updated_at DESC
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(db)
    .await?;

    let mut tags = tags_by_note(
        db,
        r#"SELECT id FROM notes WHERE title LIKE ? ESCAPE '\' OR content LIKE ? ESCAPE '\'"#,
        &[pattern.as_str(), pattern.as_str()],
    )
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| SearchHit {
            tags: tags.remove(&row.note.id).unwrap_or_default(),
            note: row.note,
            notebook_title: row.notebook_title,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_query_is_wrapped() {
        assert_eq!(like_pattern("sync"), "%sync%");
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
