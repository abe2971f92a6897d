//! Access layer: every statement the API issues against the store.
//!
//! Functions take the pool (or an open transaction) explicitly, so callers and
//! tests decide which database they talk to.

pub mod notebooks;
pub mod notes;
pub mod search;
pub mod tables;
pub mod tags;

use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::models::tag::NoteTagRow;
use crate::models::Tag;

/// Group joined (note, tag) rows into one tag list per note id.
///
/// Row order is kept within each list.
pub(crate) fn group_tags(rows: Vec<NoteTagRow>) -> HashMap<String, Vec<Tag>> {
    let mut grouped: HashMap<String, Vec<Tag>> = HashMap::new();
    for row in rows {
        grouped.entry(row.note_id.clone()).or_default().push(row.into());
    }
    grouped
}

/// Fetch the tags of every note selected by `note_filter` with a single join.
///
/// `note_filter` is a `SELECT id FROM notes ...` subquery whose `?`
/// placeholders take `binds` in order, so the number of bound values does not
/// grow with the number of notes.
pub(crate) async fn tags_by_note(
    db: &SqlitePool,
    note_filter: &str,
    binds: &[&str],
) -> Result<HashMap<String, Vec<Tag>>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT nt.note_id, t.id, t.name, t.color
        FROM note_tags nt
        JOIN tags t ON t.id = nt.tag_id
        WHERE nt.note_id IN ({note_filter})
        ORDER BY t.name ASC
        "#
    );

    let mut query = sqlx::query_as::<_, NoteTagRow>(&sql);
    for value in binds {
        query = query.bind(*value);
    }

    let rows = query.fetch_all(db).await?;
    Ok(group_tags(rows))
}
