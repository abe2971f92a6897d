use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl Tag {
    pub fn new(name: String, color: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            color: color.trim().to_string(),
        }
    }
}

/// One (note, tag) pair from the link table joined with its tag.
#[derive(Debug, Clone, FromRow)]
pub struct NoteTagRow {
    pub note_id: String,
    pub id: String,
    pub name: String,
    pub color: String,
}

impl From<NoteTagRow> for Tag {
    fn from(row: NoteTagRow) -> Self {
        Tag {
            id: row.id,
            name: row.name,
            color: row.color,
        }
    }
}
