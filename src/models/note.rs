use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{timestamp, Tag};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: String,
    pub notebook_id: String,
    pub title: String,
    pub content: Option<String>,
    pub is_pinned: bool,
    pub created_at: String,
    pub updated_at: String,
    pub pdf_path: Option<String>,
}

impl Note {
    pub fn new(
        notebook_id: String,
        title: String,
        content: Option<String>,
        is_pinned: bool,
        pdf_path: Option<String>,
    ) -> Self {
        let now = timestamp();
        Self {
            id: Uuid::new_v4().to_string(),
            notebook_id,
            title: title.trim().to_string(),
            content,
            is_pinned,
            created_at: now.clone(),
            updated_at: now,
            pdf_path,
        }
    }
}

/// A note as returned by the API: its own columns plus its tags.
#[derive(Debug, Clone, Serialize)]
pub struct NoteWithTags {
    #[serde(flatten)]
    pub note: Note,
    pub tags: Vec<Tag>,
}

/// Note row joined with the title of the notebook it lives in.
#[derive(Debug, Clone, FromRow)]
pub struct NoteWithNotebook {
    #[sqlx(flatten)]
    pub note: Note,
    pub notebook_title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub note: Note,
    pub notebook_title: String,
    pub tags: Vec<Tag>,
}
