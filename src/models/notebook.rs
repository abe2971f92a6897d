use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::timestamp;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notebook {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Notebook {
    pub fn new(title: String, description: Option<String>) -> Self {
        let now = timestamp();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.trim().to_string(),
            description,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
