use std::path::{Path as FsPath, PathBuf};

use axum::{
    extract::{
        multipart::{Field, MultipartRejection},
        DefaultBodyLimit, Multipart, Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{post, put},
    Json, Router,
};
use serde_json::json;
use uuid::Uuid;

use super::message;
use crate::error::AppError;
use crate::repo::notes::{self, NoteInput};
use crate::AppState;

const PDF_MIME: &str = "application/pdf";

/// Fields of the multipart note form.
#[derive(Debug, Default)]
struct NoteForm {
    notebook_id: String,
    title: String,
    content: Option<String>,
    is_pinned: bool,
    tag_ids: Option<Vec<String>>,
    /// File name of the attachment already written to the uploads directory.
    pdf_path: Option<String>,
}

impl NoteForm {
    fn into_input(self) -> (String, NoteInput) {
        (
            self.notebook_id,
            NoteInput {
                title: self.title,
                content: self.content,
                is_pinned: self.is_pinned,
                tag_ids: self.tag_ids,
                pdf_path: self.pdf_path,
            },
        )
    }
}

/// Checkbox-style flag: `true`, `1` and `on` are set, anything else is not.
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "on"
    )
}

pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/api/notes", post(create_note))
        .route("/api/notes/{id}", put(update_note).delete(delete_note))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// Write an uploaded PDF under a fresh name and return that name.
///
/// An empty file part (no file chosen) yields `None`.
async fn store_pdf(dir: &FsPath, field: Field<'_>) -> Result<Option<String>, AppError> {
    let original = field.file_name().unwrap_or_default().to_string();
    if original.is_empty() {
        return Ok(None);
    }
    if field.content_type() != Some(PDF_MIME) {
        return Err(AppError::validation("Only PDF files are allowed"));
    }

    let ext = FsPath::new(&original)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "pdf".to_string());
    let stored = format!("{}.{}", Uuid::new_v4(), ext);

    let bytes = field.bytes().await?;
    tokio::fs::write(dir.join(&stored), &bytes).await?;

    tracing::info!(file = %stored, size = bytes.len(), "attachment stored");
    Ok(Some(stored))
}

async fn read_fields(
    multipart: &mut Multipart,
    uploads_dir: &FsPath,
    form: &mut NoteForm,
) -> Result<(), AppError> {
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "notebook_id" => form.notebook_id = field.text().await?,
            "title" => form.title = field.text().await?,
            "content" => form.content = Some(field.text().await?),
            "is_pinned" => form.is_pinned = parse_flag(&field.text().await?),
            "tag_ids" | "tag_ids[]" => {
                let value = field.text().await?;
                let ids = form.tag_ids.get_or_insert_with(Vec::new);
                if !value.trim().is_empty() {
                    ids.push(value.trim().to_string());
                }
            }
            "pdf" => {
                if let Some(stored) = store_pdf(uploads_dir, field).await? {
                    if let Some(previous) = form.pdf_path.replace(stored) {
                        discard_upload(uploads_dir, &previous).await;
                    }
                }
            }
            other => tracing::debug!(field = other, "ignoring unknown form field"),
        }
    }
    Ok(())
}

/// Parse the note form, removing any stored attachment if parsing fails.
async fn read_note_form(
    multipart: Result<Multipart, MultipartRejection>,
    uploads_dir: &FsPath,
) -> Result<NoteForm, AppError> {
    let mut multipart = multipart?;
    let mut form = NoteForm::default();
    if let Err(e) = read_fields(&mut multipart, uploads_dir, &mut form).await {
        if let Some(stored) = &form.pdf_path {
            discard_upload(uploads_dir, stored).await;
        }
        return Err(e);
    }
    Ok(form)
}

async fn discard_upload(uploads_dir: &FsPath, stored: &str) {
    let path: PathBuf = uploads_dir.join(stored);
    if let Err(e) = tokio::fs::remove_file(&path).await {
        tracing::warn!("failed to remove attachment {}: {e}", path.display());
    }
}

async fn create_note(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let form = read_note_form(multipart, &state.uploads_dir).await?;
    let stored = form.pdf_path.clone();
    let (notebook_id, input) = form.into_input();

    match notes::create_note(&state.db, &notebook_id, input).await {
        Ok(id) => {
            tracing::info!(note_id = %id, notebook_id = %notebook_id, "note created");
            Ok((
                StatusCode::CREATED,
                Json(json!({
                    "message": "Note created successfully",
                    "note_id": id,
                })),
            ))
        }
        Err(e) => {
            if let Some(stored) = stored {
                discard_upload(&state.uploads_dir, &stored).await;
            }
            Err(e)
        }
    }
}

async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let form = read_note_form(multipart, &state.uploads_dir).await?;
    let stored = form.pdf_path.clone();
    let (_, input) = form.into_input();

    if let Err(e) = notes::update_note(&state.db, &id, input).await {
        if let Some(stored) = stored {
            discard_upload(&state.uploads_dir, &stored).await;
        }
        return Err(e);
    }
    Ok(message("Note updated successfully"))
}

async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    notes::delete_note(&state.db, &id).await?;
    Ok(message("Note deleted successfully"))
}
