//! Axum route handlers for the Resume parsing API.

use std::path::Path as FsPath;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::document::DocumentFormat;
use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::parsing::assembler::load_record;
use crate::parsing::pipeline::{parse_resume, Cancellation};
use crate::state::AppState;
use crate::storage::DocumentPaths;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub document_id: Uuid,
    pub record: ResumeRecord,
}

struct Upload {
    file_name: String,
    data: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Loads the persisted record of a document, 404 when it does not exist.
pub async fn load_document(
    state: &AppState,
    document_id: Uuid,
) -> Result<(DocumentPaths, ResumeRecord), AppError> {
    let paths = DocumentPaths::new(&state.config.workspace_dir, document_id);
    match load_record(&paths.record()).await {
        Ok(record) => Ok((paths, record)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::NotFound(format!(
            "Document {document_id} not found"
        ))),
        Err(e) => Err(e.into()),
    }
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("file field has no file name".to_string()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        return Ok(Upload { file_name, data });
    }
    Err(AppError::Validation("multipart field 'file' is required".to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/parse
///
/// Steps:
/// 1. Read the `file` field and check its extension (400 when unsupported)
/// 2. Store it as `<workspace>/<document_id>/resume.<ext>`
/// 3. Run the parsing pipeline, which persists `resume.parsed.json`
/// 4. Return the document id and the record
pub async fn handle_parse(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParseResponse>, AppError> {
    // Step 1: Validate upload
    let upload = read_upload(multipart).await?;
    DocumentFormat::from_path(FsPath::new(&upload.file_name))?;
    if upload.data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    let extension = FsPath::new(&upload.file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    // Step 2: Store
    let document_id = Uuid::new_v4();
    let paths = DocumentPaths::new(&state.config.workspace_dir, document_id);
    tokio::fs::create_dir_all(&paths.dir).await?;
    let source = paths.source(&extension);
    tokio::fs::write(&source, &upload.data).await?;
    info!(
        "Stored upload '{}' ({} bytes) as document {document_id}",
        upload.file_name,
        upload.data.len()
    );

    // Step 3: Parse in a detached task. If the client goes away the guard
    // cancels the run at its next stage boundary and the task cleans up.
    let cancel = Cancellation::new();
    let _guard = cancel.cancel_on_drop();
    let llm = state.llm.clone();
    let dir = paths.dir.clone();
    let run = tokio::spawn(async move {
        let result = parse_resume(llm.as_ref(), &source, &cancel).await;
        if let Err(e) = &result {
            info!("Parse of document {document_id} did not complete: {e}");
            if let Err(cleanup) = tokio::fs::remove_dir_all(&dir).await {
                warn!("Failed to clean up document {document_id}: {cleanup}");
            }
        }
        result
    });
    let parsed = run.await.map_err(|e| AppError::Internal(e.into()))??;

    Ok(Json(ParseResponse {
        document_id,
        record: parsed.record,
    }))
}

/// GET /api/v1/resumes/:document_id
pub async fn handle_get_record(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> Result<Json<ResumeRecord>, AppError> {
    let (_, record) = load_document(&state, document_id).await?;
    Ok(Json(record))
}

/// DELETE /api/v1/resumes/:document_id
///
/// Removes the upload and everything derived from it.
pub async fn handle_delete_document(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let paths = DocumentPaths::new(&state.config.workspace_dir, document_id);
    match tokio::fs::remove_dir_all(&paths.dir).await {
        Ok(()) => {
            info!("Deleted document {document_id}");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::NotFound(format!(
            "Document {document_id} not found"
        ))),
        Err(e) => Err(e.into()),
    }
}
