//! Axum route handler for the Render API.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::layout::handlers::default_style;
use crate::layout::plan_layout;
use crate::parsing::handlers::load_document;
use crate::render::pdf::export_pdf;
use crate::render::{renderer_for, DocumentRenderer};
use crate::state::AppState;
use crate::storage::write_atomic;

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    #[serde(default = "default_style")]
    pub style: String,
    /// Plan-driven pagination; `false` renders the record directly.
    #[serde(default = "default_true")]
    pub use_layout: bool,
    #[serde(default)]
    pub force_regenerate: bool,
    #[serde(default)]
    pub export_pdf: bool,
}

/// POST /api/v1/resumes/:document_id/render
///
/// Steps:
/// 1. Resolve the style and load the record
/// 2. plan_layout() when `use_layout` (cache-checked)
/// 3. Render and write `resume.parsed.html`
/// 4. Optionally convert to `resume.parsed.pdf` and return its bytes
pub async fn handle_render(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
    Json(request): Json<RenderRequest>,
) -> Result<Response, AppError> {
    // Step 1: Style + record
    let renderer = renderer_for(&request.style)?;
    let (paths, record) = load_document(&state, document_id).await?;

    // Step 2: Layout plan
    let plan = if request.use_layout {
        let planned = plan_layout(
            state.llm.as_ref(),
            &paths.record(),
            &record,
            &request.style,
            request.force_regenerate,
        )
        .await;
        Some(planned.plan)
    } else {
        None
    };

    // Step 3: Render HTML
    let html = renderer.render(&record, plan.as_ref())?;
    let html_path = paths.html();
    let target = html_path.clone();
    let body = html.clone();
    tokio::task::spawn_blocking(move || write_atomic(&target, body.as_bytes()))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;
    info!("HTML generated at {}", html_path.display());

    if !request.export_pdf {
        return Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html).into_response());
    }

    // Step 4: PDF
    let pdf_path = paths.pdf();
    export_pdf(
        &html_path,
        &pdf_path,
        state.config.pdf_export_command.as_deref(),
    )
    .await?;
    let pdf = Bytes::from(tokio::fs::read(&pdf_path).await?);
    Ok(([(header::CONTENT_TYPE, "application/pdf")], pdf).into_response())
}
