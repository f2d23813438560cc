//! Axum route handler for the Layout API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::layout::{plan_layout, PlanOutcome};
use crate::models::layout::LayoutPlan;
use crate::parsing::handlers::load_document;
use crate::state::AppState;

pub const DEFAULT_STYLE: &str = "modern";

pub fn default_style() -> String {
    DEFAULT_STYLE.to_string()
}

#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default)]
    pub force_regenerate: bool,
}

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub outcome: PlanOutcome,
    pub plan: LayoutPlan,
}

/// POST /api/v1/resumes/:document_id/layout
///
/// Returns the cached plan unless `force_regenerate` is set. Always succeeds
/// for an existing document; generation failures yield the default plan.
pub async fn handle_plan_layout(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
    Json(request): Json<LayoutRequest>,
) -> Result<Json<LayoutResponse>, AppError> {
    if request.style.trim().is_empty() {
        return Err(AppError::Validation("style cannot be empty".to_string()));
    }
    let (paths, record) = load_document(&state, document_id).await?;

    let planned = plan_layout(
        state.llm.as_ref(),
        &paths.record(),
        &record,
        &request.style,
        request.force_regenerate,
    )
    .await;

    Ok(Json(LayoutResponse {
        outcome: planned.outcome,
        plan: planned.plan,
    }))
}
