//! Layout Planner — produces a page/block plan for a parsed record.
//!
//! State machine:
//! `NO_PLAN → CACHE_HIT (loaded) | CACHE_MISS → generating → Generated | DefaultFallback`
//!
//! Every terminal state yields a usable plan. Generated and fallback plans are
//! both written to the cache, so the next non-forced call is a cache hit.

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::layout::cache;
use crate::layout::prompts::{LAYOUT_PROMPT_TEMPLATE, LAYOUT_SYSTEM};
use crate::layout::schema::LAYOUT_SCHEMA;
use crate::layout::sizing::{
    audit_plan, content_summary, LINE_UNITS, PAGE_HEIGHT_UNITS, SECTION_PADDING_UNITS,
    SECTION_TITLE_UNITS,
};
use crate::llm_client::{call_json, InferenceRequest, InferenceService, LlmError, ModelTier};
use crate::models::layout::LayoutPlan;
use crate::models::resume::ResumeRecord;
use crate::storage::layout_cache_path;

const LAYOUT_TEMPERATURE: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanOutcome {
    CacheHit,
    Generated,
    DefaultFallback,
}

#[derive(Debug, Clone)]
pub struct PlannedLayout {
    pub plan: LayoutPlan,
    /// Cache file contents: verbatim on a hit, freshly encoded otherwise.
    pub json: String,
    pub outcome: PlanOutcome,
}

/// Returns the layout plan for the record stored at `record_path`.
///
/// With `force_regenerate == false` an existing cache is returned as-is and no
/// inference call is made. An unreadable cache counts as a miss.
pub async fn plan_layout(
    llm: &dyn InferenceService,
    record_path: &Path,
    record: &ResumeRecord,
    style: &str,
    force_regenerate: bool,
) -> PlannedLayout {
    let cache_path = layout_cache_path(record_path);

    if !force_regenerate {
        match cache::load(&cache_path).await {
            Ok(Some(cached)) => {
                info!("Found cached layout plan at {}", cache_path.display());
                return PlannedLayout {
                    plan: cached.plan,
                    json: cached.raw,
                    outcome: PlanOutcome::CacheHit,
                };
            }
            Ok(None) => info!("No cached layout plan, generating a new one"),
            Err(e) => warn!("Ignoring unreadable layout cache {}: {e}", cache_path.display()),
        }
    }

    let (plan, outcome) = match generate_plan(llm, record, style).await {
        Ok(plan) => {
            let audit = audit_plan(&plan, record);
            info!(
                clean = audit.is_clean(),
                "Layout plan generated: {} pages",
                plan.pages.len()
            );
            (plan, PlanOutcome::Generated)
        }
        Err(e) => {
            warn!("Layout plan generation failed, using default plan: {e}");
            (LayoutPlan::default_plan(), PlanOutcome::DefaultFallback)
        }
    };

    let json = match cache::encode(&plan) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to encode layout plan: {e}");
            return PlannedLayout {
                plan,
                json: String::new(),
                outcome,
            };
        }
    };

    match cache::store(&cache_path, json.clone()).await {
        Ok(()) => info!("Layout plan saved to {}", cache_path.display()),
        Err(e) => warn!("Failed to write layout cache {}: {e}", cache_path.display()),
    }

    PlannedLayout {
        plan,
        json,
        outcome,
    }
}

async fn generate_plan(
    llm: &dyn InferenceService,
    record: &ResumeRecord,
    style: &str,
) -> Result<LayoutPlan, LlmError> {
    let prompt = build_layout_prompt(record, style)?;
    let request = InferenceRequest::new(&prompt, ModelTier::Layout)
        .system(LAYOUT_SYSTEM)
        .schema(&LAYOUT_SCHEMA)
        .temperature(LAYOUT_TEMPERATURE);

    let plan: LayoutPlan = call_json(llm, &request).await?;
    if !plan.is_usable() {
        return Err(LlmError::EmptyContent);
    }
    Ok(plan)
}

fn build_layout_prompt(record: &ResumeRecord, style: &str) -> Result<String, LlmError> {
    let summary = serde_json::to_string_pretty(&content_summary(record))?;

    Ok(LAYOUT_PROMPT_TEMPLATE
        .replace("{page_units}", &PAGE_HEIGHT_UNITS.to_string())
        .replace("{title_units}", &SECTION_TITLE_UNITS.to_string())
        .replace("{line_units}", &LINE_UNITS.to_string())
        .replace("{padding_units}", &SECTION_PADDING_UNITS.to_string())
        .replace("{style}", style)
        .replace("{content_summary}", &summary))
}
