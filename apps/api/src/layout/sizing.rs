//! Vertical sizing heuristics shared by the layout prompt and the plan audit.
//!
//! Units are abstract: a page holds `PAGE_HEIGHT_UNITS`; a section costs its
//! title, one `LINE_UNITS` per rendered line, and trailing padding.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::models::layout::LayoutPlan;
use crate::models::resume::{ResumeRecord, RECORD_FIELDS};

pub const PAGE_HEIGHT_UNITS: u32 = 900;
pub const SECTION_TITLE_UNITS: u32 = 30;
pub const LINE_UNITS: u32 = 15;
pub const SECTION_PADDING_UNITS: u32 = 20;

/// Characters of running text that fit on one rendered line.
const CHARS_PER_LINE: usize = 95;

/// Per top-level field: entry count for lists, 1 for scalars and objects.
pub fn content_summary(record: &ResumeRecord) -> Map<String, Value> {
    RECORD_FIELDS
        .iter()
        .filter_map(|key| {
            record
                .entry_count(key)
                .map(|count| (key.to_string(), Value::from(count)))
        })
        .collect()
}

fn wrapped_lines(text: &str) -> u32 {
    let chars = text.trim().chars().count();
    if chars == 0 {
        0
    } else {
        chars.div_ceil(CHARS_PER_LINE) as u32
    }
}

/// Estimated rendered lines of a record field; 0 for empty or unknown fields.
pub fn estimate_lines(record: &ResumeRecord, key: &str) -> u32 {
    if record.is_section_empty(key) {
        return 0;
    }
    match key {
        // Name line plus one line of contact details.
        "contact_info" => 2,
        "summary" => wrapped_lines(&record.summary),
        "work_experience" => record
            .work_experience
            .iter()
            .map(|job| 2 + job.bullets.iter().map(|b| wrapped_lines(b).max(1)).sum::<u32>())
            .sum(),
        "education" => record
            .education
            .iter()
            .map(|e| 2 + u32::from(!e.honors.is_empty()))
            .sum(),
        "skills" => record.skills.categories().len() as u32,
        "certifications" => record.certifications.len() as u32,
        "projects" => record
            .projects
            .iter()
            .map(|p| {
                1 + p.description.as_deref().map(wrapped_lines).unwrap_or(0)
                    + u32::from(!p.technologies.is_empty())
            })
            .sum(),
        "languages" => 1,
        "awards" => record.awards.len() as u32,
        _ => 0,
    }
}

/// Estimated height of one section block, title and padding included.
pub fn estimate_units(record: &ResumeRecord, key: &str) -> u32 {
    match estimate_lines(record, key) {
        0 => 0,
        lines => SECTION_TITLE_UNITS + lines * LINE_UNITS + SECTION_PADDING_UNITS,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageEstimate {
    pub page: usize,
    pub estimated_units: u32,
    pub overflows: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlanAudit {
    pub pages: Vec<PageEstimate>,
    pub unknown_keys: Vec<String>,
}

impl PlanAudit {
    pub fn is_clean(&self) -> bool {
        self.unknown_keys.is_empty() && self.pages.iter().all(|p| !p.overflows)
    }
}

/// Measures a plan against the record. Problems are logged, never rejected:
/// the renderer skips unknown keys, and a page estimate is only a heuristic.
pub fn audit_plan(plan: &LayoutPlan, record: &ResumeRecord) -> PlanAudit {
    let mut audit = PlanAudit::default();

    for (idx, page) in plan.pages.iter().enumerate() {
        let mut estimated_units = 0;
        for block in &page.content {
            if record.entry_count(&block.data_key).is_none() {
                audit.unknown_keys.push(block.data_key.clone());
                continue;
            }
            estimated_units += estimate_units(record, &block.data_key);
        }
        audit.pages.push(PageEstimate {
            page: idx + 1,
            estimated_units,
            overflows: estimated_units > PAGE_HEIGHT_UNITS,
        });
    }

    for page in audit.pages.iter().filter(|p| p.overflows) {
        warn!(
            page = page.page,
            units = page.estimated_units,
            "Layout plan page likely overflows the {PAGE_HEIGHT_UNITS}-unit budget"
        );
    }
    if !audit.unknown_keys.is_empty() {
        warn!(
            "Layout plan references unknown data keys: {:?}",
            audit.unknown_keys
        );
    }

    audit
}
