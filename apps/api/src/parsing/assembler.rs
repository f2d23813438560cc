//! Merges per-section extraction results into one complete `ResumeRecord`
//! and persists it next to its source document.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::llm_client::InferenceService;
use crate::models::resume::ResumeRecord;
use crate::parsing::sections::{
    extract_section, AwardsSection, CertificationsSection, ContactInfoSection, EducationSection,
    ExtractionContext, LanguagesSection, ProjectsSection, SkillsSection, SummarySection,
    WorkExperienceSection,
};
use crate::parsing::segmenter::SectionSpans;
use crate::storage::{parsed_record_path, to_pretty_json, write_atomic};

/// Runs all nine section extractors concurrently and builds the record.
///
/// Never fails. Every field of the returned record is populated, with its
/// zero-value when the section was missing or its extraction failed.
pub async fn assemble(
    llm: &dyn InferenceService,
    spans: &SectionSpans,
    source_text: &str,
) -> ResumeRecord {
    let ctx = ExtractionContext {
        candidate_name: &spans.candidate_name,
        source_text,
    };

    let (
        contact_info,
        summary,
        work_experience,
        education,
        skills,
        certifications,
        projects,
        languages,
        awards,
    ) = tokio::join!(
        extract_section::<ContactInfoSection>(llm, spans, &ctx),
        extract_section::<SummarySection>(llm, spans, &ctx),
        extract_section::<WorkExperienceSection>(llm, spans, &ctx),
        extract_section::<EducationSection>(llm, spans, &ctx),
        extract_section::<SkillsSection>(llm, spans, &ctx),
        extract_section::<CertificationsSection>(llm, spans, &ctx),
        extract_section::<ProjectsSection>(llm, spans, &ctx),
        extract_section::<LanguagesSection>(llm, spans, &ctx),
        extract_section::<AwardsSection>(llm, spans, &ctx),
    );

    let record = ResumeRecord {
        contact_info,
        summary,
        work_experience,
        education,
        skills,
        certifications,
        projects,
        languages,
        awards,
    };

    info!(
        "Assembled record: {} jobs, {} education entries, {} projects",
        record.work_experience.len(),
        record.education.len(),
        record.projects.len()
    );

    record
}

/// Writes the record as `<stem>.parsed.json` next to `source` and returns that path.
pub async fn persist_record(source: &Path, record: &ResumeRecord) -> std::io::Result<PathBuf> {
    let out_path = parsed_record_path(source);
    let body = to_pretty_json(record)?;

    let target = out_path.clone();
    tokio::task::spawn_blocking(move || write_atomic(&target, body.as_bytes()))
        .await
        .map_err(std::io::Error::other)??;

    info!("Parsed record saved to {}", out_path.display());
    Ok(out_path)
}

/// Loads a persisted record. Missing or null top-level fields come back as
/// their zero-values.
pub async fn load_record(path: &Path) -> std::io::Result<ResumeRecord> {
    let body = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&body)?)
}
