//! Stage 2 — per-section structured extraction.
//!
//! One generic extraction unit (`extract_section`) parameterized by a section
//! descriptor (`ResumeSection`): record field name, span accessor, response
//! schema, zero-value (`Output::default()`) and an optional `finalize` hook.
//!
//! Failure isolation: a section whose call or parse fails logs a warning and
//! yields its zero-value; other sections are unaffected.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::llm_client::prompts::STRICT_PARSER_SYSTEM;
use crate::llm_client::{
    parse_json_response, InferenceRequest, InferenceService, LlmError, ModelTier,
};
use crate::models::resume::{Certification, ContactInfo, Education, Project, Skills, WorkExperience};
use crate::parsing::prompts::{SECTION_PROMPT_TEMPLATE, SUMMARY_PROMPT_TEMPLATE, SUMMARY_SYSTEM};
use crate::parsing::schemas::{
    CERTIFICATIONS_SCHEMA, CONTACT_INFO_SCHEMA, EDUCATION_SCHEMA, PROJECTS_SCHEMA, SKILLS_SCHEMA,
    STRING_LIST_SCHEMA, WORK_EXPERIENCE_SCHEMA,
};
use crate::parsing::segmenter::SectionSpans;
use crate::parsing::validation::validate_against_source;

const EXTRACTION_TEMPERATURE: f32 = 0.0;

/// Inputs shared by every extractor for one document. Immutable.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionContext<'a> {
    /// Candidate name captured separately by segmentation.
    pub candidate_name: &'a str,
    /// Full normalized text, the ground truth for validation.
    pub source_text: &'a str,
}

/// Descriptor for one résumé section.
pub trait ResumeSection {
    type Output: DeserializeOwned + Default + Send;

    /// Record field this section fills.
    const NAME: &'static str;
    /// Human wording used in the extraction prompt.
    const LABEL: &'static str;

    fn span(spans: &SectionSpans) -> &str;

    /// `None` requests a free-text response.
    fn schema() -> Option<&'static Value>;

    fn system() -> &'static str {
        STRICT_PARSER_SYSTEM
    }

    fn prompt(chunk: &str) -> String {
        SECTION_PROMPT_TEMPLATE
            .replace("{label}", Self::LABEL)
            .replace("{chunk}", chunk)
    }

    fn parse_response(text: &str) -> Result<Self::Output, LlmError> {
        parse_json_response(text)
    }

    /// Post-processing hook, applied to extracted and zero-values alike.
    fn finalize(output: Self::Output, _ctx: &ExtractionContext<'_>) -> Self::Output {
        output
    }
}

/// Runs one section extractor.
///
/// Blank spans short-circuit to the zero-value without an inference call.
pub async fn extract_section<S: ResumeSection>(
    llm: &dyn InferenceService,
    spans: &SectionSpans,
    ctx: &ExtractionContext<'_>,
) -> S::Output {
    let chunk = S::span(spans);

    let output = if chunk.trim().is_empty() {
        debug!(section = S::NAME, "Empty span, skipping extraction");
        S::Output::default()
    } else {
        let prompt = S::prompt(chunk);
        let mut request = InferenceRequest::new(&prompt, ModelTier::Extraction)
            .system(S::system())
            .temperature(EXTRACTION_TEMPERATURE);
        if let Some(schema) = S::schema() {
            request = request.schema(schema);
        }

        match llm.generate(&request).await.and_then(|text| S::parse_response(&text)) {
            Ok(output) => output,
            Err(e) => {
                warn!(section = S::NAME, "Section extraction failed, using empty value: {e}");
                S::Output::default()
            }
        }
    };

    S::finalize(output, ctx)
}

/// Parses a JSON array response, dropping `null` entries.
fn parse_entries<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, LlmError> {
    let entries: Vec<Option<T>> = parse_json_response(text)?;
    Ok(entries.into_iter().flatten().collect())
}

// ────────────────────────────────────────────────────────────────────────────
// Section descriptors
// ────────────────────────────────────────────────────────────────────────────

pub struct ContactInfoSection;

impl ResumeSection for ContactInfoSection {
    type Output = ContactInfo;
    const NAME: &'static str = "contact_info";
    const LABEL: &'static str = "contact information";

    fn span(spans: &SectionSpans) -> &str {
        &spans.contact_info
    }

    fn schema() -> Option<&'static Value> {
        Some(&*CONTACT_INFO_SCHEMA)
    }

    /// The segmented candidate name wins over whatever the contact block
    /// produced, and the result must be present in the source text.
    fn finalize(mut output: ContactInfo, ctx: &ExtractionContext<'_>) -> ContactInfo {
        let candidate = ctx.candidate_name.trim();
        if !candidate.is_empty() {
            output.name = Some(candidate.to_string());
        }
        output.name = validate_against_source(output.name.take(), ctx.source_text);
        output
    }
}

pub struct SummarySection;

impl ResumeSection for SummarySection {
    type Output = String;
    const NAME: &'static str = "summary";
    const LABEL: &'static str = "professional summary";

    fn span(spans: &SectionSpans) -> &str {
        &spans.summary
    }

    fn schema() -> Option<&'static Value> {
        None
    }

    fn system() -> &'static str {
        SUMMARY_SYSTEM
    }

    fn prompt(chunk: &str) -> String {
        SUMMARY_PROMPT_TEMPLATE.replace("{chunk}", chunk)
    }

    fn parse_response(text: &str) -> Result<String, LlmError> {
        Ok(text.trim().to_string())
    }
}

pub struct WorkExperienceSection;

impl ResumeSection for WorkExperienceSection {
    type Output = Vec<WorkExperience>;
    const NAME: &'static str = "work_experience";
    const LABEL: &'static str = "work experience";

    fn span(spans: &SectionSpans) -> &str {
        &spans.work_experience
    }

    fn schema() -> Option<&'static Value> {
        Some(&*WORK_EXPERIENCE_SCHEMA)
    }

    fn parse_response(text: &str) -> Result<Vec<WorkExperience>, LlmError> {
        parse_entries(text)
    }
}

pub struct EducationSection;

impl ResumeSection for EducationSection {
    type Output = Vec<Education>;
    const NAME: &'static str = "education";
    const LABEL: &'static str = "education";

    fn span(spans: &SectionSpans) -> &str {
        &spans.education
    }

    fn schema() -> Option<&'static Value> {
        Some(&*EDUCATION_SCHEMA)
    }

    fn parse_response(text: &str) -> Result<Vec<Education>, LlmError> {
        parse_entries(text)
    }
}

pub struct SkillsSection;

impl ResumeSection for SkillsSection {
    type Output = Skills;
    const NAME: &'static str = "skills";
    const LABEL: &'static str = "skills";

    fn span(spans: &SectionSpans) -> &str {
        &spans.skills
    }

    fn schema() -> Option<&'static Value> {
        Some(&*SKILLS_SCHEMA)
    }
}

pub struct CertificationsSection;

impl ResumeSection for CertificationsSection {
    type Output = Vec<Certification>;
    const NAME: &'static str = "certifications";
    const LABEL: &'static str = "certifications";

    fn span(spans: &SectionSpans) -> &str {
        &spans.certifications
    }

    fn schema() -> Option<&'static Value> {
        Some(&*CERTIFICATIONS_SCHEMA)
    }

    fn parse_response(text: &str) -> Result<Vec<Certification>, LlmError> {
        parse_entries(text)
    }
}

pub struct ProjectsSection;

impl ResumeSection for ProjectsSection {
    type Output = Vec<Project>;
    const NAME: &'static str = "projects";
    const LABEL: &'static str = "projects";

    fn span(spans: &SectionSpans) -> &str {
        &spans.projects
    }

    fn schema() -> Option<&'static Value> {
        Some(&*PROJECTS_SCHEMA)
    }

    fn parse_response(text: &str) -> Result<Vec<Project>, LlmError> {
        parse_entries(text)
    }
}

pub struct LanguagesSection;

impl ResumeSection for LanguagesSection {
    type Output = Vec<String>;
    const NAME: &'static str = "languages";
    const LABEL: &'static str = "languages";

    fn span(spans: &SectionSpans) -> &str {
        &spans.languages
    }

    fn schema() -> Option<&'static Value> {
        Some(&*STRING_LIST_SCHEMA)
    }

    fn parse_response(text: &str) -> Result<Vec<String>, LlmError> {
        parse_entries(text)
    }
}

pub struct AwardsSection;

impl ResumeSection for AwardsSection {
    type Output = Vec<String>;
    const NAME: &'static str = "awards";
    const LABEL: &'static str = "awards";

    fn span(spans: &SectionSpans) -> &str {
        &spans.awards
    }

    fn schema() -> Option<&'static Value> {
        Some(&*STRING_LIST_SCHEMA)
    }

    fn parse_response(text: &str) -> Result<Vec<String>, LlmError> {
        parse_entries(text)
    }
}
