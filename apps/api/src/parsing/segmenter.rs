//! Stage 1 — splits normalized résumé text into named raw-text spans.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::llm_client::{call_json, InferenceRequest, InferenceService, LlmError, ModelTier};
use crate::models::resume::nullable;
use crate::parsing::prompts::{SEGMENTATION_PROMPT_TEMPLATE, SEGMENTATION_SYSTEM};
use crate::parsing::schemas::SEGMENTATION_SCHEMA;

const SEGMENTATION_TEMPERATURE: f32 = 0.0;

/// Keys the segmentation schema marks as required.
const REQUIRED_SPAN_KEYS: [&str; 5] = [
    "candidate_name_text",
    "contact_info_section",
    "work_experience_section",
    "education_section",
    "skills_section",
];

/// Raw text per résumé section as returned by segmentation.
///
/// Missing keys and `null` are both read as empty, so one absent span never
/// discards the others. Absent required keys are logged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionSpans {
    #[serde(rename = "candidate_name_text", default, deserialize_with = "nullable")]
    pub candidate_name: String,
    #[serde(rename = "contact_info_section", default, deserialize_with = "nullable")]
    pub contact_info: String,
    #[serde(rename = "summary_section", default, deserialize_with = "nullable")]
    pub summary: String,
    #[serde(rename = "work_experience_section", default, deserialize_with = "nullable")]
    pub work_experience: String,
    #[serde(rename = "education_section", default, deserialize_with = "nullable")]
    pub education: String,
    #[serde(rename = "skills_section", default, deserialize_with = "nullable")]
    pub skills: String,
    #[serde(rename = "certifications_section", default, deserialize_with = "nullable")]
    pub certifications: String,
    #[serde(rename = "projects_section", default, deserialize_with = "nullable")]
    pub projects: String,
    #[serde(rename = "languages_section", default, deserialize_with = "nullable")]
    pub languages: String,
    #[serde(rename = "awards_section", default, deserialize_with = "nullable")]
    pub awards: String,
}

impl SectionSpans {
    /// Number of non-blank section spans (the candidate name is not a section).
    pub fn populated_sections(&self) -> usize {
        [
            &self.contact_info,
            &self.summary,
            &self.work_experience,
            &self.education,
            &self.skills,
            &self.certifications,
            &self.projects,
            &self.languages,
            &self.awards,
        ]
        .iter()
        .filter(|s| !s.trim().is_empty())
        .count()
    }
}

/// Segments `text` into section spans.
///
/// Never fails: any service error or malformed response yields all-empty spans,
/// which makes every downstream extractor a no-op.
pub async fn segment(llm: &dyn InferenceService, text: &str) -> SectionSpans {
    let prompt = SEGMENTATION_PROMPT_TEMPLATE.replace("{text}", text);
    let request = InferenceRequest::new(&prompt, ModelTier::Extraction)
        .system(SEGMENTATION_SYSTEM)
        .schema(&SEGMENTATION_SCHEMA)
        .temperature(SEGMENTATION_TEMPERATURE);

    match call_json::<Value>(llm, &request).await.and_then(spans_from_response) {
        Ok(spans) => {
            info!(
                "Segmentation found {} populated sections",
                spans.populated_sections()
            );
            spans
        }
        Err(e) => {
            warn!("Segmentation failed, continuing with empty sections: {e}");
            SectionSpans::default()
        }
    }
}

/// Reads spans from a segmentation response, keeping every span present.
fn spans_from_response(value: Value) -> Result<SectionSpans, LlmError> {
    if let Value::Object(map) = &value {
        let missing: Vec<&str> = REQUIRED_SPAN_KEYS
            .into_iter()
            .filter(|key| !map.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            warn!(?missing, "Segmentation response lacks required keys, treating them as empty");
        }
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedInference;

    #[tokio::test]
    async fn test_fenced_response_is_parsed() {
        let llm = ScriptedInference::new().reply(
            "Segment the following",
            "```json\n{\"candidate_name_text\": \"Ann Lee\", \"contact_info_section\": \"ann@lee.io\", \
             \"work_experience_section\": \"\", \"education_section\": null, \"skills_section\": \"Rust\"}\n```",
        );
        let spans = segment(&llm, "Ann Lee\nann@lee.io\nRust").await;
        assert_eq!(spans.candidate_name, "Ann Lee");
        assert_eq!(spans.contact_info, "ann@lee.io");
        assert_eq!(spans.education, "");
        assert_eq!(spans.awards, "");
        assert_eq!(spans.populated_sections(), 2);

        let calls = llm.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].had_schema);
        assert_eq!(calls[0].temperature, 0.0);
        assert!(calls[0].prompt.ends_with("Ann Lee\nann@lee.io\nRust"));
    }

    #[tokio::test]
    async fn test_service_failure_yields_empty_spans() {
        let llm = ScriptedInference::unreachable();
        let spans = segment(&llm, "anything").await;
        assert_eq!(spans, SectionSpans::default());
    }

    #[tokio::test]
    async fn test_missing_required_span_keeps_the_others() {
        let llm = ScriptedInference::new().reply(
            "Segment the following",
            r#"{"candidate_name_text": "Ann Lee", "contact_info_section": "ann@lee.io",
                "work_experience_section": "RN, Mercy 2019", "skills_section": "Triage"}"#,
        );
        let spans = segment(&llm, "Ann Lee").await;
        assert_eq!(spans.candidate_name, "Ann Lee");
        assert_eq!(spans.work_experience, "RN, Mercy 2019");
        assert_eq!(spans.skills, "Triage");
        assert_eq!(spans.education, "");
        assert_eq!(spans.populated_sections(), 3);
    }

    #[tokio::test]
    async fn test_non_object_response_yields_empty_spans() {
        let llm = ScriptedInference::new().reply("Segment the following", r#"["contact", "skills"]"#);
        let spans = segment(&llm, "Ann Lee").await;
        assert_eq!(spans, SectionSpans::default());
    }

    #[tokio::test]
    async fn test_malformed_json_yields_empty_spans() {
        let llm = ScriptedInference::new().reply("Segment the following", "Sure! Here are the sections:");
        let spans = segment(&llm, "Ann Lee").await;
        assert_eq!(spans.populated_sections(), 0);
    }

    #[test]
    fn test_required_keys_match_the_wire_schema() {
        let required: Vec<&str> = SEGMENTATION_SCHEMA["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(required, REQUIRED_SPAN_KEYS);
    }
}
