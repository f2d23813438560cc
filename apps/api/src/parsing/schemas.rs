//! Response schemas sent to the inference service (Gemini `responseSchema`
//! dialect). Each schema has a typed receiving shape in `models::resume` or
//! `parsing::segmenter`; responses are deserialized into that shape, so a
//! mismatch surfaces as `LlmError::Parse`.

use std::sync::LazyLock;

use serde_json::{json, Value};

fn string_list() -> Value {
    json!({"type": "ARRAY", "items": {"type": "STRING"}})
}

fn array_of(items: Value) -> Value {
    json!({"type": "ARRAY", "items": items})
}

pub static CONTACT_INFO_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": {"type": "STRING"},
            "email": {"type": "STRING"},
            "phone": {"type": "STRING"},
            "location": {"type": "STRING"},
            "linkedin": {"type": "STRING"},
            "github": {"type": "STRING"},
            "website": {"type": "STRING"},
        },
    })
});

pub static WORK_EXPERIENCE_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    array_of(json!({
        "type": "OBJECT",
        "properties": {
            "role": {"type": "STRING"},
            "company": {"type": "STRING"},
            "location": {"type": "STRING"},
            "start_date": {"type": "STRING"},
            "end_date": {"type": "STRING"},
            "is_current": {"type": "BOOLEAN"},
            "bullets": string_list(),
        },
    }))
});

pub static EDUCATION_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    array_of(json!({
        "type": "OBJECT",
        "properties": {
            "degree": {"type": "STRING"},
            "field": {"type": "STRING"},
            "institution": {"type": "STRING"},
            "location": {"type": "STRING"},
            "start_date": {"type": "STRING"},
            "end_date": {"type": "STRING"},
            "gpa": {"type": "STRING"},
            "honors": string_list(),
        },
    }))
});

pub static SKILLS_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "clinical": string_list(),
            "technical": string_list(),
            "soft": string_list(),
            "tools": string_list(),
        },
    })
});

pub static CERTIFICATIONS_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    array_of(json!({
        "type": "OBJECT",
        "properties": {
            "name": {"type": "STRING"},
            "issuer": {"type": "STRING"},
            "date": {"type": "STRING"},
        },
    }))
});

pub static PROJECTS_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    array_of(json!({
        "type": "OBJECT",
        "properties": {
            "title": {"type": "STRING"},
            "description": {"type": "STRING"},
            "technologies": string_list(),
            "link": {"type": "STRING"},
        },
    }))
});

/// Languages and awards are plain string lists.
pub static STRING_LIST_SCHEMA: LazyLock<Value> = LazyLock::new(string_list);

pub static SEGMENTATION_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "candidate_name_text": {
                "type": "STRING",
                "description": "The full name of the candidate, typically the largest text at the top."
            },
            "contact_info_section": {"type": "STRING"},
            "summary_section": {"type": "STRING"},
            "work_experience_section": {"type": "STRING"},
            "education_section": {"type": "STRING"},
            "skills_section": {"type": "STRING"},
            "certifications_section": {"type": "STRING"},
            "projects_section": {"type": "STRING"},
            "languages_section": {"type": "STRING"},
            "awards_section": {"type": "STRING"},
        },
        "required": [
            "candidate_name_text",
            "contact_info_section",
            "work_experience_section",
            "education_section",
            "skills_section"
        ],
    })
});
