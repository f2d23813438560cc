//! The durable structured résumé record and its typed section shapes.
//!
//! Every top-level field is always present after deserialization: missing keys
//! and explicit `null`s both collapse to the field's zero-value. Dates are
//! free-form strings (`YYYY` or `YYYY-MM` by convention).

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level fields that must exist in every persisted record.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "contact_info",
    "work_experience",
    "education",
    "skills",
    "projects",
];

/// Top-level fields in canonical record order.
pub const RECORD_FIELDS: [&str; 9] = [
    "contact_info",
    "summary",
    "work_experience",
    "education",
    "skills",
    "certifications",
    "projects",
    "languages",
    "awards",
];

/// Treats `null` the same as a missing key.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Like `nullable` for lists, and also drops `null` elements so one empty
/// entry does not discard its siblings.
pub fn nullable_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let entries = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
    Ok(entries.into_iter().flatten().flatten().collect())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        *self == ContactInfo::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub is_current: bool,
    #[serde(default, deserialize_with = "nullable_entries")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub gpa: Option<String>,
    #[serde(default, deserialize_with = "nullable_entries")]
    pub honors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default, deserialize_with = "nullable_entries")]
    pub clinical: Vec<String>,
    #[serde(default, deserialize_with = "nullable_entries")]
    pub technical: Vec<String>,
    #[serde(default, deserialize_with = "nullable_entries")]
    pub soft: Vec<String>,
    #[serde(default, deserialize_with = "nullable_entries")]
    pub tools: Vec<String>,
}

impl Skills {
    pub fn is_empty(&self) -> bool {
        self.clinical.is_empty()
            && self.technical.is_empty()
            && self.soft.is_empty()
            && self.tools.is_empty()
    }

    /// Non-empty categories with their display labels.
    pub fn categories(&self) -> Vec<(&'static str, &[String])> {
        [
            ("Clinical", self.clinical.as_slice()),
            ("Technical", self.technical.as_slice()),
            ("Soft Skills", self.soft.as_slice()),
            ("Tools", self.tools.as_slice()),
        ]
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable_entries")]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// The structured résumé produced by the parsing pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(default, deserialize_with = "nullable")]
    pub contact_info: ContactInfo,
    #[serde(default, deserialize_with = "nullable")]
    pub summary: String,
    #[serde(default, deserialize_with = "nullable_entries")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default, deserialize_with = "nullable_entries")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "nullable")]
    pub skills: Skills,
    #[serde(default, deserialize_with = "nullable_entries")]
    pub certifications: Vec<Certification>,
    #[serde(default, deserialize_with = "nullable_entries")]
    pub projects: Vec<Project>,
    #[serde(default, deserialize_with = "nullable_entries")]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "nullable_entries")]
    pub awards: Vec<String>,
}

impl ResumeRecord {
    /// Entry count for list fields, 1 for scalar/object fields, `None` for
    /// keys that are not record fields.
    pub fn entry_count(&self, key: &str) -> Option<usize> {
        let count = match key {
            "contact_info" | "summary" | "skills" => 1,
            "work_experience" => self.work_experience.len(),
            "education" => self.education.len(),
            "certifications" => self.certifications.len(),
            "projects" => self.projects.len(),
            "languages" => self.languages.len(),
            "awards" => self.awards.len(),
            _ => return None,
        };
        Some(count)
    }

    /// True when the field carries no content worth rendering.
    pub fn is_section_empty(&self, key: &str) -> bool {
        match key {
            "contact_info" => self.contact_info.is_empty(),
            "summary" => self.summary.trim().is_empty(),
            "skills" => self.skills.is_empty(),
            other => self.entry_count(other).map_or(true, |n| n == 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_null_fields_default_to_zero_values() {
        let json = r#"{"contact_info": null, "work_experience": null, "summary": null}"#;
        let record: ResumeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, ResumeRecord::default());
    }

    #[test]
    fn test_serialized_record_contains_every_required_field() {
        let value = serde_json::to_value(ResumeRecord::default()).unwrap();
        for field in REQUIRED_FIELDS {
            assert!(
                value.get(field).is_some_and(|v| !v.is_null()),
                "{field} must be present and non-null"
            );
        }
        assert!(value["skills"]["clinical"].is_array());
        assert!(value["work_experience"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_null_list_elements_are_dropped() {
        let json = r#"{
            "work_experience": [{"role": "RN", "bullets": ["Triage", null]}, null],
            "skills": {"technical": [null, "SQL"]},
            "languages": [null]
        }"#;
        let record: ResumeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.work_experience.len(), 1);
        assert_eq!(record.work_experience[0].bullets, vec!["Triage"]);
        assert_eq!(record.skills.technical, vec!["SQL"]);
        assert!(record.languages.is_empty());
    }

    #[test]
    fn test_work_entry_tolerates_null_flags_and_lists() {
        let json = r#"{"role": "Nurse", "company": "St Mary", "is_current": null, "bullets": null}"#;
        let entry: WorkExperience = serde_json::from_str(json).unwrap();
        assert_eq!(entry.role.as_deref(), Some("Nurse"));
        assert!(!entry.is_current);
        assert!(entry.bullets.is_empty());
    }

    #[test]
    fn test_entry_count_follows_field_shape() {
        let record = ResumeRecord {
            work_experience: vec![WorkExperience::default(); 3],
            languages: vec!["English".to_string()],
            ..Default::default()
        };
        assert_eq!(record.entry_count("work_experience"), Some(3));
        assert_eq!(record.entry_count("summary"), Some(1));
        assert_eq!(record.entry_count("skills"), Some(1));
        assert_eq!(record.entry_count("languages"), Some(1));
        assert_eq!(record.entry_count("hobbies"), None);
    }

    #[test]
    fn test_section_emptiness() {
        let mut record = ResumeRecord::default();
        assert!(record.is_section_empty("contact_info"));
        assert!(record.is_section_empty("skills"));
        assert!(record.is_section_empty("unknown"));

        record.skills.tools.push("Epic EHR".to_string());
        record.summary = "  ".to_string();
        assert!(!record.is_section_empty("skills"));
        assert!(record.is_section_empty("summary"));
        assert_eq!(record.skills.categories().len(), 1);
    }

    #[test]
    fn test_non_ascii_survives_round_trip() {
        let mut record = ResumeRecord::default();
        record.contact_info.name = Some("José Müller".to_string());
        let json = serde_json::to_string_pretty(&record).unwrap();
        assert!(json.contains("José Müller"));
    }
}
