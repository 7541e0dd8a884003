//! Description structuring — turns a raw job description (HTML or plain
//! text, arbitrary source formatting) into categorized, typed fields.
//!
//! The pipeline is pure and synchronous: normalize, run the independent
//! signal extractors and the section segmenter, merge scanned skills into
//! the section bucket, prune empty fields. It cannot fail — "nothing
//! extractable" is the `Default` value, and the write path stores that as
//! SQL NULL rather than a partial result.

pub mod normalize;
pub mod sections;
pub mod signals;
pub mod skills;

use serde::{Deserialize, Serialize};

pub use signals::{ExperienceLevel, WorkType};

/// Structured fields derived from a job description. Serialized as the
/// `structured_description` blob on a job row; empty fields are omitted so
/// every key present in the stored JSON is populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub responsibilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qualifications: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub benefits: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_type: Option<WorkType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
}

impl StructuredDescription {
    /// True when nothing at all was extracted. An empty result is never
    /// persisted.
    pub fn is_empty(&self) -> bool {
        self.overview.is_none()
            && self.responsibilities.is_empty()
            && self.requirements.is_empty()
            && self.qualifications.is_empty()
            && self.benefits.is_empty()
            && self.skills.is_empty()
            && self.work_type.is_none()
            && self.experience_level.is_none()
            && self.salary_range.is_none()
    }
}

/// Structures a raw description. Infallible; empty or absent input yields
/// the empty result without further processing.
pub fn structure_description(raw: Option<&str>) -> StructuredDescription {
    let Some(raw) = raw else {
        return StructuredDescription::default();
    };
    let text = normalize::normalize(raw);
    if text.is_empty() {
        return StructuredDescription::default();
    }
    let lower = text.to_lowercase();

    let segmented = sections::segment(&text);
    let scanned = skills::scan_skills(&lower);
    let merged_skills = skills::merge_skills(segmented.skills, scanned);

    StructuredDescription {
        overview: non_empty(segmented.overview),
        responsibilities: segmented.responsibilities,
        requirements: segmented.requirements,
        qualifications: segmented.qualifications,
        benefits: segmented.benefits,
        skills: merged_skills,
        work_type: signals::detect_work_type(&lower),
        experience_level: signals::detect_experience_level(&lower),
        salary_range: signals::extract_salary_range(&text),
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_POSTING: &str = r#"
        <p>We are building the data platform for modern logistics.
        This is a <b>remote</b> position for a senior engineer.</p>
        <p>Salary: $140,000 - $180,000 per year</p>
        <h3>Responsibilities:</h3>
        <ul>
          <li>Design and operate ingestion pipelines</li>
          <li>Own reliability of the query layer</li>
        </ul>
        <h3>Requirements:</h3>
        <ul>
          <li>7+ years building backend systems</li>
          <li>Production experience with PostgreSQL</li>
        </ul>
        <h3>Benefits:</h3>
        <ul>
          <li>Comprehensive health coverage</li>
        </ul>
    "#;

    #[test]
    fn test_full_posting_end_to_end() {
        let out = structure_description(Some(FULL_POSTING));
        assert_eq!(out.work_type, Some(WorkType::Remote));
        assert_eq!(out.experience_level, Some(ExperienceLevel::Senior));
        assert_eq!(out.salary_range.as_deref(), Some("$140,000 - $180,000"));
        assert_eq!(out.responsibilities.len(), 2);
        assert_eq!(out.requirements.len(), 2);
        assert_eq!(out.benefits, vec!["Comprehensive health coverage"]);
        assert!(out.skills.contains(&"PostgreSQL".to_string()));
        assert!(out.overview.as_deref().unwrap().contains("data platform"));
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let first = structure_description(Some(FULL_POSTING));
        let second = structure_description(Some(FULL_POSTING));
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_empty_and_absent_input_yield_empty_result() {
        assert!(structure_description(None).is_empty());
        assert!(structure_description(Some("")).is_empty());
        assert!(structure_description(Some("   \n  ")).is_empty());
    }

    #[test]
    fn test_empty_result_serializes_to_empty_object() {
        let out = structure_description(None);
        assert_eq!(serde_json::to_string(&out).unwrap(), "{}");
    }

    #[test]
    fn test_no_key_has_empty_value() {
        let out = structure_description(Some(FULL_POSTING));
        let value = serde_json::to_value(&out).unwrap();
        for (key, field) in value.as_object().unwrap() {
            match field {
                serde_json::Value::String(s) => assert!(!s.is_empty(), "empty string at {key}"),
                serde_json::Value::Array(a) => assert!(!a.is_empty(), "empty list at {key}"),
                serde_json::Value::Null => panic!("null at {key}"),
                _ => {}
            }
        }
    }

    #[test]
    fn test_remote_checked_before_onsite() {
        let out = structure_description(Some("Position is onsite in Berlin, remote possible."));
        assert_eq!(out.work_type, Some(WorkType::Remote));
    }

    #[test]
    fn test_senior_checked_before_entry() {
        let out = structure_description(Some("Senior role; junior applicants considered."));
        assert_eq!(out.experience_level, Some(ExperienceLevel::Senior));
    }

    #[test]
    fn test_no_headers_everything_is_overview() {
        let out = structure_description(Some("A short untemplated posting without sections."));
        assert_eq!(
            out.overview.as_deref(),
            Some("A short untemplated posting without sections.")
        );
        assert!(out.responsibilities.is_empty());
        assert!(out.requirements.is_empty());
    }

    #[test]
    fn test_skill_union_dedupes_section_and_scan() {
        // "Machine Learning" arrives via the section bucket and the global
        // scan; the union keeps exactly one copy. "Python" comes from free
        // text alone.
        let text = "We apply Python across the stack.\nSkills:\nMachine Learning";
        let out = structure_description(Some(text));
        let ml_count = out
            .skills
            .iter()
            .filter(|s| s.eq_ignore_ascii_case("machine learning"))
            .count();
        let py_count = out
            .skills
            .iter()
            .filter(|s| s.eq_ignore_ascii_case("python"))
            .count();
        assert_eq!(ml_count, 1);
        assert_eq!(py_count, 1);
    }

    #[test]
    fn test_short_section_lines_pruned_with_section() {
        // The only skills line is too short, so the bucket stays empty and
        // the key is absent from the serialized output.
        let out = structure_description(Some("Skills:\nYes."));
        assert!(out.skills.is_empty());
        let value = serde_json::to_value(&out).unwrap();
        assert!(value.get("skills").is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let out = structure_description(Some(FULL_POSTING));
        let json = serde_json::to_string(&out).unwrap();
        let back: StructuredDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(out, back);
    }

    #[test]
    fn test_plain_text_posting_without_markup() {
        let text = "Backend engineer, hybrid.\nRequirements:\nComfortable operating Kafka in production";
        let out = structure_description(Some(text));
        assert_eq!(out.work_type, Some(WorkType::Hybrid));
        assert_eq!(out.requirements.len(), 1);
        assert!(out.skills.contains(&"Kafka".to_string()));
    }
}
