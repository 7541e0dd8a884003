//! Signal extractors — independent heuristics for work arrangement,
//! seniority, and salary range.
//!
//! Work type and seniority are first-match-wins over ordered keyword groups,
//! so a posting mentioning both "remote" and "onsite" classifies as remote.
//! Salary patterns run against the original-case text to keep currency
//! symbols intact.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkType {
    Remote,
    Hybrid,
    OnSite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
}

const REMOTE_TERMS: &[&str] = &[
    "remote",
    "work from home",
    "work-from-home",
    "wfh",
    "fully distributed",
    "distributed team",
];

const HYBRID_TERMS: &[&str] = &[
    "hybrid",
    "partially remote",
    "days in the office",
    "days per week in office",
];

const ONSITE_TERMS: &[&str] = &[
    "on-site",
    "onsite",
    "on site",
    "in-office",
    "in office",
    "in-person",
    "in person",
];

const SENIOR_TERMS: &[&str] = &[
    "senior",
    "sr.",
    "staff engineer",
    "principal",
    "tech lead",
    "team lead",
];

const MID_TERMS: &[&str] = &["mid-level", "mid level", "intermediate"];

const ENTRY_TERMS: &[&str] = &[
    "junior",
    "jr.",
    "entry level",
    "entry-level",
    "internship",
    "new grad",
    "graduate",
];

/// Classifies the work arrangement. `lower` must already be lower-cased.
pub fn detect_work_type(lower: &str) -> Option<WorkType> {
    let groups: [(&[&str], WorkType); 3] = [
        (REMOTE_TERMS, WorkType::Remote),
        (HYBRID_TERMS, WorkType::Hybrid),
        (ONSITE_TERMS, WorkType::OnSite),
    ];
    groups
        .iter()
        .find(|(terms, _)| terms.iter().any(|t| lower.contains(t)))
        .map(|(_, work_type)| *work_type)
}

/// Classifies the seniority level. `lower` must already be lower-cased.
pub fn detect_experience_level(lower: &str) -> Option<ExperienceLevel> {
    let groups: [(&[&str], ExperienceLevel); 3] = [
        (SENIOR_TERMS, ExperienceLevel::Senior),
        (MID_TERMS, ExperienceLevel::Mid),
        (ENTRY_TERMS, ExperienceLevel::Entry),
    ];
    groups
        .iter()
        .find(|(terms, _)| terms.iter().any(|t| lower.contains(t)))
        .map(|(_, level)| *level)
}

/// Ordered salary patterns. All are simple and non-nested — description text
/// comes from arbitrary external sites, so nothing here may backtrack badly.
static SALARY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // "$90,000 - $120,000", "$80k to $100k"
        r"\$([0-9][0-9,]*(?:\.[0-9]+)?[kK]?)\s*(?:-|–|—|to)\s*\$?([0-9][0-9,]*(?:\.[0-9]+)?[kK]?)",
        // "80k to 100k USD", "90,000-120,000$"
        r"([0-9][0-9,]*(?:\.[0-9]+)?[kK]?)\s*(?:-|–|—|to)\s*([0-9][0-9,]*(?:\.[0-9]+)?[kK]?)\s*(?:USD|usd|\$)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("salary pattern"))
    .collect()
});

/// Extracts a salary range as `"$low - $high"` from original-case text.
/// First matching pattern wins.
pub fn extract_salary_range(text: &str) -> Option<String> {
    for pattern in SALARY_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            return Some(format!("${} - ${}", &caps[1], &caps[2]));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_detected() {
        assert_eq!(detect_work_type("this role is fully remote"), Some(WorkType::Remote));
    }

    #[test]
    fn test_remote_beats_onsite() {
        let text = "remote possible, onsite preferred";
        assert_eq!(detect_work_type(text), Some(WorkType::Remote));
    }

    #[test]
    fn test_hybrid_beats_onsite() {
        let text = "hybrid schedule with some onsite days";
        assert_eq!(detect_work_type(text), Some(WorkType::Hybrid));
    }

    #[test]
    fn test_no_work_type_signal() {
        assert_eq!(detect_work_type("we ship software"), None);
    }

    #[test]
    fn test_senior_beats_junior() {
        let text = "senior engineer mentoring junior developers";
        assert_eq!(detect_experience_level(text), Some(ExperienceLevel::Senior));
    }

    #[test]
    fn test_entry_level_detected() {
        assert_eq!(
            detect_experience_level("great entry-level opportunity"),
            Some(ExperienceLevel::Entry)
        );
    }

    #[test]
    fn test_mid_level_detected() {
        assert_eq!(
            detect_experience_level("looking for a mid-level backend developer"),
            Some(ExperienceLevel::Mid)
        );
    }

    #[test]
    fn test_salary_dollar_range() {
        assert_eq!(
            extract_salary_range("Salary: $90,000 - $120,000 per year"),
            Some("$90,000 - $120,000".to_string())
        );
    }

    #[test]
    fn test_salary_dollar_to_form() {
        assert_eq!(
            extract_salary_range("We pay $80k to $100k depending on experience"),
            Some("$80k - $100k".to_string())
        );
    }

    #[test]
    fn test_salary_usd_suffix_form() {
        assert_eq!(
            extract_salary_range("80k to 100k USD"),
            Some("$80k - $100k".to_string())
        );
    }

    #[test]
    fn test_salary_trailing_dollar_form() {
        assert_eq!(
            extract_salary_range("Compensation 90,000-120,000$"),
            Some("$90,000 - $120,000".to_string())
        );
    }

    #[test]
    fn test_no_salary() {
        assert_eq!(extract_salary_range("Competitive compensation"), None);
    }

    #[test]
    fn test_first_pattern_wins_over_second() {
        // Both forms present: the dollar-prefixed pattern is tested first.
        let text = "base $100,000 - $130,000, or 90k-110k USD for contractors";
        assert_eq!(extract_salary_range(text), Some("$100,000 - $130,000".to_string()));
    }

    #[test]
    fn test_work_type_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&WorkType::OnSite).unwrap(), "\"on-site\"");
        assert_eq!(serde_json::to_string(&WorkType::Remote).unwrap(), "\"remote\"");
    }

    #[test]
    fn test_experience_level_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ExperienceLevel::Senior).unwrap(), "\"senior\"");
    }
}
