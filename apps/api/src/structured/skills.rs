//! Skill-keyword matcher — scans the whole description for a fixed
//! technology vocabulary and merges hits into the segmenter's skills bucket.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Display forms. Matching happens on the lower-cased form; terms are kept
/// long enough that plain containment stays reasonable ("Golang" rather
/// than "Go").
const SKILL_VOCAB: &[&str] = &[
    "Python",
    "Rust",
    "Golang",
    "Java",
    "JavaScript",
    "TypeScript",
    "Kotlin",
    "Swift",
    "Ruby",
    "PHP",
    "C++",
    "C#",
    "Scala",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Django",
    "Rails",
    "Spring",
    "AWS",
    "Azure",
    "GCP",
    "Google Cloud",
    "PostgreSQL",
    "MySQL",
    "MongoDB",
    "Redis",
    "Elasticsearch",
    "Kafka",
    "RabbitMQ",
    "SQL",
    "GraphQL",
    "gRPC",
    "Docker",
    "Kubernetes",
    "Terraform",
    "Ansible",
    "Linux",
    "Machine Learning",
    "Deep Learning",
    "Data Analysis",
    "Data Engineering",
    "CI/CD",
];

static LOWERED_VOCAB: LazyLock<Vec<(String, &'static str)>> = LazyLock::new(|| {
    SKILL_VOCAB
        .iter()
        .map(|term| (term.to_lowercase(), *term))
        .collect()
});

/// Returns every vocabulary term contained in the text. `lower` must
/// already be lower-cased.
pub fn scan_skills(lower: &str) -> Vec<String> {
    LOWERED_VOCAB
        .iter()
        .filter(|(needle, _)| lower.contains(needle.as_str()))
        .map(|(_, display)| (*display).to_string())
        .collect()
}

/// Set union of section-derived and scanned skills, deduplicated
/// case-insensitively. Section entries come first but order carries no
/// meaning downstream.
pub fn merge_skills(section: Vec<String>, scanned: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::new();
    for skill in section.into_iter().chain(scanned) {
        if seen.insert(skill.to_lowercase()) {
            merged.push(skill);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_finds_contained_terms() {
        let found = scan_skills("we write python and deploy on kubernetes");
        assert!(found.contains(&"Python".to_string()));
        assert!(found.contains(&"Kubernetes".to_string()));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_scan_is_case_insensitive_via_lowered_input() {
        let found = scan_skills("experience with postgresql required");
        assert!(found.contains(&"PostgreSQL".to_string()));
        // "sql" is a substring of "postgresql", so plain containment also
        // surfaces SQL. Containment semantics, kept deliberately.
        assert!(found.contains(&"SQL".to_string()));
    }

    #[test]
    fn test_scan_empty_text() {
        assert!(scan_skills("").is_empty());
    }

    #[test]
    fn test_merge_dedupes_case_insensitively() {
        let merged = merge_skills(
            vec!["Machine Learning".to_string()],
            vec!["Machine Learning".to_string(), "Python".to_string()],
        );
        assert_eq!(merged.len(), 2);
        assert!(merged.contains(&"Machine Learning".to_string()));
        assert!(merged.contains(&"Python".to_string()));
    }

    #[test]
    fn test_merge_keeps_section_entries_not_in_vocab() {
        let merged = merge_skills(
            vec!["Strong written communication".to_string()],
            vec!["Rust".to_string()],
        );
        assert_eq!(merged.len(), 2);
    }
}
