//! Section segmenter — walks normalized description text line by line and
//! buckets content under the most recent recognized section header.
//!
//! Header recognition is exact-match (after trimming one trailing colon)
//! against anchored patterns. The table is an ordered slice and categories
//! are tested in registration order; patterns shared between categories
//! ("qualifications", "experience" appear under both requirements and
//! qualifications) therefore resolve to the earlier-registered category.

use std::sync::LazyLock;

use regex::Regex;

/// Lines at or under this length (in chars, after trim) are dropped when a
/// section buffer is flushed.
const MIN_ITEM_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Responsibilities,
    Requirements,
    Qualifications,
    Benefits,
    Skills,
}

static HEADER_TABLE: LazyLock<Vec<(Category, Vec<Regex>)>> = LazyLock::new(|| {
    let compile = |patterns: &[&str]| -> Vec<Regex> {
        patterns
            .iter()
            .map(|p| Regex::new(p).expect("header pattern"))
            .collect()
    };
    vec![
        (
            Category::Responsibilities,
            compile(&[
                r"^(?:key |core )?responsibilities$",
                r"^role and responsibilities$",
                r"^what you['’]ll do$",
                r"^what you will do$",
                r"^duties$",
                r"^your role$",
            ]),
        ),
        (
            Category::Requirements,
            compile(&[
                r"^(?:minimum |basic )?requirements$",
                r"^what we['’]re looking for$",
                r"^what you['’]ll need$",
                r"^what you will need$",
                r"^must[- ]haves?$",
                r"^qualifications$",
                r"^experience$",
            ]),
        ),
        (
            Category::Qualifications,
            compile(&[
                r"^qualifications$",
                r"^preferred qualifications$",
                r"^nice[- ]to[- ]haves?$",
                r"^bonus points$",
                r"^preferred$",
                r"^experience$",
                r"^education$",
            ]),
        ),
        (
            Category::Benefits,
            compile(&[
                r"^benefits$",
                r"^perks$",
                r"^perks (?:and|&) benefits$",
                r"^benefits (?:and|&) perks$",
                r"^what we offer$",
                r"^compensation$",
                r"^compensation (?:and|&) benefits$",
                r"^why join us$",
            ]),
        ),
        (
            Category::Skills,
            compile(&[
                r"^(?:key |technical |required )?skills$",
                r"^skills (?:and|&) experience$",
                r"^tech stack$",
                r"^technologies$",
            ]),
        ),
    ]
});

/// Output of segmentation. `overview` collects text seen before the first
/// header; the buckets hold the surviving lines of their sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segmented {
    pub overview: String,
    pub responsibilities: Vec<String>,
    pub requirements: Vec<String>,
    pub qualifications: Vec<String>,
    pub benefits: Vec<String>,
    pub skills: Vec<String>,
}

impl Segmented {
    fn bucket_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Responsibilities => &mut self.responsibilities,
            Category::Requirements => &mut self.requirements,
            Category::Qualifications => &mut self.qualifications,
            Category::Benefits => &mut self.benefits,
            Category::Skills => &mut self.skills,
        }
    }
}

/// Returns the category whose header patterns match the line, if any.
/// A single trailing colon is ignored; matching is case-insensitive via
/// lower-casing the candidate.
fn match_header(line: &str) -> Option<Category> {
    let trimmed = line.trim();
    let candidate = trimmed.strip_suffix(':').unwrap_or(trimmed).trim_end();
    if candidate.is_empty() {
        return None;
    }
    let candidate = candidate.to_lowercase();
    for (category, patterns) in HEADER_TABLE.iter() {
        if patterns.iter().any(|p| p.is_match(&candidate)) {
            return Some(*category);
        }
    }
    None
}

/// Segments normalized text into overview plus per-category line buckets.
pub fn segment(text: &str) -> Segmented {
    let mut out = Segmented::default();
    let mut overview_parts: Vec<&str> = Vec::new();
    let mut current: Option<Category> = None;
    let mut buffer: Vec<String> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(category) = match_header(line) {
            flush(&mut out, current, &mut buffer);
            current = Some(category);
        } else if current.is_some() {
            buffer.push(line.to_string());
        } else {
            overview_parts.push(line);
        }
    }
    flush(&mut out, current, &mut buffer);

    out.overview = overview_parts.join(" ");
    out
}

fn flush(out: &mut Segmented, current: Option<Category>, buffer: &mut Vec<String>) {
    match current {
        Some(category) => {
            let bucket = out.bucket_mut(category);
            bucket.extend(
                buffer
                    .drain(..)
                    .filter(|line| line.chars().count() > MIN_ITEM_CHARS),
            );
        }
        None => buffer.clear(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_two_sections() {
        let text = "Responsibilities:\nWrite code for the backend service\nReview pull requests from teammates\nRequirements:\n5+ years of experience required";
        let seg = segment(text);
        assert_eq!(
            seg.responsibilities,
            vec![
                "Write code for the backend service",
                "Review pull requests from teammates"
            ]
        );
        assert_eq!(seg.requirements, vec!["5+ years of experience required"]);
        assert_eq!(seg.overview, "");
    }

    #[test]
    fn test_text_before_first_header_is_overview() {
        let text = "We build developer tools.\nJoin a small focused team.\nBenefits:\nUnlimited vacation policy for everyone";
        let seg = segment(text);
        assert_eq!(seg.overview, "We build developer tools. Join a small focused team.");
        assert_eq!(seg.benefits, vec!["Unlimited vacation policy for everyone"]);
    }

    #[test]
    fn test_no_headers_all_overview() {
        let seg = segment("Line one of text.\nLine two of text.");
        assert_eq!(seg.overview, "Line one of text. Line two of text.");
        assert!(seg.responsibilities.is_empty());
        assert!(seg.requirements.is_empty());
    }

    #[test]
    fn test_short_lines_filtered_from_buckets() {
        let text = "Requirements:\nYes.\nStrong background in distributed systems";
        let seg = segment(text);
        assert_eq!(seg.requirements, vec!["Strong background in distributed systems"]);
    }

    #[test]
    fn test_exactly_ten_chars_filtered() {
        // 10 chars is at the boundary and must be excluded; 11 survives.
        let text = format!("Skills:\n{}\n{}", "a".repeat(10), "b".repeat(11));
        let seg = segment(&text);
        assert_eq!(seg.skills, vec!["b".repeat(11)]);
    }

    #[test]
    fn test_header_without_colon_recognized() {
        let seg = segment("What you'll do\nDesign and build the ingestion pipeline");
        assert_eq!(seg.responsibilities, vec!["Design and build the ingestion pipeline"]);
    }

    #[test]
    fn test_header_case_insensitive() {
        let seg = segment("RESPONSIBILITIES:\nOperate the production environment");
        assert_eq!(seg.responsibilities, vec!["Operate the production environment"]);
    }

    #[test]
    fn test_ambiguous_qualifications_header_goes_to_requirements() {
        // "qualifications" is registered under requirements first.
        let seg = segment("Qualifications:\nDegree in computer science or equivalent");
        assert_eq!(seg.requirements, vec!["Degree in computer science or equivalent"]);
        assert!(seg.qualifications.is_empty());
    }

    #[test]
    fn test_unambiguous_qualifications_patterns_still_reachable() {
        let seg = segment("Preferred qualifications:\nExperience operating Kubernetes clusters");
        assert_eq!(seg.qualifications, vec!["Experience operating Kubernetes clusters"]);
    }

    #[test]
    fn test_header_line_must_match_exactly() {
        // A sentence merely containing a header word is content, not a header.
        let seg = segment("Overview text here.\nThe responsibilities are broad and varied.");
        assert!(seg.responsibilities.is_empty());
        assert_eq!(
            seg.overview,
            "Overview text here. The responsibilities are broad and varied."
        );
    }

    #[test]
    fn test_new_header_flushes_previous_section() {
        let text = "Perks:\nCatered lunches every single day\nTech stack:\nRust services over gRPC and Postgres";
        let seg = segment(text);
        assert_eq!(seg.benefits, vec!["Catered lunches every single day"]);
        assert_eq!(seg.skills, vec!["Rust services over gRPC and Postgres"]);
    }

    #[test]
    fn test_curly_apostrophe_header() {
        let seg = segment("What you’ll need\nFive years building production services");
        assert_eq!(seg.requirements, vec!["Five years building production services"]);
    }
}
