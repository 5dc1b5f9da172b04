//! JD Parser: extracts skills, experience, education, role and company
//! details from a raw job description.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::errors::ExtractionError;
use crate::extraction::analyzer::TextAnalyzer;
use crate::extraction::lexicon::contains_term;
use crate::extraction::normalize::{canonical_lines, normalize};
use crate::extraction::skills::extract_skills;
use crate::extraction::vocabulary::SkillVocabulary;
use crate::models::job::{
    CompanyInfo, EducationRequirements, ExperienceRequirements, JobRequirements,
    RoleRequirements, YearsRequirement,
};
use crate::models::skills::SkillSet;
use crate::requirements::priority::{categorize_requirements_priority, split_sentences};

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("job description pattern: compile-time constant")
}

// ──────────────────────────────────────────────────────────────
// Experience
// ──────────────────────────────────────────────────────────────

/// Year patterns. Group 1 is the minimum; group 2, when present, the maximum.
static YEAR_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(\d{1,2})\+?[ \t]*(?:(?:to|-|–)[ \t]*(\d{1,2})[ \t]*)?years?[ \t]+(?:of[ \t]+)?experience",
        r"(?i)\bminimum[ \t]+(?:of[ \t]+)?(\d{1,2})\+?[ \t]*years?",
        r"(?i)\bat least[ \t]+(\d{1,2})\+?[ \t]*years?",
        r"(?i)\b(\d{1,2})\+[ \t]*years?",
        r"(?i)\b(\d{1,2})[ \t]+or more years?",
    ]
    .iter()
    .map(|p| compile(p))
    .collect()
});

const EXPERIENCE_WORDS: &[&str] = &["experience", "expertise", "background"];

/// Every "N years" statement plus the skills tied to experience wording.
pub fn extract_experience_requirements(
    text: &str,
    vocabulary: &SkillVocabulary,
) -> ExperienceRequirements {
    let mut years_required: Vec<YearsRequirement> = Vec::new();
    for pattern in YEAR_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            let record = YearsRequirement {
                min_years: caps.get(1).and_then(|m| m.as_str().parse().ok()),
                max_years: caps.get(2).and_then(|m| m.as_str().parse().ok()),
                kind: "general".to_string(),
            };
            if !years_required.contains(&record) {
                years_required.push(record);
            }
        }
    }

    let mut technology_experience = SkillSet::new();
    for sentence in text.lines().flat_map(split_sentences) {
        if !EXPERIENCE_WORDS.iter().any(|w| contains_term(sentence, w)) {
            continue;
        }
        for skill in vocabulary.skills() {
            if skill.chars().count() > 1 && contains_term(sentence, skill) {
                technology_experience.insert(skill.as_str());
            }
        }
    }

    ExperienceRequirements {
        years_required,
        technology_experience,
    }
}

// ──────────────────────────────────────────────────────────────
// Education
// ──────────────────────────────────────────────────────────────

static DEGREE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\bbachelor'?s?[ \t]*degree",
        r"(?i)\bmaster'?s?[ \t]*degree",
        r"(?i)\b(?:phd|ph\.d|doctorate)\b",
        r"(?i)\bdiploma\b",
        r"(?i)\bcertificate\b",
        r"(?i)\bdegree[ \t]+in[ \t]+[a-z][a-z \t]*[a-z]",
        r"(?i)\b(?:bachelor|master|phd)'?s?[ \t]+in[ \t]+[a-z][a-z \t]*[a-z]",
    ]
    .iter()
    .map(|p| compile(p))
    .collect()
});

const STUDY_FIELDS: &[&str] = &[
    "computer science",
    "software engineering",
    "information technology",
    "engineering",
    "mathematics",
    "statistics",
    "data science",
    "business",
    "economics",
    "finance",
    "marketing",
];

pub fn extract_education_requirements(text: &str) -> EducationRequirements {
    let mut degree_requirements: Vec<String> = Vec::new();
    for pattern in DEGREE_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            let found = m.as_str().trim().to_lowercase();
            if !degree_requirements.contains(&found) {
                degree_requirements.push(found);
            }
        }
    }

    let fields_of_study = STUDY_FIELDS
        .iter()
        .filter(|field| contains_term(text, field))
        .map(|field| field.to_string())
        .collect();

    EducationRequirements {
        degree_requirements,
        fields_of_study,
    }
}

// ──────────────────────────────────────────────────────────────
// Role and company (informational)
// ──────────────────────────────────────────────────────────────

static TITLE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:position|role|job)[ \t]*:[ \t]*([a-z][a-z \t]*)",
        r"(?i)\bwe are looking for[ \t]*(?:an?[ \t]+)?([a-z][a-z \t]*)",
        r"(?i)\bhiring[ \t]*(?:an?[ \t]+)?([a-z][a-z \t]*)",
    ]
    .iter()
    .map(|p| compile(p))
    .collect()
});

const RESPONSIBILITY_INDICATORS: &[&str] = &[
    "primary responsibilities",
    "responsibilities",
    "main duties",
    "duties",
    "you will",
    "role involves",
    "key tasks",
];

static RESPONSIBILITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = RESPONSIBILITY_INDICATORS
        .iter()
        .map(|i| regex::escape(i))
        .collect::<Vec<_>>()
        .join("|");
    compile(&format!(r"(?i)\b(?:{alternation})[ \t]*:?[ \t]*([^.\n]*)"))
});

static COMPANY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:company|organization)[ \t]*:[ \t]*([a-z][a-z \t]*)",
        r"\bat[ \t]+([A-Z][a-zA-Z \t]*?)[ \t]*,",
        r"\bjoin[ \t]+([A-Z][a-zA-Z \t]*)",
    ]
    .iter()
    .map(|p| compile(p))
    .collect()
});

static LOCATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\blocation[ \t]*:[ \t]*([a-z][a-z \t,]*)",
        r"(?i)\bbased in[ \t]+([a-z][a-z \t,]*)",
        r"\b([A-Z][a-zA-Z]+(?:[ \t]+[A-Z][a-zA-Z]+)*,[ \t]*[A-Z]{2,})\b",
    ]
    .iter()
    .map(|p| compile(p))
    .collect()
});

/// First capture group of every match, trimmed and deduplicated in order.
fn captures(patterns: &[Regex], text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for pattern in patterns {
        for caps in pattern.captures_iter(text) {
            let Some(m) = caps.get(1) else { continue };
            let value = m.as_str().trim().trim_end_matches(',').trim().to_string();
            if !value.is_empty() && !found.contains(&value) {
                found.push(value);
            }
        }
    }
    found
}

fn strip_list_marker(line: &str) -> &str {
    line.trim()
        .trim_start_matches(['-', '*', '•'])
        .trim()
}

/// Text after each responsibility indicator on its own line. An indicator
/// that ends its line takes the following list lines instead, up to a blank
/// line or the next heading.
fn extract_responsibilities(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    let mut found: Vec<String> = Vec::new();
    let mut push = |item: &str| {
        let item = strip_list_marker(item);
        if !item.is_empty() && !found.iter().any(|f| f == item) {
            found.push(item.to_string());
        }
    };

    for (i, line) in lines.iter().enumerate() {
        for caps in RESPONSIBILITY_PATTERN.captures_iter(line) {
            let inline = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
            if !inline.is_empty() {
                push(inline);
                continue;
            }
            for next in lines[i + 1..]
                .iter()
                .take_while(|l| !l.trim().is_empty() && !l.trim().ends_with(':'))
            {
                push(next);
            }
        }
    }
    found
}

pub fn extract_role_requirements(text: &str) -> RoleRequirements {
    RoleRequirements {
        job_titles: captures(&TITLE_PATTERNS, text),
        responsibilities: extract_responsibilities(text),
    }
}

pub fn extract_company_info(text: &str) -> CompanyInfo {
    CompanyInfo {
        company_names: captures(&COMPANY_PATTERNS, text),
        locations: captures(&LOCATION_PATTERNS, text),
    }
}

// ──────────────────────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────────────────────

/// Requirement extractor for job descriptions. Shares the résumé parser's
/// analyzer and vocabulary.
#[derive(Clone)]
pub struct JobParser {
    analyzer: Arc<dyn TextAnalyzer>,
    vocabulary: Arc<SkillVocabulary>,
}

impl JobParser {
    pub fn new(analyzer: Arc<dyn TextAnalyzer>, vocabulary: Arc<SkillVocabulary>) -> Self {
        Self {
            analyzer,
            vocabulary,
        }
    }

    /// Structured requirements, or `EmptyDocument` for blank input.
    pub fn parse(&self, jd_text: &str) -> Result<JobRequirements, ExtractionError> {
        if jd_text.trim().is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        let normalized = normalize(jd_text);
        // Header splitting would cut "5 years of experience" at a line end.
        let canonical = canonical_lines(jd_text);
        let all_extracted_skills =
            extract_skills(&normalized, &self.vocabulary, self.analyzer.as_ref());
        let (required_skills, preferred_skills) =
            categorize_requirements_priority(&canonical, &all_extracted_skills);

        let job = JobRequirements {
            required_skills,
            preferred_skills,
            experience_requirements: extract_experience_requirements(&canonical, &self.vocabulary),
            education_requirements: extract_education_requirements(&normalized),
            role_requirements: extract_role_requirements(&normalized),
            company_info: extract_company_info(&normalized),
            all_extracted_skills,
        };

        tracing::info!(
            required = job.required_skills.len(),
            preferred = job.preferred_skills.len(),
            years = ?job.experience_requirements.minimum_years(),
            "Parsed job description"
        );
        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::analyzer::RuleBasedAnalyzer;

    const SAMPLE_JD: &str = r#"
    Software Engineer - Full Stack Development

    We are looking for a talented Software Engineer to join our dynamic team.

    Required Skills:
    - 3+ years of experience in Python and JavaScript
    - Experience with React, Node.js, and MongoDB
    - Strong knowledge of REST APIs and Git
    - Bachelor's degree in Computer Science or related field

    Preferred Skills:
    - Experience with AWS or GCP
    - Knowledge of Docker and Kubernetes
    - Familiarity with Machine Learning

    Responsibilities:
    - Develop and maintain web applications
    - Collaborate with cross-functional teams
    - Write clean, maintainable code

    Location: San Francisco, CA
    "#;

    fn parser() -> JobParser {
        JobParser::new(
            Arc::new(RuleBasedAnalyzer),
            Arc::new(SkillVocabulary::default()),
        )
    }

    #[test]
    fn test_parse_sample_jd_partitions_skills() {
        let job = parser().parse(SAMPLE_JD).unwrap();
        for skill in ["Python", "JavaScript", "React", "Node.js", "MongoDB", "Git"] {
            assert!(job.required_skills.contains(skill), "{skill} should be required");
        }
        for skill in ["AWS", "GCP", "Docker", "Kubernetes", "Machine Learning"] {
            assert!(job.preferred_skills.contains(skill), "{skill} should be preferred");
        }
        assert!(job.required_skills.is_disjoint(&job.preferred_skills));
        assert_eq!(
            job.all_extracted_skills.len(),
            job.required_skills.len() + job.preferred_skills.len()
        );
    }

    #[test]
    fn test_parse_sample_jd_experience_and_education() {
        let job = parser().parse(SAMPLE_JD).unwrap();
        assert_eq!(
            job.experience_requirements.years_required,
            vec![YearsRequirement { min_years: Some(3), max_years: None, kind: "general".into() }]
        );
        let tech = &job.experience_requirements.technology_experience;
        assert!(tech.contains("Python") && tech.contains("React") && tech.contains("AWS"));
        assert!(!tech.contains("Docker"));
        assert!(job
            .education_requirements
            .degree_requirements
            .contains(&"bachelor's degree".to_string()));
        assert_eq!(job.education_requirements.fields_of_study, vec!["computer science"]);
    }

    #[test]
    fn test_parse_sample_jd_role_and_company() {
        let job = parser().parse(SAMPLE_JD).unwrap();
        assert_eq!(
            job.role_requirements.responsibilities,
            vec![
                "Develop and maintain web applications",
                "Collaborate with cross-functional teams",
                "Write clean, maintainable code",
            ]
        );
        assert_eq!(
            job.role_requirements.job_titles,
            vec!["talented Software Engineer to join our dynamic team"]
        );
        assert_eq!(job.company_info.locations, vec!["San Francisco, CA"]);
    }

    #[test]
    fn test_year_ranges_and_duplicates() {
        let vocab = SkillVocabulary::default();
        let reqs = extract_experience_requirements(
            "3-5 years of experience. Minimum 3 years. At least 2 years in Go. 3-5 years of experience.",
            &vocab,
        );
        assert_eq!(
            reqs.years_required,
            vec![
                YearsRequirement { min_years: Some(3), max_years: Some(5), kind: "general".into() },
                YearsRequirement { min_years: Some(3), max_years: None, kind: "general".into() },
                YearsRequirement { min_years: Some(2), max_years: None, kind: "general".into() },
            ]
        );
    }

    #[test]
    fn test_years_at_line_end_survive_header_splitting() {
        let job = parser()
            .parse("Backend role\nCandidates need 5 years of experience\nPython required")
            .unwrap();
        assert_eq!(job.experience_requirements.minimum_years(), Some(5));
    }

    #[test]
    fn test_empty_jd_is_rejected() {
        assert!(matches!(parser().parse("  \n\t"), Err(ExtractionError::EmptyDocument)));
    }

    #[test]
    fn test_jd_without_skills_parses() {
        let job = parser().parse("Friendly team, flexible hours.").unwrap();
        assert!(job.required_skills.is_empty());
        assert!(job.preferred_skills.is_empty());
    }
}
