//! Résumé parser: raw document text to `ExtractedResume`.

use std::path::Path;
use std::sync::Arc;

use crate::errors::ExtractionError;
use crate::extraction::analyzer::TextAnalyzer;
use crate::extraction::contact::extract_contact_info;
use crate::extraction::lexicon::{
    EDUCATION_INDICATORS, EDUCATION_SECTION_KEYWORDS, EXPERIENCE_INDICATORS,
    EXPERIENCE_SECTION_KEYWORDS, MAJOR_SECTION_KEYWORDS,
};
use crate::extraction::name::extract_name;
use crate::extraction::normalize::normalize;
use crate::extraction::sections::{
    extract_projects, extract_section, indicator_lines, next_section_keywords,
    parse_education_entries, parse_experience_entries,
};
use crate::extraction::skills::extract_skills;
use crate::extraction::text::extract_text;
use crate::extraction::vocabulary::SkillVocabulary;
use crate::models::resume::ExtractedResume;

/// Entity extractor for résumés. Cheap to clone; holds shared services only.
#[derive(Clone)]
pub struct ResumeParser {
    analyzer: Arc<dyn TextAnalyzer>,
    vocabulary: Arc<SkillVocabulary>,
}

impl ResumeParser {
    pub fn new(analyzer: Arc<dyn TextAnalyzer>, vocabulary: Arc<SkillVocabulary>) -> Self {
        Self {
            analyzer,
            vocabulary,
        }
    }

    /// Parses the document at `path`. A file that cannot be read yields no
    /// text, and so a résumé carrying the error instead of a failure. The
    /// extraction failure itself is logged by `extract_text`.
    pub fn parse_file(&self, path: &Path) -> ExtractedResume {
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.parse_text(&source, &extract_text(path))
    }

    /// Parses already-extracted text. `source` labels the document in output.
    pub fn parse_text(&self, source: &str, raw: &str) -> ExtractedResume {
        if raw.trim().is_empty() {
            tracing::warn!(source = %source, "Resume has no text");
            return ExtractedResume::failed(source, ExtractionError::EmptyDocument.to_string());
        }

        let normalized = normalize(raw);
        let vocabulary = self.vocabulary.as_ref();
        let analyzer = self.analyzer.as_ref();

        let name = extract_name(raw, &normalized, analyzer, vocabulary);
        let contact_info = extract_contact_info(&normalized);
        let skills = extract_skills(&normalized, vocabulary, analyzer);

        let education_text = section_or_indicators(
            &normalized,
            EDUCATION_SECTION_KEYWORDS,
            EDUCATION_INDICATORS,
        );
        let experience_text = section_or_indicators(
            &normalized,
            EXPERIENCE_SECTION_KEYWORDS,
            EXPERIENCE_INDICATORS,
        );

        let resume = ExtractedResume {
            source: source.to_string(),
            name,
            contact_info,
            skills,
            education: parse_education_entries(&education_text),
            experience: parse_experience_entries(&experience_text),
            projects: extract_projects(&normalized),
            error: None,
        };

        tracing::debug!(
            source = %source,
            skills = resume.skills.len(),
            education = resume.education.len(),
            experience = resume.experience.len(),
            projects = resume.projects.len(),
            "Parsed resume"
        );
        resume
    }
}

/// The headed section, or every indicator line when the header is missing.
fn section_or_indicators(normalized: &str, own: &[&str], indicators: &[&str]) -> String {
    let next = next_section_keywords(MAJOR_SECTION_KEYWORDS, own);
    let section = extract_section(normalized, own, &next);
    if section.trim().is_empty() {
        indicator_lines(normalized, indicators)
    } else {
        section
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::analyzer::RuleBasedAnalyzer;

    fn parser() -> ResumeParser {
        ResumeParser::new(
            Arc::new(RuleBasedAnalyzer),
            Arc::new(SkillVocabulary::default()),
        )
    }

    const SAMPLE: &str = "Jane Doe\n\
        jane.doe@example.com | +1 555-123-4567 | linkedin.com/in/janedoe\n\
        Summary: Backend engineer.\n\
        Skills: Python, SQL, Docker • Git\n\
        Work Experience\n\
        2021 - Present\n\
        Backend Developer at Acme, maintained REST services\n\
        Education\n\
        Bachelor of Technology in Computer Science, State University\n\
        Projects\n\
        Inventory Platform: developed stock tracking with Django";

    #[test]
    fn test_parse_full_resume() {
        let resume = parser().parse_text("jane.txt", SAMPLE);
        assert!(!resume.error.is_some());
        assert_eq!(resume.source, "jane.txt");
        assert_eq!(resume.name.as_deref(), Some("Jane Doe"));
        assert_eq!(resume.contact_info.email.as_deref(), Some("jane.doe@example.com"));
        assert!(resume.contact_info.phone.is_some());
        assert_eq!(
            resume.contact_info.linkedin.as_deref(),
            Some("linkedin.com/in/janedoe")
        );
        for skill in ["Python", "SQL", "Docker", "Git", "Django"] {
            assert!(resume.skills.contains(skill), "missing {skill}");
        }
        assert_eq!(resume.experience.len(), 2);
        assert_eq!(resume.education.len(), 1);
        assert_eq!(resume.projects.len(), 1);
    }

    #[test]
    fn test_indicator_fallback_without_headers() {
        let resume = parser().parse_text(
            "cv.txt",
            "John Roe\nGraduated from Riverside College\nWorked as analyst at Initech",
        );
        assert_eq!(resume.education, vec!["Graduated from Riverside College".to_string()]);
        assert_eq!(resume.experience, vec!["Worked as analyst at Initech".to_string()]);
    }

    #[test]
    fn test_empty_text_is_failed_resume() {
        let resume = parser().parse_text("blank.txt", "  \n ");
        assert!(resume.error.is_some());
        assert!(resume.skills.is_empty());
    }

    #[test]
    fn test_unreadable_file_is_failed_resume() {
        let dir = tempfile::tempdir().unwrap();
        let resume = parser().parse_file(&dir.path().join("missing.pdf"));
        assert!(resume.error.is_some());
        assert_eq!(resume.source, "missing.pdf");
        assert_eq!(
            resume.error.as_deref(),
            Some(ExtractionError::EmptyDocument.to_string().as_str())
        );
    }

    #[test]
    fn test_parse_file_reads_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jane.txt");
        std::fs::write(&path, SAMPLE).unwrap();
        let resume = parser().parse_file(&path);
        assert_eq!(resume.name.as_deref(), Some("Jane Doe"));
        assert_eq!(resume.source, "jane.txt");
    }
}
