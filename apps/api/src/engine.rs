//! Pipeline entry points: résumé and job parsing, single matches and
//! candidate ranking. Owns the shared text-analysis and scoring services.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use serde::Deserialize;

use crate::errors::ExtractionError;
use crate::extraction::analyzer::{RuleBasedAnalyzer, TextAnalyzer};
use crate::extraction::resume::ResumeParser;
use crate::extraction::text::is_supported;
use crate::extraction::vocabulary::SkillVocabulary;
use crate::matching::fallback::basic_match;
use crate::matching::scorer::{MatchScorer, WeightedMatchScorer};
use crate::models::job::JobRequirements;
use crate::models::matching::MatchResult;
use crate::models::ranking::RankingPool;
use crate::models::resume::ExtractedResume;
use crate::ranking::ranker::CandidateRanker;
use crate::requirements::jd_parser::JobParser;

/// Where a résumé comes from: a file on disk or text already extracted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResumeSource {
    Path {
        path: PathBuf,
    },
    Text {
        text: String,
        #[serde(default)]
        file_name: Option<String>,
    },
}

pub struct MatchEngine {
    resume_parser: ResumeParser,
    job_parser: JobParser,
    scorer: Arc<dyn MatchScorer>,
    ranker: CandidateRanker,
}

impl MatchEngine {
    /// Engine with the rule-based analyzer and the weighted scorer.
    pub fn new(vocabulary: Arc<SkillVocabulary>) -> Self {
        let scorer = Arc::new(WeightedMatchScorer::new(&vocabulary));
        Self::with_services(Arc::new(RuleBasedAnalyzer::new()), vocabulary, scorer)
    }

    pub fn with_services(
        analyzer: Arc<dyn TextAnalyzer>,
        vocabulary: Arc<SkillVocabulary>,
        scorer: Arc<dyn MatchScorer>,
    ) -> Self {
        let ranker = CandidateRanker::new(scorer.clone(), vocabulary.categories().cloned());
        Self {
            resume_parser: ResumeParser::new(analyzer.clone(), vocabulary.clone()),
            job_parser: JobParser::new(analyzer, vocabulary),
            scorer,
            ranker,
        }
    }

    pub fn parse_resume(&self, source: &ResumeSource) -> ExtractedResume {
        match source {
            ResumeSource::Path { path } => self.resume_parser.parse_file(path),
            ResumeSource::Text { text, file_name } => self
                .resume_parser
                .parse_text(file_name.as_deref().unwrap_or("inline.txt"), text),
        }
    }

    pub fn parse_job_description(&self, jd_text: &str) -> Result<JobRequirements, ExtractionError> {
        self.job_parser.parse(jd_text)
    }

    /// Scores one résumé against a job description. A résumé that failed
    /// extraction is an error; a scorer failure degrades to basic scoring.
    pub fn match_resume_to_jd(
        &self,
        resume: &ExtractedResume,
        jd_text: &str,
    ) -> Result<MatchResult, ExtractionError> {
        if let Some(error) = &resume.error {
            return Err(ExtractionError::Unreadable(error.clone()));
        }
        let job = self.parse_job_description(jd_text)?;

        Ok(self.scorer.score(resume, &job).unwrap_or_else(|e| {
            tracing::warn!(source = %resume.source, "Weighted scoring failed, using basic scoring: {e}");
            basic_match(resume, &job)
        }))
    }

    /// Parses every source and ranks the pool. Only an unusable job
    /// description fails the whole call.
    pub fn rank_candidates(
        &self,
        sources: &[ResumeSource],
        jd_text: &str,
    ) -> Result<RankingPool, ExtractionError> {
        let job = self.parse_job_description(jd_text)?;
        let resumes: Vec<ExtractedResume> = sources
            .par_iter()
            .map(|source| self.parse_resume(source))
            .collect();
        Ok(self.ranker.rank(&job, &resumes))
    }

    /// Ranks every supported résumé file directly inside `folder`.
    pub fn rank_folder(&self, folder: &Path, jd_text: &str) -> Result<RankingPool, ExtractionError> {
        let sources: Vec<ResumeSource> = discover_resumes(folder)?
            .into_iter()
            .map(|path| ResumeSource::Path { path })
            .collect();
        tracing::info!(folder = %folder.display(), resumes = sources.len(), "Discovered resumes");
        self.rank_candidates(&sources, jd_text)
    }
}

/// Supported résumé files in `folder`, sorted by file name.
pub fn discover_resumes(folder: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
    if !folder.is_dir() {
        return Err(ExtractionError::NotFound(folder.display().to_string()));
    }
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if path.is_file() && is_supported(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::matching::ScoringMethod;

    const JD: &str = "We are hiring a Backend Engineer.\n\
        Required Skills:\n\
        - Python\n\
        - SQL\n\
        - Docker\n\
        Nice to have:\n\
        - AWS";

    fn inline(text: &str) -> ResumeSource {
        ResumeSource::Text {
            text: text.to_string(),
            file_name: None,
        }
    }

    fn engine() -> MatchEngine {
        MatchEngine::new(Arc::new(SkillVocabulary::default()))
    }

    #[test]
    fn test_parse_inline_resume() {
        let resume = engine().parse_resume(&ResumeSource::Text {
            text: "Jane Doe\nSkills: Python, SQL".to_string(),
            file_name: Some("jane.txt".to_string()),
        });
        assert_eq!(resume.source, "jane.txt");
        assert!(resume.skills.contains("Python"));
    }

    #[test]
    fn test_resume_source_deserializes_either_shape() {
        let path: ResumeSource = serde_json::from_str(r#"{"path": "cv.pdf"}"#).unwrap();
        assert!(matches!(path, ResumeSource::Path { .. }));
        let text: ResumeSource = serde_json::from_str(r#"{"text": "Jane"}"#).unwrap();
        assert!(matches!(text, ResumeSource::Text { file_name: None, .. }));
    }

    #[test]
    fn test_match_resume_to_jd() {
        let engine = engine();
        let resume = engine.parse_resume(&inline("Jane Doe\nSkills: Python, SQL"));
        let result = engine.match_resume_to_jd(&resume, JD).unwrap();
        assert_eq!(result.scoring_method, ScoringMethod::Weighted);
        assert_eq!(result.skill_analysis.missing_required, vec!["Docker".to_string()]);
    }

    #[test]
    fn test_match_rejects_failed_resume_and_empty_jd() {
        let engine = engine();
        let failed = ExtractedResume::failed("x.pdf", "no text");
        assert!(matches!(
            engine.match_resume_to_jd(&failed, JD),
            Err(ExtractionError::Unreadable(_))
        ));
        let resume = engine.parse_resume(&inline("Jane Doe\nSkills: Python"));
        assert!(matches!(
            engine.match_resume_to_jd(&resume, "   "),
            Err(ExtractionError::EmptyDocument)
        ));
    }

    #[test]
    fn test_rank_folder_includes_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b_ben.txt"), "Ben Okafor\nSkills: Excel").unwrap();
        std::fs::write(dir.path().join("a_ana.txt"), "Ana Silva\nSkills: Python, SQL, Docker").unwrap();
        std::fs::write(dir.path().join("c_blank.txt"), "  \n ").unwrap();
        std::fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let pool = engine().rank_folder(dir.path(), JD).unwrap();
        assert_eq!(pool.total_candidates, 3);
        assert_eq!(pool.candidates[0].candidate_name, "Ana Silva");
        assert!(pool.candidates.iter().any(|c| c.file_name == "c_blank.txt" && c.is_degraded()));
    }

    #[test]
    fn test_discover_resumes_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["z.txt", "a.docx", "m.pdf", "skip.png"] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }
        let names: Vec<String> = discover_resumes(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.docx", "m.pdf", "z.txt"]);
        assert!(discover_resumes(&dir.path().join("missing")).is_err());
    }
}
