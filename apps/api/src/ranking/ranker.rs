//! Candidate ranking: per-candidate scoring on the rayon pool, then a single
//! deterministic sort over the whole pool.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use rayon::prelude::*;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::matching::fallback::basic_match;
use crate::matching::scorer::{round_to, MatchScorer};
use crate::models::job::{JobRequirements, JobSummary};
use crate::models::matching::{MatchLevel, MatchResult};
use crate::models::ranking::{
    AdditionalScores, CandidateError, RankedCandidate, RankingPool, ResumeSummary,
};
use crate::models::resume::ExtractedResume;
use crate::ranking::analytics::analyze_pool;
use crate::ranking::signals::additional_scores;

/// Score given to candidates that could not be processed at all.
pub const PLACEHOLDER_SCORE: f64 = 10.0;

/// Weights of the final ranking blend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingWeights {
    pub overall_match: f64,
    pub skill_diversity: f64,
    pub experience_quality: f64,
    pub education_level: f64,
    pub project_relevance: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            overall_match: 0.50,
            skill_diversity: 0.15,
            experience_quality: 0.20,
            education_level: 0.10,
            project_relevance: 0.05,
        }
    }
}

/// Deterministic offset in [0.001, 0.009] derived from the match content.
///
/// The first eight bytes of the SHA-256 digest of the result's JSON, read as
/// a big-endian integer and scaled into the range.
pub fn uniqueness_offset(match_result: &MatchResult) -> f64 {
    let canonical = serde_json::to_vec(match_result).unwrap_or_default();
    let digest = Sha256::digest(&canonical);
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    let unit = u64::from_be_bytes(head) as f64 / u64::MAX as f64;
    0.001 + 0.008 * unit
}

/// Final ranking score on the 0-100 scale, rounded to three decimals.
pub fn final_ranking_score(
    match_result: &MatchResult,
    scores: &AdditionalScores,
    weights: &RankingWeights,
) -> f64 {
    let blended = match_result.overall_score / 100.0 * weights.overall_match
        + scores.skill_diversity * weights.skill_diversity
        + scores.experience_quality * weights.experience_quality
        + scores.education_level * weights.education_level
        + scores.project_relevance * weights.project_relevance
        + uniqueness_offset(match_result);

    let mut bonus = match_result.required_match_count() as f64 * 0.002
        + match_result.preferred_match_count() as f64 * 0.001;
    if match_result.experience_analysis.meets_year_requirement {
        bonus += 0.005;
    }
    if match_result.education_analysis.degree_match {
        bonus += 0.003;
    }

    round_to((blended + bonus) * 100.0, 3)
}

/// Pool ordering: final score, then raw match score, required matches and
/// preferred matches (all descending), then candidate name ascending
/// ignoring case.
pub fn compare_candidates(a: &RankedCandidate, b: &RankedCandidate) -> Ordering {
    b.final_ranking_score
        .total_cmp(&a.final_ranking_score)
        .then_with(|| b.overall_match_score.total_cmp(&a.overall_match_score))
        .then_with(|| b.required_match_count().cmp(&a.required_match_count()))
        .then_with(|| b.preferred_match_count().cmp(&a.preferred_match_count()))
        .then_with(|| {
            a.candidate_name
                .to_lowercase()
                .cmp(&b.candidate_name.to_lowercase())
        })
}

/// Sorts in place and assigns 1-based ranks and percentiles.
pub fn assign_ranks(candidates: &mut [RankedCandidate]) {
    candidates.sort_by(compare_candidates);
    let total = candidates.len() as f64;
    for (i, candidate) in candidates.iter_mut().enumerate() {
        candidate.rank = i + 1;
        candidate.percentile = round_to((total - i as f64) / total * 100.0, 1);
    }
}

/// One candidate's outcome before the pool is sorted.
struct Evaluation {
    candidate: RankedCandidate,
    error: Option<CandidateError>,
}

#[derive(Clone)]
pub struct CandidateRanker {
    scorer: Arc<dyn MatchScorer>,
    categories: Option<BTreeMap<String, Vec<String>>>,
    weights: RankingWeights,
}

impl CandidateRanker {
    pub fn new(
        scorer: Arc<dyn MatchScorer>,
        categories: Option<BTreeMap<String, Vec<String>>>,
    ) -> Self {
        Self {
            scorer,
            categories,
            weights: RankingWeights::default(),
        }
    }

    /// Ranks every résumé against `job`. Every input résumé appears exactly
    /// once in the output; failures become fallback or placeholder entries.
    pub fn rank(&self, job: &JobRequirements, resumes: &[ExtractedResume]) -> RankingPool {
        tracing::info!(candidates = resumes.len(), "Ranking candidate pool");

        let evaluations: Vec<Evaluation> = resumes
            .par_iter()
            .map(|resume| {
                panic::catch_unwind(AssertUnwindSafe(|| self.evaluate(job, resume)))
                    .unwrap_or_else(|cause| {
                        let message = panic_message(cause.as_ref());
                        tracing::error!(source = %resume.source, "Candidate scoring panicked: {message}");
                        placeholder(resume, message)
                    })
            })
            .collect();

        let mut candidates = Vec::with_capacity(evaluations.len());
        let mut errors = Vec::new();
        for evaluation in evaluations {
            candidates.push(evaluation.candidate);
            errors.extend(evaluation.error);
        }
        assign_ranks(&mut candidates);

        let ranking_analysis = analyze_pool(&candidates, job);
        tracing::info!(
            candidates = candidates.len(),
            errors = errors.len(),
            placeholders = candidates.iter().filter(|c| c.is_degraded()).count(),
            "Ranking complete"
        );

        RankingPool {
            success: true,
            run_id: Uuid::new_v4(),
            generated_at: chrono::Utc::now(),
            total_candidates: candidates.len(),
            processing_errors: errors.len(),
            errors,
            job_description_summary: JobSummary::from(job),
            ranking_analysis,
            candidates,
        }
    }

    fn evaluate(&self, job: &JobRequirements, resume: &ExtractedResume) -> Evaluation {
        if let Some(error) = &resume.error {
            tracing::warn!(source = %resume.source, "Resume unavailable, adding placeholder: {error}");
            return placeholder(resume, error.clone());
        }

        let (match_result, error) = match self.scorer.score(resume, job) {
            Ok(result) => (result, None),
            Err(e) => {
                tracing::warn!(source = %resume.source, "Weighted scoring failed, using basic scoring: {e}");
                let error = CandidateError {
                    file: resume.source.clone(),
                    error: e.to_string(),
                };
                (basic_match(resume, job), Some(error))
            }
        };

        let scores = additional_scores(resume, job, self.categories.as_ref());
        let final_score = final_ranking_score(&match_result, &scores, &self.weights);
        tracing::debug!(source = %resume.source, final_score, "Scored candidate");

        let contact = &resume.contact_info;
        Evaluation {
            candidate: RankedCandidate {
                rank: 0,
                percentile: 0.0,
                file_name: resume.source.clone(),
                candidate_name: resume.display_name().to_string(),
                email: contact.email.clone(),
                phone: contact.phone.clone(),
                linkedin: contact.linkedin.clone(),
                overall_match_score: match_result.overall_score,
                match_level: match_result.match_level,
                final_ranking_score: final_score,
                match_result: Some(match_result),
                additional_scores: Some(scores),
                resume_summary: ResumeSummary::from(resume),
                error: None,
            },
            error,
        }
    }
}

/// Minimal entry for a candidate that could not be scored.
fn placeholder(resume: &ExtractedResume, error: String) -> Evaluation {
    let contact = &resume.contact_info;
    Evaluation {
        candidate: RankedCandidate {
            rank: 0,
            percentile: 0.0,
            file_name: resume.source.clone(),
            candidate_name: resume.display_name().to_string(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            linkedin: contact.linkedin.clone(),
            overall_match_score: 0.0,
            match_level: MatchLevel::Degraded,
            final_ranking_score: PLACEHOLDER_SCORE,
            match_result: None,
            additional_scores: None,
            resume_summary: ResumeSummary::from(resume),
            error: Some(error.clone()),
        },
        error: Some(CandidateError {
            file: resume.source.clone(),
            error,
        }),
    }
}

fn panic_message(cause: &(dyn std::any::Any + Send)) -> String {
    cause
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| cause.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "candidate processing panicked".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MatchError;
    use crate::extraction::vocabulary::SkillVocabulary;
    use crate::matching::fallback::BASIC_SCORING_NOTE;
    use crate::matching::scorer::WeightedMatchScorer;
    use crate::models::matching::ScoringMethod;
    use crate::models::skills::SkillSet;

    fn set(names: &[&str]) -> SkillSet {
        names.iter().copied().collect()
    }

    fn ranker() -> CandidateRanker {
        let vocabulary = SkillVocabulary::default();
        let scorer = WeightedMatchScorer::new(&vocabulary).with_reference_year(2024);
        CandidateRanker::new(Arc::new(scorer), vocabulary.categories().cloned())
    }

    fn job() -> JobRequirements {
        JobRequirements {
            required_skills: set(&["Python", "SQL", "Docker"]),
            preferred_skills: set(&["AWS"]),
            ..JobRequirements::default()
        }
    }

    fn resume(source: &str, name: &str, skills: &[&str]) -> ExtractedResume {
        ExtractedResume {
            source: source.to_string(),
            name: Some(name.to_string()),
            skills: set(skills),
            ..ExtractedResume::default()
        }
    }

    fn candidate(name: &str, final_score: f64) -> RankedCandidate {
        RankedCandidate {
            rank: 0,
            percentile: 0.0,
            file_name: format!("{name}.pdf"),
            candidate_name: name.to_string(),
            email: None,
            phone: None,
            linkedin: None,
            overall_match_score: 50.0,
            match_level: MatchLevel::Moderate,
            final_ranking_score: final_score,
            match_result: None,
            additional_scores: None,
            resume_summary: ResumeSummary::default(),
            error: None,
        }
    }

    #[test]
    fn test_equal_scores_order_by_name_ignoring_case() {
        let mut pool = vec![candidate("bob", 70.0), candidate("Alice", 70.0), candidate("carol", 80.0)];
        assign_ranks(&mut pool);
        let names: Vec<&str> = pool.iter().map(|c| c.candidate_name.as_str()).collect();
        assert_eq!(names, vec!["carol", "Alice", "bob"]);
        assert_eq!(pool[0].percentile, 100.0);
        assert_eq!(pool[2].percentile, 33.3);
    }

    #[test]
    fn test_raw_match_score_breaks_final_ties() {
        let mut low = candidate("Alice", 70.0);
        low.overall_match_score = 40.0;
        let mut pool = vec![low, candidate("Zed", 70.0)];
        assign_ranks(&mut pool);
        assert_eq!(pool[0].candidate_name, "Zed");
    }

    #[test]
    fn test_failed_resume_gets_placeholder() {
        let resumes = vec![
            resume("good.txt", "Jane Doe", &["Python", "SQL"]),
            ExtractedResume::failed("broken.pdf", "No text could be extracted from the document"),
        ];
        let pool = ranker().rank(&job(), &resumes);
        assert_eq!(pool.total_candidates, 2);
        assert_eq!(pool.processing_errors, 1);
        assert_eq!(pool.errors[0].file, "broken.pdf");

        let broken = pool
            .candidates
            .iter()
            .find(|c| c.file_name == "broken.pdf")
            .unwrap();
        assert!(broken.is_degraded());
        assert_eq!(broken.final_ranking_score, PLACEHOLDER_SCORE);
        assert!(broken.error.is_some());
        assert_eq!(pool.candidates[1].file_name, "broken.pdf");
    }

    #[test]
    fn test_ranks_are_contiguous_and_sorted() {
        let resumes = vec![
            resume("a.txt", "Ana", &["Python"]),
            resume("b.txt", "Ben", &["Python", "SQL", "Docker", "AWS"]),
            resume("c.txt", "Cy", &[]),
            resume("d.txt", "Di", &["SQL", "Docker"]),
        ];
        let pool = ranker().rank(&job(), &resumes);
        for (i, c) in pool.candidates.iter().enumerate() {
            assert_eq!(c.rank, i + 1);
        }
        for pair in pool.candidates.windows(2) {
            assert!(pair[0].final_ranking_score >= pair[1].final_ranking_score);
        }
        assert_eq!(pool.candidates[0].candidate_name, "Ben");
    }

    #[test]
    fn test_ranking_is_repeatable() {
        let resumes = vec![
            resume("a.txt", "Ana", &["Python", "SQL"]),
            resume("b.txt", "Ben", &["Python", "SQL"]),
            resume("c.txt", "Cy", &["Docker"]),
        ];
        let first = ranker().rank(&job(), &resumes);
        let second = ranker().rank(&job(), &resumes);
        let scores = |pool: &RankingPool| {
            pool.candidates
                .iter()
                .map(|c| (c.file_name.clone(), c.final_ranking_score))
                .collect::<Vec<_>>()
        };
        assert_eq!(scores(&first), scores(&second));
        assert_ne!(first.run_id, second.run_id);
    }

    #[test]
    fn test_uniqueness_offset_range_and_stability() {
        let resume = resume("a.txt", "Ana", &["Python"]);
        let scorer = WeightedMatchScorer::new(&SkillVocabulary::default()).with_reference_year(2024);
        let result = scorer.score(&resume, &job()).unwrap();
        let offset = uniqueness_offset(&result);
        assert!((0.001..=0.009).contains(&offset));
        assert_eq!(offset, uniqueness_offset(&result.clone()));
    }

    struct FailingScorer;

    impl MatchScorer for FailingScorer {
        fn score(&self, _: &ExtractedResume, _: &JobRequirements) -> Result<MatchResult, MatchError> {
            Err(MatchError::NonFinite("overall_score"))
        }
    }

    struct PanickingScorer;

    impl MatchScorer for PanickingScorer {
        fn score(&self, _: &ExtractedResume, _: &JobRequirements) -> Result<MatchResult, MatchError> {
            panic!("scorer exploded")
        }
    }

    #[test]
    fn test_scorer_error_falls_back_to_basic() {
        let ranker = CandidateRanker::new(Arc::new(FailingScorer), None);
        let pool = ranker.rank(&job(), &[resume("a.txt", "Ana", &["Python"])]);
        let result = pool.candidates[0].match_result.as_ref().unwrap();
        assert_eq!(result.scoring_method, ScoringMethod::Basic);
        assert_eq!(result.recommendations, vec![BASIC_SCORING_NOTE.to_string()]);
        assert_eq!(pool.processing_errors, 1);
    }

    #[test]
    fn test_panic_is_contained_to_candidate() {
        let ranker = CandidateRanker::new(Arc::new(PanickingScorer), None);
        let pool = ranker.rank(
            &job(),
            &[resume("a.txt", "Ana", &["Python"]), resume("b.txt", "Ben", &[])],
        );
        assert_eq!(pool.total_candidates, 2);
        assert!(pool.candidates.iter().all(RankedCandidate::is_degraded));
        assert_eq!(pool.errors[0].error, "scorer exploded");
    }
}
