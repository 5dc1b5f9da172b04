use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::job::JobSummary;
use crate::models::matching::{MatchLevel, MatchResult};
use crate::models::resume::ExtractedResume;

/// Secondary signals computed independently of the core match, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalScores {
    pub skill_diversity: f64,
    pub experience_quality: f64,
    pub education_level: f64,
    pub project_relevance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeSummary {
    pub total_skills: usize,
    pub top_skills: Vec<String>,
    pub experience_entries: usize,
    pub education_entries: usize,
    pub project_entries: usize,
    pub has_contact_info: bool,
}

impl From<&ExtractedResume> for ResumeSummary {
    fn from(resume: &ExtractedResume) -> Self {
        Self {
            total_skills: resume.skills.len(),
            top_skills: resume.skills.iter().take(5).map(String::from).collect(),
            experience_entries: resume.experience.len(),
            education_entries: resume.education.len(),
            project_entries: resume.projects.len(),
            has_contact_info: resume.contact_info.email.is_some(),
        }
    }
}

/// One candidate's place in a ranking pool.
///
/// `rank` and `percentile` are only meaningful inside the pool they were
/// assigned in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub rank: usize,
    pub percentile: f64,
    pub file_name: String,
    pub candidate_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub overall_match_score: f64,
    pub match_level: MatchLevel,
    pub final_ranking_score: f64,
    /// Absent for placeholder entries.
    pub match_result: Option<MatchResult>,
    pub additional_scores: Option<AdditionalScores>,
    pub resume_summary: ResumeSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RankedCandidate {
    pub fn required_match_count(&self) -> usize {
        self.match_result
            .as_ref()
            .map(MatchResult::required_match_count)
            .unwrap_or(0)
    }

    pub fn preferred_match_count(&self) -> usize {
        self.match_result
            .as_ref()
            .map(MatchResult::preferred_match_count)
            .unwrap_or(0)
    }

    /// Whether the candidate matched a required skill (case-insensitive).
    pub fn has_required_skill(&self, skill: &str) -> bool {
        self.match_result.as_ref().is_some_and(|m| {
            m.skill_analysis
                .required_matches
                .iter()
                .any(|s| s.eq_ignore_ascii_case(skill))
        })
    }

    pub fn is_degraded(&self) -> bool {
        self.match_level == MatchLevel::Degraded
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateError {
    pub file: String,
    pub error: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreStatistics {
    pub highest_score: f64,
    pub lowest_score: f64,
    pub average_score: f64,
    pub score_range: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill: String,
    pub missing_count: usize,
    pub missing_percentage: f64,
    pub coverage_percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGapAnalysis {
    /// Every required skill, most commonly missing first.
    pub skill_gaps: Vec<SkillGap>,
}

impl SkillGapAnalysis {
    pub fn most_common(&self, limit: usize) -> &[SkillGap] {
        &self.skill_gaps[..self.skill_gaps.len().min(limit)]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCandidate {
    pub rank: usize,
    pub candidate_name: String,
    pub file_name: String,
    pub final_ranking_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingAnalysis {
    pub candidate_pool_size: usize,
    pub score_statistics: ScoreStatistics,
    /// Keyed by `MatchLevel::key`.
    pub match_level_distribution: BTreeMap<String, usize>,
    pub top_candidates: Vec<TopCandidate>,
    pub skill_gap_analysis: SkillGapAnalysis,
    pub recommendations: Vec<String>,
}

/// Every candidate for one job, ordered by rank, plus pool-level aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingPool {
    pub success: bool,
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub total_candidates: usize,
    pub processing_errors: usize,
    #[serde(default)]
    pub errors: Vec<CandidateError>,
    pub job_description_summary: JobSummary,
    pub ranking_analysis: RankingAnalysis,
    pub candidates: Vec<RankedCandidate>,
}
