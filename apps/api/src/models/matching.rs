use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Categorical label for a numeric score.
///
/// Two threshold sets exist and both are kept: the raw match score uses
/// 0.85/0.70/0.55/0.40 on the 0–1 scale, the blended ranking score uses
/// 80/60/40/20 on the 0–100 scale. `Degraded` marks placeholder entries for
/// candidates whose processing failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchLevel {
    Excellent,
    Good,
    Moderate,
    Fair,
    Poor,
    Degraded,
}

impl MatchLevel {
    /// Level for a raw match score on the 0–1 scale.
    pub fn from_match_score(score: f64) -> Self {
        match score {
            s if s >= 0.85 => MatchLevel::Excellent,
            s if s >= 0.70 => MatchLevel::Good,
            s if s >= 0.55 => MatchLevel::Moderate,
            s if s >= 0.40 => MatchLevel::Fair,
            _ => MatchLevel::Poor,
        }
    }

    /// Level for a blended ranking score on the 0–100 scale.
    pub fn from_ranking_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => MatchLevel::Excellent,
            s if s >= 60.0 => MatchLevel::Good,
            s if s >= 40.0 => MatchLevel::Moderate,
            s if s >= 20.0 => MatchLevel::Fair,
            _ => MatchLevel::Poor,
        }
    }

    pub fn is_strong(self) -> bool {
        matches!(self, MatchLevel::Excellent | MatchLevel::Good)
    }

    /// Stable key used in serialized distributions.
    pub fn key(self) -> &'static str {
        match self {
            MatchLevel::Excellent => "excellent",
            MatchLevel::Good => "good",
            MatchLevel::Moderate => "moderate",
            MatchLevel::Fair => "fair",
            MatchLevel::Poor => "poor",
            MatchLevel::Degraded => "degraded",
        }
    }
}

impl fmt::Display for MatchLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchLevel::Excellent => "Excellent Match",
            MatchLevel::Good => "Good Match",
            MatchLevel::Moderate => "Moderate Match",
            MatchLevel::Fair => "Fair Match",
            MatchLevel::Poor => "Poor Match",
            MatchLevel::Degraded => "Processing Error",
        };
        f.write_str(label)
    }
}

/// Which scorer produced a result, kept for transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMethod {
    Weighted,
    Basic,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: f64,
    pub matches: Vec<String>,
    pub total_required: usize,
    pub total_matched: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillAnalysis {
    pub required_score: f64,
    pub preferred_score: f64,
    pub required_matches: Vec<String>,
    pub preferred_matches: Vec<String>,
    pub missing_required: Vec<String>,
    pub missing_preferred: Vec<String>,
    #[serde(default)]
    pub category_scores: BTreeMap<String, CategoryScore>,
    /// 0.8 × required + 0.2 × preferred.
    pub total_skill_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceAnalysis {
    /// Years summed over date ranges found in experience entries.
    pub resume_years: u32,
    pub required_years: Option<u32>,
    pub meets_year_requirement: bool,
    pub technology_matches: Vec<String>,
    pub score: f64,
}

impl ExperienceAnalysis {
    pub fn requirement_stated(&self) -> bool {
        self.required_years.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationAnalysis {
    /// The résumé's education text names a degree.
    pub degree_match: bool,
    pub field_match: bool,
    pub matches: Vec<String>,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectAnalysis {
    pub score: f64,
    pub relevant_projects: usize,
    pub skill_mentions: Vec<String>,
}

/// Result of scoring one résumé against one job. Every field is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Percentage in [0, 100], rounded to two decimals.
    pub overall_score: f64,
    pub match_level: MatchLevel,
    pub skill_analysis: SkillAnalysis,
    pub experience_analysis: ExperienceAnalysis,
    pub education_analysis: EducationAnalysis,
    pub project_analysis: ProjectAnalysis,
    pub content_diversity: f64,
    pub recommendations: Vec<String>,
    pub scoring_method: ScoringMethod,
}

impl MatchResult {
    pub fn required_match_count(&self) -> usize {
        self.skill_analysis.required_matches.len()
    }

    pub fn preferred_match_count(&self) -> usize {
        self.skill_analysis.preferred_matches.len()
    }
}
