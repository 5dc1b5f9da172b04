//! Match scoring: pluggable, trait-based scorer measuring a parsed résumé
//! against parsed job requirements.
//!
//! Default: `WeightedMatchScorer` (pure-Rust, deterministic, fully testable).
//! Callers hold an `Arc<dyn MatchScorer>` and fall back to basic scoring
//! when `score` returns an error.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;

use crate::errors::MatchError;
use crate::extraction::lexicon::{contains_any, contains_term};
use crate::extraction::vocabulary::SkillVocabulary;
use crate::matching::skill_match::analyze_skills;
use crate::models::job::{EducationRequirements, ExperienceRequirements, JobRequirements};
use crate::models::matching::{
    EducationAnalysis, ExperienceAnalysis, MatchLevel, MatchResult, ProjectAnalysis,
    ScoringMethod, SkillAnalysis,
};
use crate::models::resume::ExtractedResume;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The match scorer trait. Implement this to swap scoring backends without
/// touching the ranker, engine or handlers.
pub trait MatchScorer: Send + Sync {
    fn score(
        &self,
        resume: &ExtractedResume,
        job: &JobRequirements,
    ) -> Result<MatchResult, MatchError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Weights
// ────────────────────────────────────────────────────────────────────────────

/// Component weights of the overall match score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchWeights {
    pub required_skills: f64,
    pub preferred_skills: f64,
    pub experience: f64,
    pub education: f64,
    pub projects: f64,
    pub content_diversity: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            required_skills: 0.40,
            preferred_skills: 0.15,
            experience: 0.25,
            education: 0.10,
            projects: 0.10,
            content_diversity: 0.05,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WeightedMatchScorer
// ────────────────────────────────────────────────────────────────────────────

/// Weighted five-component scorer with a small content-diversity adjustment.
///
/// Algorithm:
/// 1. Skill coverage (required, preferred) via exact, containment and
///    technology-family tiers
/// 2. Experience: year requirement met (0.7) + technology mentions (0.3)
/// 3. Education: degree keyword (0.6) + field of study (0.4)
/// 4. Projects: share of job skills named in project text (0.5 if unknown)
/// 5. overall = Σ(component × weight) + diversity × 0.05, clamped to [0, 1]
#[derive(Debug, Clone)]
pub struct WeightedMatchScorer {
    weights: MatchWeights,
    reference_year: i32,
    categories: Option<BTreeMap<String, Vec<String>>>,
}

impl WeightedMatchScorer {
    pub fn new(vocabulary: &SkillVocabulary) -> Self {
        Self {
            weights: MatchWeights::default(),
            reference_year: chrono::Utc::now().year(),
            categories: vocabulary.categories().cloned(),
        }
    }

    #[cfg(test)]
    pub fn with_weights(mut self, weights: MatchWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Year used as the end of "Present" and "Current" date ranges.
    #[cfg(test)]
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }
}

impl MatchScorer for WeightedMatchScorer {
    fn score(
        &self,
        resume: &ExtractedResume,
        job: &JobRequirements,
    ) -> Result<MatchResult, MatchError> {
        if let Some(error) = &resume.error {
            return Err(MatchError::ResumeUnavailable(error.clone()));
        }

        let skill_analysis = analyze_skills(&resume.skills, job, self.categories.as_ref());
        let experience_analysis = analyze_experience(
            &resume.experience,
            &job.experience_requirements,
            self.reference_year,
        );
        let education_analysis = analyze_education(&resume.education, &job.education_requirements);
        let project_analysis = analyze_projects(&resume.projects, &job.all_skills());
        let content_diversity = content_diversity(resume);

        let w = &self.weights;
        let raw = skill_analysis.required_score * w.required_skills
            + skill_analysis.preferred_score * w.preferred_skills
            + experience_analysis.score * w.experience
            + education_analysis.score * w.education
            + project_analysis.score * w.projects
            + content_diversity * w.content_diversity;
        if !raw.is_finite() {
            return Err(MatchError::NonFinite("overall_score"));
        }

        let overall_score = round_to(raw.clamp(0.0, 1.0) * 100.0, 2);
        let recommendations =
            recommendations(&skill_analysis, &experience_analysis, &education_analysis);

        tracing::debug!(
            source = %resume.source,
            overall_score,
            "Scored resume against job"
        );

        Ok(MatchResult {
            overall_score,
            match_level: MatchLevel::from_match_score(overall_score / 100.0),
            skill_analysis,
            experience_analysis,
            education_analysis,
            project_analysis,
            content_diversity,
            recommendations,
            scoring_method: ScoringMethod::Weighted,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Components
// ────────────────────────────────────────────────────────────────────────────

static YEAR_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{4})\s*[-–]\s*(\d{4}|present|current)\b")
        .expect("YEAR_SPAN: compile-time constant")
});

const DEGREE_KEYWORDS: &[&str] = &["bachelor", "master", "phd", "doctorate", "degree"];

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Total years across `YYYY - YYYY` and `YYYY - Present` ranges. Backwards
/// ranges are ignored.
pub fn resume_years(experience: &[String], reference_year: i32) -> u32 {
    experience
        .iter()
        .flat_map(|entry| YEAR_SPAN.captures_iter(entry))
        .filter_map(|caps| {
            let start: i32 = caps[1].parse().ok()?;
            let end: i32 = caps[2].parse().unwrap_or(reference_year);
            u32::try_from(end - start).ok()
        })
        .sum()
}

pub fn analyze_experience(
    experience: &[String],
    requirements: &ExperienceRequirements,
    reference_year: i32,
) -> ExperienceAnalysis {
    let resume_years = resume_years(experience, reference_year);
    let required_years = requirements.minimum_years();
    let meets_year_requirement = required_years.is_some_and(|min| resume_years >= min);

    let mut score = if required_years.is_none() || meets_year_requirement {
        0.7
    } else {
        0.0
    };

    let experience_text = experience.join(" ");
    let technology_matches: Vec<String> = requirements
        .technology_experience
        .iter()
        .filter(|tech| contains_term(&experience_text, tech))
        .map(String::from)
        .collect();

    let wanted = requirements.technology_experience.len();
    score += if wanted == 0 {
        0.3
    } else {
        0.3 * technology_matches.len() as f64 / wanted as f64
    };

    ExperienceAnalysis {
        resume_years,
        required_years,
        meets_year_requirement,
        technology_matches,
        score: score.min(1.0),
    }
}

pub fn analyze_education(
    education: &[String],
    requirements: &EducationRequirements,
) -> EducationAnalysis {
    let education_text = education.join(" ").to_lowercase();
    let degree_match = contains_any(&education_text, DEGREE_KEYWORDS);

    let mut score = 0.0;
    if requirements.degree_requirements.is_empty() || degree_match {
        score += 0.6;
    }

    let matches: Vec<String> = requirements
        .fields_of_study
        .iter()
        .filter(|field| contains_term(&education_text, field))
        .cloned()
        .collect();
    let field_match = !matches.is_empty();
    if requirements.fields_of_study.is_empty() || field_match {
        score += 0.4;
    }

    EducationAnalysis {
        degree_match,
        field_match,
        matches,
        score: f64::min(score, 1.0),
    }
}

pub fn analyze_projects(projects: &[String], job_skills: &[String]) -> ProjectAnalysis {
    if projects.is_empty() || job_skills.is_empty() {
        return ProjectAnalysis {
            score: 0.5,
            relevant_projects: 0,
            skill_mentions: Vec::new(),
        };
    }

    let projects_text = projects.join(" ");
    let skill_mentions: Vec<String> = job_skills
        .iter()
        .filter(|skill| contains_term(&projects_text, skill))
        .cloned()
        .collect();
    let relevant_projects = projects
        .iter()
        .filter(|p| skill_mentions.iter().any(|s| contains_term(p, s)))
        .count();

    ProjectAnalysis {
        score: (skill_mentions.len() as f64 / job_skills.len() as f64).min(1.0),
        relevant_projects,
        skill_mentions,
    }
}

/// Small content-volume signal in [0, 0.25] separating otherwise similar résumés.
pub fn content_diversity(resume: &ExtractedResume) -> f64 {
    let contact = &resume.contact_info;
    let contact_bonus = [
        contact.email.is_some(),
        contact.phone.is_some(),
        contact.linkedin.is_some(),
    ]
    .iter()
    .filter(|&&present| present)
    .count() as f64
        * 0.05;

    let factor = (resume.skills.len() as f64 / 20.0).min(0.3)
        + (resume.experience.len() as f64 / 10.0).min(0.2)
        + (resume.education.len() as f64 / 5.0).min(0.1)
        + (resume.projects.len() as f64 / 5.0).min(0.15)
        + contact_bonus;
    factor.min(0.25)
}

/// Improvement notes, each added only when its condition holds, in fixed order.
pub fn recommendations(
    skills: &SkillAnalysis,
    experience: &ExperienceAnalysis,
    education: &EducationAnalysis,
) -> Vec<String> {
    let mut notes = Vec::new();

    if !skills.missing_required.is_empty() {
        let top: Vec<&str> = skills
            .missing_required
            .iter()
            .take(3)
            .map(String::as_str)
            .collect();
        notes.push(format!(
            "Consider learning these required skills: {}",
            top.join(", ")
        ));
    }
    if skills.required_score < 0.7 {
        notes.push("Focus on developing more of the required technical skills".to_string());
    }
    if experience.requirement_stated() && !experience.meets_year_requirement {
        notes.push("Gain more relevant work experience in the field".to_string());
    }
    // Only a partial technology showing earns the note; none at all is left to the score.
    let technologies = experience.technology_matches.len();
    if technologies > 0 && technologies < 2 {
        notes.push("Highlight more technology-specific experience in your resume".to_string());
    }
    if !education.degree_match {
        notes.push("Consider pursuing relevant educational qualifications".to_string());
    }
    notes
}
