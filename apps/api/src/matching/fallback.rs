//! Basic scoring used when the weighted scorer cannot produce a result.

use crate::models::job::JobRequirements;
use crate::models::matching::{
    EducationAnalysis, ExperienceAnalysis, MatchLevel, MatchResult, ProjectAnalysis,
    ScoringMethod, SkillAnalysis,
};
use crate::models::resume::ExtractedResume;
use crate::models::skills::SkillSet;

use super::scorer::round_to;

pub const BASIC_SCORING_NOTE: &str = "Basic scoring used - advanced analysis not available";

/// Exact-match partition; basic scoring does not use fuzzy tiers.
fn exact_partition(resume_skills: &SkillSet, job_skills: &SkillSet) -> (Vec<String>, Vec<String>) {
    job_skills
        .iter()
        .map(String::from)
        .partition(|skill| resume_skills.contains(skill))
}

/// Fraction of `total` matched. An empty list earns no credit here, unlike
/// weighted coverage where nothing required counts as fully covered.
fn share(matched: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        matched as f64 / total as f64
    }
}

/// Percentage score: 50 for required coverage, 20 for preferred coverage and
/// up to 30 for having a name, an email, experience, education and skills.
pub fn basic_score(resume: &ExtractedResume, job: &JobRequirements) -> f64 {
    let (required, _) = exact_partition(&resume.skills, &job.required_skills);
    let (preferred, _) = exact_partition(&resume.skills, &job.preferred_skills);

    let mut score = share(required.len(), job.required_skills.len()) * 50.0
        + share(preferred.len(), job.preferred_skills.len()) * 20.0;

    let content = [
        (resume.name.is_some(), 5.0),
        (resume.contact_info.email.is_some(), 5.0),
        (!resume.experience.is_empty(), 10.0),
        (!resume.education.is_empty(), 5.0),
        (!resume.skills.is_empty(), 5.0),
    ];
    score += content
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, points)| points)
        .sum::<f64>();

    round_to(score.min(100.0), 1)
}

/// A complete `MatchResult` built from basic scoring. The level uses the
/// ranking-scale thresholds and the recommendations carry the basic marker.
pub fn basic_match(resume: &ExtractedResume, job: &JobRequirements) -> MatchResult {
    let overall_score = basic_score(resume, job);
    let (required_matches, missing_required) = exact_partition(&resume.skills, &job.required_skills);
    let (preferred_matches, missing_preferred) =
        exact_partition(&resume.skills, &job.preferred_skills);

    let required_score = share(required_matches.len(), job.required_skills.len());
    let preferred_score = share(preferred_matches.len(), job.preferred_skills.len());

    MatchResult {
        overall_score,
        match_level: MatchLevel::from_ranking_score(overall_score),
        skill_analysis: SkillAnalysis {
            required_score,
            preferred_score,
            required_matches,
            preferred_matches,
            missing_required,
            missing_preferred,
            category_scores: Default::default(),
            total_skill_score: required_score * 0.8 + preferred_score * 0.2,
        },
        experience_analysis: ExperienceAnalysis {
            meets_year_requirement: !resume.experience.is_empty(),
            ..ExperienceAnalysis::default()
        },
        education_analysis: EducationAnalysis {
            degree_match: !resume.education.is_empty(),
            ..EducationAnalysis::default()
        },
        project_analysis: ProjectAnalysis {
            relevant_projects: resume.projects.len(),
            ..ProjectAnalysis::default()
        },
        content_diversity: 0.0,
        recommendations: vec![BASIC_SCORING_NOTE.to_string()],
        scoring_method: ScoringMethod::Basic,
    }
}
