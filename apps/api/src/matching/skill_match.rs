//! Skill matching between a résumé skill set and job skill lists.
//!
//! A job skill is matched when any tier succeeds, in order: exact
//! case-insensitive membership, containment in either direction, then the
//! technology-family table below.

use std::collections::BTreeMap;

use crate::extraction::lexicon::contains_term;
use crate::models::job::JobRequirements;
use crate::models::matching::{CategoryScore, SkillAnalysis};
use crate::models::skills::SkillSet;

/// Names shorter than this only match as whole words, so "Go" stays out of
/// "Django" and "ai" out of "maintain".
const MIN_SUBSTRING_CHARS: usize = 3;

/// Case-insensitive containment of one skill name in another.
///
/// Plain substring for names of at least [`MIN_SUBSTRING_CHARS`], so "React"
/// is found in "ReactJS"; whole-word for anything shorter.
pub(crate) fn contains_skill(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return false;
    }
    if needle.chars().count() < MIN_SUBSTRING_CHARS {
        return contains_term(haystack, needle);
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Technology families: a skill naming the family matches a skill naming any
/// member, in either direction.
const SKILL_FAMILIES: &[(&str, &[&str])] = &[
    ("javascript", &["js", "node.js", "nodejs", "react", "angular", "vue"]),
    ("python", &["django", "flask", "fastapi", "pandas", "numpy"]),
    ("java", &["spring", "hibernate", "maven", "gradle"]),
    ("sql", &["mysql", "postgresql", "sqlite", "oracle", "database"]),
    ("aws", &["amazon web services", "ec2", "s3", "lambda", "cloud"]),
    ("docker", &["containerization", "containers"]),
    ("kubernetes", &["k8s", "container orchestration"]),
    (
        "machine learning",
        &["ml", "ai", "artificial intelligence", "tensorflow", "pytorch"],
    ),
    ("data analysis", &["data analytics", "analytics", "data science"]),
    ("git", &["version control", "github", "gitlab"]),
    ("agile", &["scrum", "kanban", "sprint"]),
    ("api", &["rest", "restful", "graphql", "microservices"]),
];

/// Whether two skill names belong to the same technology family.
pub fn is_family_match(a: &str, b: &str) -> bool {
    SKILL_FAMILIES.iter().any(|(family, members)| {
        (contains_skill(a, family) && members.iter().any(|m| contains_skill(b, m)))
            || (contains_skill(b, family) && members.iter().any(|m| contains_skill(a, m)))
    })
}

/// Tiers two and three for a single pair of names.
fn is_fuzzy_match(job_skill: &str, resume_skill: &str) -> bool {
    contains_skill(resume_skill, job_skill)
        || contains_skill(job_skill, resume_skill)
        || is_family_match(job_skill, resume_skill)
}

/// Whether the résumé covers `job_skill` under any tier.
pub fn resume_has_skill(resume_skills: &SkillSet, job_skill: &str) -> bool {
    resume_skills.contains(job_skill)
        || resume_skills
            .keys()
            .any(|resume_skill| is_fuzzy_match(job_skill, resume_skill))
}

/// `(matched, missing)` for one job skill list, in the set's sorted order.
fn partition(resume_skills: &SkillSet, job_skills: &SkillSet) -> (Vec<String>, Vec<String>) {
    job_skills
        .iter()
        .map(String::from)
        .partition(|skill| resume_has_skill(resume_skills, skill))
}

/// Fraction matched, or 1.0 when the job lists nothing.
fn coverage(matched: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        matched as f64 / total as f64
    }
}

fn in_category(skill: &str, category_skills: &[String]) -> bool {
    category_skills
        .iter()
        .any(|c| contains_skill(skill, c) || contains_skill(c, skill))
}

/// Per-category coverage, reported only for categories the job touches.
pub fn category_scores(
    resume_skills: &SkillSet,
    job_skills: &SkillSet,
    categories: &BTreeMap<String, Vec<String>>,
) -> BTreeMap<String, CategoryScore> {
    let mut scores = BTreeMap::new();

    for (category, category_skills) in categories {
        let job_in_category: Vec<&str> = job_skills
            .iter()
            .filter(|s| in_category(s, category_skills))
            .collect();
        if job_in_category.is_empty() {
            continue;
        }
        let resume_in_category: Vec<&str> = resume_skills
            .keys()
            .filter(|s| in_category(s, category_skills))
            .collect();

        let matches: Vec<String> = job_in_category
            .iter()
            .filter(|job_skill| {
                resume_in_category
                    .iter()
                    .any(|r| contains_skill(r, job_skill) || contains_skill(job_skill, r))
            })
            .map(|s| s.to_string())
            .collect();

        scores.insert(
            category.clone(),
            CategoryScore {
                score: matches.len() as f64 / job_in_category.len() as f64,
                total_required: job_in_category.len(),
                total_matched: matches.len(),
                matches,
            },
        );
    }
    scores
}

/// Required and preferred coverage with per-category detail.
pub fn analyze_skills(
    resume_skills: &SkillSet,
    job: &JobRequirements,
    categories: Option<&BTreeMap<String, Vec<String>>>,
) -> SkillAnalysis {
    let (required_matches, missing_required) = partition(resume_skills, &job.required_skills);
    let (preferred_matches, missing_preferred) = partition(resume_skills, &job.preferred_skills);

    let required_score = coverage(required_matches.len(), job.required_skills.len());
    let preferred_score = coverage(preferred_matches.len(), job.preferred_skills.len());

    let category_scores = categories
        .map(|c| {
            let job_skills = job.required_skills.union(&job.preferred_skills);
            category_scores(resume_skills, &job_skills, c)
        })
        .unwrap_or_default();

    tracing::debug!(
        required = %format!("{}/{}", required_matches.len(), job.required_skills.len()),
        preferred = %format!("{}/{}", preferred_matches.len(), job.preferred_skills.len()),
        "Skill coverage"
    );

    SkillAnalysis {
        required_score,
        preferred_score,
        required_matches,
        preferred_matches,
        missing_required,
        missing_preferred,
        category_scores,
        total_skill_score: required_score * 0.8 + preferred_score * 0.2,
    }
}
