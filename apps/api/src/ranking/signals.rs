//! Secondary ranking signals computed independently of the core match.

use std::collections::BTreeMap;

use crate::extraction::lexicon::{contains_any, contains_term};
use crate::matching::skill_match::contains_skill;
use crate::models::job::JobRequirements;
use crate::models::ranking::AdditionalScores;
use crate::models::resume::ExtractedResume;
use crate::models::skills::SkillSet;

const ACTION_VERBS: &[&str] = &[
    "led", "managed", "developed", "designed", "implemented", "created", "improved",
    "optimized", "launched", "delivered", "architected", "built", "established",
    "coordinated", "supervised", "mentored", "collaborated", "executed", "achieved",
    "enhanced", "streamlined",
];

const SENIORITY_WORDS: &[&str] = &["senior", "lead", "principal", "architect", "manager", "director", "head"];

const OUTCOME_WORDS: &[&str] = &["increased", "reduced", "improved", "saved", "generated", "boosted"];

const TECHNICAL_MARKERS: &[&str] = &["python", "java", "javascript", "react", "sql", "aws", "docker", "kubernetes"];

const SOFT_MARKERS: &[&str] = &["leadership", "communication", "teamwork", "problem solving", "management"];

const DOCTORATE_MARKERS: &[&str] = &["phd", "ph.d", "doctorate", "doctoral"];
const MASTER_MARKERS: &[&str] = &["master", "mba", "m.s", "m.a", "m.tech"];
const BACHELOR_MARKERS: &[&str] = &["bachelor", "b.s", "b.a", "b.tech", "b.e"];
const CREDENTIAL_MARKERS: &[&str] = &["degree", "diploma", "certificate", "graduation"];
const DEGREE_COUNT_MARKERS: &[&str] = &["degree", "bachelor", "master", "phd"];

const RELEVANT_FIELDS: &[&str] = &[
    "computer science", "engineering", "technology", "software", "information technology",
];

const COMPLEXITY_WORDS: &[&str] = &[
    "architecture", "scalability", "performance", "optimization", "integration", "deployment",
];

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn count_terms(text: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|t| contains_term(text, t)).count()
}

/// Share of skill categories represented in the résumé. Without categories,
/// a unique-skill count plus a technical/soft mix bonus.
pub fn skill_diversity(skills: &SkillSet, categories: Option<&BTreeMap<String, Vec<String>>>) -> f64 {
    match categories {
        Some(categories) if !categories.is_empty() => {
            let covered = categories
                .values()
                .filter(|category_skills| {
                    skills.keys().any(|skill| {
                        category_skills
                            .iter()
                            .any(|c| contains_skill(skill, c) || contains_skill(c, skill))
                    })
                })
                .count();
            covered as f64 / categories.len() as f64
        }
        _ => {
            let base = (skills.len() as f64 / 15.0).min(1.0);
            let mixed = skills
                .keys()
                .filter(|s| contains_any(s, TECHNICAL_MARKERS) || contains_any(s, SOFT_MARKERS))
                .count();
            (base + (mixed as f64 / 10.0).min(0.3)).min(1.0)
        }
    }
}

/// Action verbs plus bonuses for entry count, detail, seniority and outcomes.
pub fn experience_quality(experience: &[String]) -> f64 {
    let text = experience.join(" ").to_lowercase();

    let verbs = count_terms(&text, ACTION_VERBS) as f64 / ACTION_VERBS.len() as f64;
    let entries_bonus = (experience.len() as f64 / 4.0).min(0.25);
    let detail_bonus = (word_count(&text) as f64 / 300.0).min(0.15);
    let seniority_bonus = count_terms(&text, SENIORITY_WORDS) as f64 * 0.02;
    let outcome_bonus = count_terms(&text, OUTCOME_WORDS) as f64 * 0.01;

    (verbs + entries_bonus + detail_bonus + seniority_bonus + outcome_bonus).min(1.0)
}

/// Highest degree tier found, plus small field and multi-degree bonuses.
pub fn education_level(education: &[String]) -> f64 {
    let text = education.join(" ").to_lowercase();

    let mut level = if contains_any(&text, DOCTORATE_MARKERS) {
        1.0
    } else if contains_any(&text, MASTER_MARKERS) {
        0.8
    } else if contains_any(&text, BACHELOR_MARKERS) {
        0.6
    } else if contains_any(&text, CREDENTIAL_MARKERS) {
        0.4
    } else {
        0.1
    };

    if contains_any(&text, RELEVANT_FIELDS) {
        level += 0.1;
    }
    let degree_mentions: usize = DEGREE_COUNT_MARKERS
        .iter()
        .map(|m| text.matches(m).count())
        .sum();
    if degree_mentions > 1 {
        level += 0.1;
    }
    f64::min(level, 1.0)
}

/// Whether a job skill shows up in project text, whole or as part of a word.
fn project_mentions(projects_text: &str, skill: &str) -> bool {
    if contains_term(projects_text, skill) {
        return true;
    }
    let skill = skill.to_lowercase();
    projects_text
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| w.chars().count() >= 4)
        .any(|w| w.contains(skill.as_str()) || skill.contains(w))
}

/// Job-skill coverage in projects plus count, detail and complexity bonuses.
/// Reduced credit when either side is empty.
pub fn project_relevance(projects: &[String], job_skills: &[String]) -> f64 {
    if projects.is_empty() {
        return 0.1;
    }
    if job_skills.is_empty() {
        let count_bonus = (projects.len() as f64 / 5.0).min(0.4);
        let chars: usize = projects.iter().map(|p| p.chars().count()).sum();
        let content_bonus = (chars as f64 / 200.0).min(0.2);
        return (0.3 + count_bonus + content_bonus).min(1.0);
    }

    let text = projects.join(" ").to_lowercase();
    let mentioned = job_skills
        .iter()
        .filter(|skill| project_mentions(&text, skill))
        .count();

    let coverage = mentioned as f64 / job_skills.len() as f64;
    let count_bonus = (projects.len() as f64 / 2.5).min(0.15);
    let detail_bonus = (word_count(&text) as f64 / 150.0).min(0.08);
    let complexity_bonus = count_terms(&text, COMPLEXITY_WORDS) as f64 * 0.01;

    (coverage + count_bonus + detail_bonus + complexity_bonus).min(1.0)
}

pub fn additional_scores(
    resume: &ExtractedResume,
    job: &JobRequirements,
    categories: Option<&BTreeMap<String, Vec<String>>>,
) -> AdditionalScores {
    AdditionalScores {
        skill_diversity: skill_diversity(&resume.skills, categories),
        experience_quality: experience_quality(&resume.experience),
        education_level: education_level(&resume.education),
        project_relevance: project_relevance(&resume.projects, &job.all_skills()),
    }
}
