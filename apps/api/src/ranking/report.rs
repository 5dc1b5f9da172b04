//! Persistence of ranking pools as JSON and as a plain-text report.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use uuid::Uuid;

use crate::models::ranking::RankingPool;

const RULE_WIDTH: usize = 80;
const SECTION_RULE_WIDTH: usize = 50;
const REPORT_CANDIDATES: usize = 5;
const REPORT_GAPS: usize = 5;

/// Files written for one persisted ranking run.
#[derive(Debug, Clone, Serialize)]
pub struct PersistedRanking {
    pub json_path: PathBuf,
    pub report_path: PathBuf,
}

pub fn save_json(pool: &RankingPool, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(pool).context("Failed to serialize ranking pool")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write ranking results to {}", path.display()))
}

pub fn load_json(path: &Path) -> Result<RankingPool> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read ranking results from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid ranking results JSON in {}", path.display()))
}

/// Human-readable report: summary, top candidates, skill gaps, recommendations.
pub fn render_text_report(pool: &RankingPool) -> String {
    let analysis = &pool.ranking_analysis;
    let stats = &analysis.score_statistics;
    let rule = "=".repeat(RULE_WIDTH);
    let section_rule = "-".repeat(SECTION_RULE_WIDTH);

    let mut lines = vec![
        rule.clone(),
        "CANDIDATE RANKING REPORT".to_string(),
        rule.clone(),
        String::new(),
        format!("Total Candidates Processed: {}", pool.total_candidates),
        format!("Processing Errors: {}", pool.processing_errors),
        format!("Average Score: {}%", stats.average_score),
        format!("Highest Score: {}%", stats.highest_score),
        String::new(),
        "TOP CANDIDATES:".to_string(),
        section_rule.clone(),
    ];

    for candidate in pool.candidates.iter().take(REPORT_CANDIDATES) {
        lines.extend([
            format!(
                "{}. {} ({})",
                candidate.rank, candidate.candidate_name, candidate.file_name
            ),
            format!(
                "   Score: {}% ({})",
                candidate.final_ranking_score, candidate.match_level
            ),
            format!("   Email: {}", candidate.email.as_deref().unwrap_or("N/A")),
            format!("   LinkedIn: {}", candidate.linkedin.as_deref().unwrap_or("N/A")),
            format!("   Skills: {}", candidate.resume_summary.top_skills.join(", ")),
            String::new(),
        ]);
    }

    let gaps = analysis.skill_gap_analysis.most_common(REPORT_GAPS);
    if !gaps.is_empty() {
        lines.push("SKILL GAP ANALYSIS:".to_string());
        lines.push(section_rule.clone());
        lines.extend(gaps.iter().map(|gap| {
            format!(
                "- {}: Missing in {}% of candidates",
                gap.skill, gap.missing_percentage
            )
        }));
        lines.push(String::new());
    }

    if !analysis.recommendations.is_empty() {
        lines.push("RECOMMENDATIONS:".to_string());
        lines.push(section_rule);
        lines.extend(analysis.recommendations.iter().map(|note| format!("- {note}")));
        lines.push(String::new());
    }

    lines.push(rule);
    lines.join("\n")
}

pub fn save_report(pool: &RankingPool, path: &Path) -> Result<()> {
    fs::write(path, render_text_report(pool))
        .with_context(|| format!("Failed to write ranking report to {}", path.display()))
}

/// Where `persist` writes the JSON for run `run_id`.
pub fn ranking_json_path(dir: &Path, run_id: Uuid) -> PathBuf {
    dir.join(format!("ranking_{run_id}.json"))
}

/// Writes `ranking_<run_id>.json` and `ranking_<run_id>.txt` into `dir`.
pub fn persist(pool: &RankingPool, dir: &Path) -> Result<PersistedRanking> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create results directory {}", dir.display()))?;

    let json_path = ranking_json_path(dir, pool.run_id);
    let report_path = json_path.with_extension("txt");

    save_json(pool, &json_path)?;
    save_report(pool, &report_path)?;
    tracing::info!(path = %json_path.display(), "Saved ranking results");

    Ok(PersistedRanking {
        json_path,
        report_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::extraction::vocabulary::SkillVocabulary;
    use crate::matching::scorer::WeightedMatchScorer;
    use crate::models::job::JobRequirements;
    use crate::models::resume::ExtractedResume;
    use crate::ranking::ranker::CandidateRanker;

    fn sample_pool() -> RankingPool {
        let vocabulary = SkillVocabulary::default();
        let scorer = WeightedMatchScorer::new(&vocabulary).with_reference_year(2024);
        let ranker = CandidateRanker::new(Arc::new(scorer), vocabulary.categories().cloned());
        let job = JobRequirements {
            required_skills: ["Python", "SQL"].into_iter().collect(),
            ..JobRequirements::default()
        };
        let resumes = vec![
            ExtractedResume {
                source: "ana.txt".to_string(),
                name: Some("Ana Silva".to_string()),
                skills: ["Python", "SQL"].into_iter().collect(),
                ..ExtractedResume::default()
            },
            ExtractedResume {
                source: "ben.txt".to_string(),
                name: Some("Ben Okafor".to_string()),
                skills: ["Excel"].into_iter().collect(),
                ..ExtractedResume::default()
            },
            ExtractedResume::failed("bad.pdf", "No text could be extracted from the document"),
        ];
        ranker.rank(&job, &resumes)
    }

    #[test]
    fn test_json_round_trip_preserves_order_and_scores() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.json");
        let pool = sample_pool();
        save_json(&pool, &path).unwrap();
        let loaded = load_json(&path).unwrap();
        assert_eq!(loaded, pool);
    }

    #[test]
    fn test_persisted_json_has_required_keys() {
        let json = serde_json::to_value(sample_pool()).unwrap();
        for key in [
            "success",
            "total_candidates",
            "processing_errors",
            "candidates",
            "job_description_summary",
            "ranking_analysis",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        let analysis = &json["ranking_analysis"];
        for key in ["score_statistics", "match_level_distribution", "skill_gap_analysis", "recommendations"] {
            assert!(analysis.get(key).is_some(), "missing ranking_analysis.{key}");
        }
    }

    #[test]
    fn test_report_section_order() {
        let report = render_text_report(&sample_pool());
        let summary = report.find("Total Candidates Processed: 3").unwrap();
        let top = report.find("TOP CANDIDATES:").unwrap();
        let gaps = report.find("SKILL GAP ANALYSIS:").unwrap();
        let notes = report.find("RECOMMENDATIONS:").unwrap();
        assert!(summary < top && top < gaps && gaps < notes);
        assert!(report.contains("1. Ana Silva (ana.txt)"));
        assert!(report.starts_with(&"=".repeat(RULE_WIDTH)));
        assert!(report.ends_with(&"=".repeat(RULE_WIDTH)));
        let notes_header = format!("RECOMMENDATIONS:\n{}\n- ", "-".repeat(SECTION_RULE_WIDTH));
        assert!(report.contains(&notes_header));
    }

    #[test]
    fn test_persist_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let pool = sample_pool();
        let written = persist(&pool, &dir.path().join("results")).unwrap();
        assert!(written.json_path.exists());
        assert!(written.report_path.exists());
        assert_eq!(written.json_path, ranking_json_path(&dir.path().join("results"), pool.run_id));
        assert_eq!(load_json(&written.json_path).unwrap().run_id, pool.run_id);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_json(&dir.path().join("absent.json")).is_err());
    }
}
