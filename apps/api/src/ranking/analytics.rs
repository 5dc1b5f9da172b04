//! Pool-level analytics over a ranked candidate list.

use std::collections::BTreeMap;

use crate::matching::scorer::round_to;
use crate::models::job::JobRequirements;
use crate::models::ranking::{
    RankedCandidate, RankingAnalysis, ScoreStatistics, SkillGap, SkillGapAnalysis, TopCandidate,
};

const LOW_AVERAGE_SCORE: f64 = 60.0;
const MIN_STRONG_CANDIDATES: usize = 3;
const LOW_COVERAGE: f64 = 0.3;

pub fn score_statistics(candidates: &[RankedCandidate]) -> ScoreStatistics {
    if candidates.is_empty() {
        return ScoreStatistics::default();
    }
    let scores = candidates.iter().map(|c| c.final_ranking_score);
    let highest = scores.clone().fold(f64::MIN, f64::max);
    let lowest = scores.clone().fold(f64::MAX, f64::min);
    let average = scores.sum::<f64>() / candidates.len() as f64;

    ScoreStatistics {
        highest_score: highest,
        lowest_score: lowest,
        average_score: round_to(average, 2),
        score_range: round_to(highest - lowest, 2),
    }
}

/// Candidate counts per match level key.
pub fn level_distribution(candidates: &[RankedCandidate]) -> BTreeMap<String, usize> {
    let mut distribution = BTreeMap::new();
    for candidate in candidates {
        *distribution
            .entry(candidate.match_level.key().to_string())
            .or_insert(0) += 1;
    }
    distribution
}

/// For each required skill, how many candidates lack it. Most common gaps
/// first; equal counts keep the skill order.
pub fn skill_gaps(candidates: &[RankedCandidate], job: &JobRequirements) -> SkillGapAnalysis {
    let pool = candidates.len();
    let mut skill_gaps: Vec<SkillGap> = job
        .required_skills
        .iter()
        .map(|skill| {
            let missing_count = candidates
                .iter()
                .filter(|c| !c.has_required_skill(skill))
                .count();
            let missing = if pool == 0 {
                0.0
            } else {
                missing_count as f64 / pool as f64 * 100.0
            };
            SkillGap {
                skill: skill.to_string(),
                missing_count,
                missing_percentage: round_to(missing, 1),
                coverage_percentage: if pool == 0 { 0.0 } else { round_to(100.0 - missing, 1) },
            }
        })
        .collect();
    skill_gaps.sort_by(|a, b| b.missing_count.cmp(&a.missing_count));
    SkillGapAnalysis { skill_gaps }
}

pub fn pool_recommendations(
    candidates: &[RankedCandidate],
    statistics: &ScoreStatistics,
    gaps: &SkillGapAnalysis,
) -> Vec<String> {
    if candidates.is_empty() {
        return vec!["No candidates found to analyze".to_string()];
    }

    let mut notes = Vec::new();
    if statistics.average_score < LOW_AVERAGE_SCORE {
        notes.push(
            "Consider expanding the candidate search or revising job requirements".to_string(),
        );
    }

    let strong = candidates.iter().filter(|c| c.match_level.is_strong()).count();
    if strong < MIN_STRONG_CANDIDATES {
        notes.push("Consider providing additional training for selected candidates".to_string());
    }

    let low_coverage: Vec<&str> = gaps
        .skill_gaps
        .iter()
        .filter(|g| g.coverage_percentage < LOW_COVERAGE * 100.0)
        .take(3)
        .map(|g| g.skill.as_str())
        .collect();
    if !low_coverage.is_empty() {
        notes.push(format!("Consider training in: {}", low_coverage.join(", ")));
    }
    notes
}

/// Full analysis of a pool that is already sorted by rank.
pub fn analyze_pool(candidates: &[RankedCandidate], job: &JobRequirements) -> RankingAnalysis {
    let score_statistics = score_statistics(candidates);
    let skill_gap_analysis = skill_gaps(candidates, job);
    let recommendations = pool_recommendations(candidates, &score_statistics, &skill_gap_analysis);

    RankingAnalysis {
        candidate_pool_size: candidates.len(),
        score_statistics,
        match_level_distribution: level_distribution(candidates),
        top_candidates: candidates
            .iter()
            .take(3)
            .map(|c| TopCandidate {
                rank: c.rank,
                candidate_name: c.candidate_name.clone(),
                file_name: c.file_name.clone(),
                final_ranking_score: c.final_ranking_score,
            })
            .collect(),
        skill_gap_analysis,
        recommendations,
    }
}
