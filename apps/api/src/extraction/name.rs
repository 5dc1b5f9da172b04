//! Candidate name detection from the top of a résumé.

use crate::extraction::analyzer::TextAnalyzer;
use crate::extraction::lexicon::{MAJOR_SECTION_KEYWORDS, NAME_EXCLUSION_KEYWORDS};
use crate::extraction::vocabulary::SkillVocabulary;

/// Header words that disqualify a line in the last-resort check.
const RELAXED_EXCLUSIONS: &[&str] = &["summary", "skills", "experience", "education", "profile", "contact"];

/// Best-effort name. Tried in order: a strict check on the first three raw
/// lines, person names in the first five normalized lines, then a relaxed
/// check on the first raw line. Never invents a name.
pub fn extract_name(
    raw_text: &str,
    normalized_text: &str,
    analyzer: &dyn TextAnalyzer,
    vocabulary: &SkillVocabulary,
) -> Option<String> {
    let raw_lines: Vec<String> = raw_text
        .lines()
        .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|l| !l.is_empty())
        .collect();

    if let Some(name) = raw_lines.iter().take(3).find(|l| is_strict_name(l)) {
        return Some(name.clone());
    }

    let from_entities = normalized_text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(5)
        .flat_map(|line| analyzer.person_names(line))
        .find(|candidate| is_entity_name(candidate, vocabulary));
    if from_entities.is_some() {
        return from_entities;
    }

    raw_lines
        .first()
        .filter(|l| is_relaxed_name(l))
        .cloned()
}

fn has_digit_or_at(line: &str) -> bool {
    line.chars().any(|c| c.is_ascii_digit() || c == '@')
}

fn word_count_ok(line: &str) -> bool {
    (2..=5).contains(&line.split_whitespace().count())
}

/// 2–5 capitalized words, no digits or `@`, no header or excluded keyword.
fn is_strict_name(line: &str) -> bool {
    let lower = line.to_lowercase();
    word_count_ok(line)
        && !has_digit_or_at(line)
        && line
            .split_whitespace()
            .all(|w| w.chars().next().is_some_and(char::is_uppercase))
        && !NAME_EXCLUSION_KEYWORDS.iter().any(|k| lower.contains(k))
        && line.split_whitespace().any(|w| w.chars().count() >= 2)
}

fn is_entity_name(candidate: &str, vocabulary: &SkillVocabulary) -> bool {
    let lower = candidate.to_lowercase();
    word_count_ok(candidate)
        && !has_digit_or_at(candidate)
        && !MAJOR_SECTION_KEYWORDS.contains(&lower.as_str())
        && !vocabulary.contains(candidate)
}

fn is_relaxed_name(line: &str) -> bool {
    let lower = line.to_lowercase();
    word_count_ok(line)
        && !has_digit_or_at(line)
        && !RELAXED_EXCLUSIONS.iter().any(|k| lower.contains(k))
}
