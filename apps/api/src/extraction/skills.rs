//! Skill detection: vocabulary phrases, containment, and technology patterns.

use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::analyzer::TextAnalyzer;
use crate::extraction::lexicon::STOP_WORDS;
use crate::extraction::vocabulary::SkillVocabulary;
use crate::models::skills::SkillSet;

// ──────────────────────────────────────────────────────────────
// Technology patterns for skills outside the vocabulary
// ──────────────────────────────────────────────────────────────

static FILE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\w+\.(?:js|py|java|cpp|cs)\b").expect("FILE_EXTENSION: compile-time constant")
});

static CAMEL_CASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-z0-9]+(?:[A-Z][A-Za-z0-9]*)+\b").expect("CAMEL_CASE: compile-time constant")
});

static TECH_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\w+(?:DB|SQL|API|SDK|IDE|CLI|GUI|REST|JSON|XML|HTML|CSS|UI|UX)\b")
        .expect("TECH_SUFFIX: compile-time constant")
});

const TECH_FRAGMENTS: &[&str] = &["js", "py", "sql", "api", "db"];

/// Union of three passes over the text, cleaned of one-letter and stop-word hits.
pub fn extract_skills(
    text: &str,
    vocabulary: &SkillVocabulary,
    analyzer: &dyn TextAnalyzer,
) -> SkillSet {
    let mut skills = SkillSet::new();

    for skill in phrase_matches(text, vocabulary, analyzer)
        .into_iter()
        .chain(containment_matches(text, vocabulary))
        .chain(pattern_matches(text, vocabulary))
    {
        if keep_skill(&skill) {
            skills.insert(skill);
        }
    }

    tracing::debug!(count = skills.len(), "Extracted skills");
    skills
}

/// Pass (a): vocabulary phrases appearing as consecutive tokens.
fn phrase_matches(
    text: &str,
    vocabulary: &SkillVocabulary,
    analyzer: &dyn TextAnalyzer,
) -> Vec<String> {
    let tokens: Vec<String> = analyzer
        .tokenize(text)
        .into_iter()
        .map(|t| t.to_lowercase())
        .collect();

    vocabulary
        .skills()
        .iter()
        .filter(|skill| {
            let phrase: Vec<String> = analyzer
                .tokenize(skill)
                .into_iter()
                .map(|t| t.to_lowercase())
                .collect();
            !phrase.is_empty() && tokens.windows(phrase.len()).any(|w| w == phrase.as_slice())
        })
        .cloned()
        .collect()
}

/// Pass (b): vocabulary terms longer than two characters that are a whole
/// word, or sit inside a word longer than three characters.
fn containment_matches(text: &str, vocabulary: &SkillVocabulary) -> Vec<String> {
    let text_lower = text.to_lowercase();
    let words: Vec<&str> = text_lower.split_whitespace().collect();

    vocabulary
        .skills()
        .iter()
        .filter(|skill| {
            let term = skill.to_lowercase();
            term.chars().count() > 2
                && text_lower.contains(&term)
                && words
                    .iter()
                    .any(|w| *w == term || (w.chars().count() > 3 && w.contains(&term)))
        })
        .cloned()
        .collect()
}

/// Pass (c): file-extension, CamelCase and technology-suffix tokens.
fn pattern_matches(text: &str, vocabulary: &SkillVocabulary) -> Vec<String> {
    let hits = FILE_EXTENSION
        .find_iter(text)
        .chain(CAMEL_CASE.find_iter(text))
        .chain(TECH_SUFFIX.find_iter(text))
        .map(|m| m.as_str());

    let mut found = Vec::new();
    for hit in hits {
        if hit.chars().count() <= 2 {
            continue;
        }
        let lower = hit.to_lowercase();
        let technical = hit.chars().any(char::is_uppercase)
            || TECH_FRAGMENTS.iter().any(|f| lower.contains(f));
        if !technical {
            continue;
        }
        let name = vocabulary.canonical(hit).unwrap_or(hit);
        found.push(name.to_string());
    }
    found
}

fn keep_skill(skill: &str) -> bool {
    let skill = skill.trim();
    skill.chars().count() > 1 && !STOP_WORDS.contains(&skill.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::analyzer::RuleBasedAnalyzer;

    fn skills_of(text: &str) -> Vec<String> {
        extract_skills(text, &SkillVocabulary::default(), &RuleBasedAnalyzer).to_vec()
    }

    #[test]
    fn test_vocabulary_phrases_use_canonical_casing() {
        let skills = skills_of("Proficient in python, sql and machine learning with node.js");
        for expected in ["Python", "SQL", "Machine Learning", "Node.js"] {
            assert!(skills.contains(&expected.to_string()), "missing {expected}: {skills:?}");
        }
    }

    #[test]
    fn test_symbol_skills_match_as_tokens() {
        let skills = skills_of("Languages: C++, C#");
        assert!(skills.contains(&"C++".to_string()));
        assert!(skills.contains(&"C#".to_string()));
    }

    #[test]
    fn test_containment_inside_longer_word() {
        // "docker" sits inside the word "dockerized".
        let skills = skills_of("Shipped dockerized services");
        assert!(skills.contains(&"Docker".to_string()));
    }

    #[test]
    fn test_technology_patterns_outside_vocabulary() {
        let skills = skills_of("Built with TypeScript, GraphQL and DynamoDB; entry point main.py");
        for expected in ["TypeScript", "GraphQL", "DynamoDB", "main.py"] {
            assert!(skills.contains(&expected.to_string()), "missing {expected}: {skills:?}");
        }
    }

    #[test]
    fn test_single_letter_and_plain_words_dropped() {
        let skills = skills_of("I know R and the basics");
        assert!(!skills.contains(&"R".to_string()));
        assert!(!skills.iter().any(|s| s.eq_ignore_ascii_case("the")));
    }

    #[test]
    fn test_output_is_sorted_and_unique() {
        let skills = skills_of("Python python PYTHON Docker docker");
        assert_eq!(skills, vec!["Docker".to_string(), "Python".to_string()]);
    }

    #[test]
    fn test_empty_text() {
        assert!(skills_of("").is_empty());
    }
}
