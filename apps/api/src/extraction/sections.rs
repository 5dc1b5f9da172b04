//! Section boundaries and entry splitting for education, experience and projects.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::lexicon::{PROJECT_INDICATORS, PROJECT_TITLE_WORDS};

static EDUCATION_ENTRY_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:",
        r"(?i:bachelor|master|phd|doctorate|diploma|certificate|university|college|institute",
        r"|of (?:technology|science|arts|engineering)|c?gpa\b|coursework|relevant courses)",
        r"|\d{4}\b",
        r"|[A-Z][a-z]+(?: [A-Z][a-z]+)* ?, ?[A-Z][a-z]+",
        r")",
    ))
    .expect("EDUCATION_ENTRY_START: compile-time constant")
});

static EXPERIENCE_ENTRY_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:",
        r"\d{4} ?[-–] ?(?i:present|\d{4})",
        r"|[A-Z][a-z]+(?: [A-Z][a-z]+)* ?\| ?[A-Z][a-z]+",
        r"|(?i:founder|lead developer|backend developer|software engineer|manager|analyst|specialist",
        r"|associate|intern|consultant|engineer|developer|architect|director|president|ceo|cto|vp",
        r"|company|organization|employer)\b",
        r")",
    ))
    .expect("EXPERIENCE_ENTRY_START: compile-time constant")
});

fn keyword_alternation(keywords: &[&str]) -> String {
    let mut sorted = keywords.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()));
    sorted
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|")
}

/// Header patterns, most specific first: a line holding only the header,
/// then a header with a colon at the end of a line.
fn header_patterns(keywords: &[&str]) -> Vec<Regex> {
    if keywords.is_empty() {
        return Vec::new();
    }
    let alternation = keyword_alternation(keywords);
    [
        format!(r"(?im)^[ \t]*(?:{alternation})[ \t]*:?[ \t]*$"),
        format!(r"(?im)\b(?:{alternation})[ \t]*:[ \t]*$"),
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
}

fn first_header(text: &str, patterns: &[Regex]) -> Option<(usize, usize)> {
    patterns
        .iter()
        .find_map(|p| p.find(text))
        .map(|m| (m.start(), m.end()))
}

/// Text between the first `section_keywords` header and the next
/// `next_section_keywords` header (or the end). Empty if the header is absent.
pub fn extract_section(
    text: &str,
    section_keywords: &[&str],
    next_section_keywords: &[&str],
) -> String {
    let Some((_, start)) = first_header(text, &header_patterns(section_keywords)) else {
        return String::new();
    };
    let rest = text[start..].trim();

    match first_header(rest, &header_patterns(next_section_keywords)) {
        Some((end, _)) => rest[..end].trim().to_string(),
        None => rest.to_string(),
    }
}

/// Every line containing one of the indicator keywords, used when a résumé
/// has no explicit section header.
pub fn indicator_lines(text: &str, indicators: &[&str]) -> String {
    text.lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            indicators.iter().any(|k| lower.contains(k))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// All section keywords except the section's own, used as end markers.
pub fn next_section_keywords<'a>(all: &[&'a str], own: &[&str]) -> Vec<&'a str> {
    all.iter().filter(|k| !own.contains(k)).copied().collect()
}

fn split_entries(section_text: &str, entry_start: &Regex) -> Vec<String> {
    let mut entries = BTreeSet::new();
    let mut current: Vec<&str> = Vec::new();

    for line in section_text.trim().lines() {
        if entry_start.is_match(line.trim()) && !current.is_empty() {
            push_entry(&mut entries, &current);
            current.clear();
        }
        current.push(line);
    }
    push_entry(&mut entries, &current);

    entries.into_iter().collect()
}

fn push_entry(entries: &mut BTreeSet<String>, lines: &[&str]) {
    let entry = lines.join("\n").trim().to_string();
    if !entry.is_empty() {
        entries.insert(entry);
    }
}

/// Splits on lines opening with a degree, institution, year, "City, State",
/// GPA or coursework marker. Entries come back deduplicated and sorted.
pub fn parse_education_entries(section_text: &str) -> Vec<String> {
    split_entries(section_text, &EDUCATION_ENTRY_START)
}

/// Splits on lines opening with a date range, "Title | Company", or a job title.
pub fn parse_experience_entries(section_text: &str) -> Vec<String> {
    split_entries(section_text, &EXPERIENCE_ENTRY_START)
}

/// Groups project-like lines into blocks. A line ending in `:` or naming a
/// project, platform or application starts a new block.
pub fn extract_projects(normalized_text: &str) -> Vec<String> {
    let mut projects = Vec::new();
    let mut current = String::new();

    let project_lines = normalized_text.lines().map(str::trim).filter(|line| {
        let lower = line.to_lowercase();
        line.chars().count() > 10 && PROJECT_INDICATORS.iter().any(|k| lower.contains(k))
    });

    for line in project_lines {
        let lower = line.to_lowercase();
        let starts_block =
            line.ends_with(':') || PROJECT_TITLE_WORDS.iter().any(|w| lower.contains(w));
        if starts_block {
            if !current.is_empty() {
                projects.push(std::mem::take(&mut current));
            }
            current = line.to_string();
        } else if current.is_empty() {
            current = line.to_string();
        } else {
            current.push(' ');
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        projects.push(current);
    }
    projects
}
