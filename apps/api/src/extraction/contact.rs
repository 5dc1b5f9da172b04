//! Contact details: email, phone, LinkedIn, GitHub and other links.
//!
//! Each pattern is a [`PatternRule`] evaluated in a fixed priority order.
//! Results from all rules are unioned and deduplicated explicitly, so the
//! first hit of the highest-priority rule wins.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::resume::ContactInfo;

/// One regular expression and the capture group it yields.
pub struct PatternRule {
    pub name: &'static str,
    regex: Regex,
    group: usize,
}

impl PatternRule {
    fn new(name: &'static str, pattern: &str, group: usize) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("contact rule: compile-time constant"),
            group,
        }
    }

    /// Every match in the text, in order of appearance.
    pub fn find_all(&self, text: &str) -> Vec<String> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(self.group))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// First match in the text.
    pub fn find_first(&self, text: &str) -> Option<String> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(self.group))
            .map(|m| m.as_str().to_string())
    }
}

static EMAIL_RULE: LazyLock<PatternRule> = LazyLock::new(|| {
    PatternRule::new("email", r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}", 0)
});

/// Phone formats, highest priority first. Separators never cross a line.
pub static PHONE_RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    vec![
        PatternRule::new("indian_spaced", r"\+91[ \t-]*\d{4}[ \t]+\d{3}[ \t]+\d{3}\b", 0),
        PatternRule::new(
            "international",
            r"\+\d{1,3}[-. ]?\(?\d{2,5}\)?[-. ]?\d{3,5}[-. ]?\d{3,6}\b",
            0,
        ),
        PatternRule::new("us_separated", r"\(?\b\d{3}\)?[-. ]\d{3}[-. ]\d{4}\b", 0),
        PatternRule::new("indian_mobile", r"\b[6-9]\d{9}\b", 0),
        PatternRule::new("ten_digit", r"\b\d{10}\b", 0),
        PatternRule::new("general", r"\b\d{3,4}[-. /]\d{3,4}[-. /]\d{4,6}\b", 0),
    ]
});

/// Link formats, highest priority first.
pub static URL_RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    vec![
        PatternRule::new(
            "http",
            r"https?://(?:www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b[-a-zA-Z0-9()@:%_+.~#?&/=]*",
            0,
        ),
        PatternRule::new(
            "www",
            r"\bwww\.[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b[-a-zA-Z0-9()@:%_+.~#?&/=]*",
            0,
        ),
        PatternRule::new("linkedin", r"(?i)\blinkedin\.com/in/[-a-zA-Z0-9_%]+", 0),
        PatternRule::new("github", r"(?i)\bgithub\.com/[-a-zA-Z0-9_]+", 0),
    ]
});

/// Broken LinkedIn snippets that only carry the handle.
static LINKEDIN_HANDLE_RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    vec![
        PatternRule::new("glyph_handle", r"/♀([A-Za-z0-9_-]{3,})", 1),
        PatternRule::new(
            "labelled_handle",
            r"(?im)\blinkedin[ \t]*:[ \t]*([A-Za-z0-9_-]{3,})[ \t]*(?:$|[|,;⋄])",
            1,
        ),
    ]
});

const HANDLE_STOP_WORDS: &[&str] = &["linkedin", "www", "com", "gmail", "http", "https"];

/// Every contact field is best-effort; absent fields stay `None`.
pub fn extract_contact_info(text: &str) -> ContactInfo {
    let email = EMAIL_RULE.find_first(text);
    let phone = phone_candidates(text).into_iter().next();
    let urls = url_candidates(text);

    let linkedin = urls.iter().find(|u| u.to_lowercase().contains("linkedin.com")).cloned();
    let github = urls.iter().find(|u| u.to_lowercase().contains("github.com")).cloned();
    let other_urls = urls
        .iter()
        .filter(|u| {
            let lower = u.to_lowercase();
            !lower.contains("linkedin.com") && !lower.contains("github.com")
        })
        .cloned()
        .collect();

    ContactInfo {
        email,
        phone,
        linkedin,
        github,
        other_urls,
    }
}

/// Phone numbers in priority order, 7–15 digits, unique by digit sequence.
pub fn phone_candidates(text: &str) -> Vec<String> {
    let mut seen_digits: Vec<String> = Vec::new();
    let mut phones = Vec::new();

    for rule in PHONE_RULES.iter() {
        for hit in rule.find_all(text) {
            let digits: String = hit.chars().filter(char::is_ascii_digit).collect();
            if !(7..=15).contains(&digits.len()) || seen_digits.contains(&digits) {
                continue;
            }
            tracing::debug!(rule = rule.name, "Phone candidate matched");
            seen_digits.push(digits);
            phones.push(hit.split_whitespace().collect::<Vec<_>>().join(" "));
        }
    }
    phones
}

/// Links in priority order; a link contained in (or containing) an earlier
/// one is dropped.
pub fn url_candidates(text: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();

    let direct = URL_RULES.iter().flat_map(|rule| rule.find_all(text));
    let handles = LINKEDIN_HANDLE_RULES
        .iter()
        .flat_map(|rule| rule.find_all(text))
        .filter(|h| !HANDLE_STOP_WORDS.contains(&h.to_lowercase().as_str()))
        .map(|h| format!("linkedin.com/in/{h}"));

    for url in direct.chain(handles) {
        let url = url.trim_end_matches(['.', ',', ';', ':', ')']).to_string();
        if url.is_empty() {
            continue;
        }
        let lower = url.to_lowercase();
        let overlaps = urls.iter().any(|existing| {
            let existing = existing.to_lowercase();
            existing.contains(&lower) || lower.contains(&existing)
        });
        if !overlaps {
            urls.push(url);
        }
    }
    urls
}
