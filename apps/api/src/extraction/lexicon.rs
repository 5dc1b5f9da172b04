//! Fixed word lists shared by the résumé and job-description extractors.

/// Headers the normalizer forces onto their own line.
pub const NORMALIZED_SECTION_HEADERS: &[&str] = &[
    "Summary",
    "Skills",
    "Experience",
    "Work Experience",
    "Professional Experience",
    "Education",
    "Academic Background",
    "Projects",
    "Awards",
    "Certifications",
    "Contact",
    "About",
    "Profile",
    "Objective",
    "Career Objective",
];

/// Every header keyword that can open a résumé section.
pub const MAJOR_SECTION_KEYWORDS: &[&str] = &[
    "summary",
    "profile",
    "skills",
    "experience",
    "work experience",
    "professional experience",
    "employment history",
    "career history",
    "education",
    "academic qualifications",
    "qualification",
    "qualifications",
    "academic background",
    "degrees",
    "projects",
    "awards",
    "publications",
    "certifications",
    "contact",
];

pub const EDUCATION_SECTION_KEYWORDS: &[&str] = &[
    "education",
    "academic qualifications",
    "qualification",
    "qualifications",
    "academic background",
    "degrees",
];

pub const EXPERIENCE_SECTION_KEYWORDS: &[&str] = &[
    "experience",
    "work experience",
    "professional experience",
    "employment history",
    "career history",
];

/// Lines containing these stand in for a missing education section.
pub const EDUCATION_INDICATORS: &[&str] = &[
    "university",
    "college",
    "bachelor",
    "master",
    "degree",
    "phd",
    "diploma",
    "institute",
    "academic",
    "graduation",
    "graduated",
];

/// Lines containing these stand in for a missing experience section.
pub const EXPERIENCE_INDICATORS: &[&str] = &[
    "intern",
    "developer",
    "engineer",
    "analyst",
    "manager",
    "founded",
    "worked",
    "company",
    "organization",
    "employed",
    "position",
    "role",
];

pub const PROJECT_INDICATORS: &[&str] = &[
    "project",
    "developed",
    "built",
    "created",
    "designed",
    "implemented",
    "platform",
];

/// Words that mark a line as the title of a new project.
pub const PROJECT_TITLE_WORDS: &[&str] = &["project", "platform", "application"];

/// A line containing any of these is never taken as a candidate's name.
pub const NAME_EXCLUSION_KEYWORDS: &[&str] = &[
    "summary",
    "skills",
    "experience",
    "education",
    "profile",
    "contact",
    "docker",
    "problem",
    "soft",
];

pub const REQUIRED_INDICATORS: &[&str] = &["required", "must", "essential", "mandatory", "critical"];

pub const PREFERRED_INDICATORS: &[&str] = &["preferred", "nice to have", "bonus", "plus", "desired"];

pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

/// Whether `needle` occurs in `haystack` without being glued to a letter or
/// digit on either side. Both arguments are compared case-insensitively.
///
/// Unlike a regex `\b`, this works for terms ending in symbols such as `C++`.
pub fn contains_term(haystack: &str, needle: &str) -> bool {
    let haystack = haystack.to_lowercase();
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }
    let mut from = 0;
    while let Some(offset) = haystack[from..].find(&needle) {
        let start = from + offset;
        let end = start + needle.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        from = start + needle.chars().next().map_or(1, char::len_utf8);
    }
    false
}

/// Whether any keyword is a plain substring of the lowercased text.
pub fn contains_any(text_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text_lower.contains(k))
}
