//! Document normalizer producing canonical line structure for section detection.
//!
//! Every output line is trimmed and single-spaced, bullets start their own
//! line as `• `, known section headers sit alone on a line ending in `:`,
//! and there is never more than one blank line in a row. The transform is
//! idempotent.

use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::lexicon::NORMALIZED_SECTION_HEADERS;

/// Glyphs rewritten to the canonical `• ` marker.
const BULLET_GLYPHS: &[char] = &['•', '·', '▪', '▫', '▬', '─', '◦', '‣', '●', '■'];

const BULLET: &str = "•";

/// Header alternation, longest first so multi-word headers win.
fn header_alternation() -> String {
    let mut headers = NORMALIZED_SECTION_HEADERS.to_vec();
    headers.sort_by(|a, b| b.len().cmp(&a.len()));
    headers
        .iter()
        .map(|h| regex::escape(h))
        .collect::<Vec<_>>()
        .join("|")
}

/// A known header followed by a colon anywhere in a line.
static HEADER_COLON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b({})[ \t]*:", header_alternation()))
        .expect("HEADER_COLON: built from constant header list")
});

/// A known header closing a line with no colon after it.
static HEADER_LINE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b({})[ \t]*$", header_alternation()))
        .expect("HEADER_LINE_END: built from constant header list")
});

/// Full normalization used by every extractor.
pub fn normalize(raw: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    for line in unify_line_endings(raw).split('\n') {
        let line = collapse_whitespace(line);
        if line.is_empty() {
            lines.push(String::new());
            continue;
        }
        for piece in split_bullets(&line) {
            split_headers(&piece, &mut lines);
        }
    }

    join_collapsing_blanks(lines)
}

/// Line endings and whitespace only; headers and bullets are left in place.
///
/// Used where a heading must stay attached to the text on its line.
pub fn canonical_lines(raw: &str) -> String {
    let lines = unify_line_endings(raw)
        .split('\n')
        .map(collapse_whitespace)
        .collect();
    join_collapsing_blanks(lines)
}

fn unify_line_endings(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

/// Collapses every run of whitespace (including non-breaking and other
/// unicode spaces) to one ASCII space and trims the ends.
fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn split_bullets(line: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    for (i, part) in line.split(BULLET_GLYPHS).enumerate() {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if i == 0 {
            pieces.push(part.to_string());
        } else {
            pieces.push(format!("{BULLET} {part}"));
        }
    }
    pieces
}

fn split_headers(piece: &str, out: &mut Vec<String>) {
    let mut last = 0;
    for caps in HEADER_COLON.captures_iter(piece) {
        let (Some(whole), Some(header)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_segment(out, &piece[last..whole.start()]);
        out.push(format!("{}:", header.as_str()));
        last = whole.end();
    }
    push_segment(out, &piece[last..]);
}

fn push_segment(out: &mut Vec<String>, segment: &str) {
    let segment = segment.trim();
    if segment.is_empty() || segment == BULLET {
        return;
    }
    if is_bare_header(segment) {
        out.push(format!("{segment}:"));
        return;
    }
    match HEADER_LINE_END.captures(segment).and_then(|caps| caps.get(1)) {
        Some(header) => {
            push_segment(out, &segment[..header.start()]);
            out.push(format!("{}:", header.as_str()));
        }
        None => out.push(segment.to_string()),
    }
}

fn is_bare_header(segment: &str) -> bool {
    NORMALIZED_SECTION_HEADERS
        .iter()
        .any(|h| h.eq_ignore_ascii_case(segment))
}

fn join_collapsing_blanks(lines: Vec<String>) -> String {
    let mut kept: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        let blank = line.is_empty();
        if blank && kept.last().map_or(true, |prev| prev.is_empty()) {
            continue;
        }
        kept.push(line);
    }
    while kept.last().is_some_and(|l| l.is_empty()) {
        kept.pop();
    }
    kept.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "   \n\n  \r\n",
        "Jane Doe\r\nSkills: Python, SQL • Docker ▪ Git\r\n\r\n\r\nExperience\nDeveloper at Acme",
        "SUMMARY  builder of things.   Work Experience: Intern at X · Engineer at Y",
        "• • •\n•\n· lone bullet",
        "Education:\n\n\nB.Tech, Some University\u{a0}\u{a0}2019\tCGPA 8.5",
        "Career Objective: grow. Objective: grow more. skills :rust",
        "Projects\r• Built a platform: fast\r\rContact",
        "Executive Summary: text Professional Experience",
        "Jane Doe Skills\nPython, Rust\nWork Experience\nAcme",
        "Summary Skills\nBuilt things • Projects",
    ];

    #[test]
    fn test_normalize_is_idempotent() {
        for sample in SAMPLES {
            let once = normalize(sample);
            let twice = normalize(&once);
            assert_eq!(once, twice, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_canonical_lines_is_idempotent() {
        for sample in SAMPLES {
            let once = canonical_lines(sample);
            assert_eq!(once, canonical_lines(&once));
        }
    }

    #[test]
    fn test_headers_forced_onto_own_line() {
        let out = normalize("Jane Doe Skills: Python, SQL Education: BSc");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec!["Jane Doe", "Skills:", "Python, SQL", "Education:", "BSc"]);
    }

    #[test]
    fn test_bare_header_line_gets_colon() {
        let out = normalize("Experience\nDeveloper at Acme");
        assert_eq!(out, "Experience:\nDeveloper at Acme");
    }

    #[test]
    fn test_header_ending_a_line_is_split_off() {
        let out = normalize("Jane Doe Skills\nPython, Rust\nWork Experience\nAcme");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec!["Jane Doe", "Skills:", "Python, Rust", "Work Experience:", "Acme"]
        );
        assert_eq!(normalize(&out), out);
    }

    #[test]
    fn test_stacked_trailing_headers_each_get_a_line() {
        assert_eq!(normalize("Summary Skills"), "Summary:\nSkills:");
    }

    #[test]
    fn test_multi_word_header_preferred_over_substring() {
        let out = normalize("Work Experience: Intern");
        assert_eq!(out, "Work Experience:\nIntern");
    }

    #[test]
    fn test_bullets_become_canonical_markers() {
        let out = normalize("Tools • Docker ▪ Git");
        assert_eq!(out, "Tools\n• Docker\n• Git");
    }

    #[test]
    fn test_blank_runs_collapse_and_ends_trim() {
        let out = normalize("\n\n  a  \r\n\r\n\r\n\r\n b \n\n");
        assert_eq!(out, "a\n\nb");
    }

    #[test]
    fn test_unicode_spaces_collapse() {
        assert_eq!(normalize("a\u{a0}\u{2003} b\t\tc"), "a b c");
    }

    #[test]
    fn test_canonical_lines_keeps_headings_inline() {
        let out = canonical_lines("Required Skills:  Python\r\n\r\n\r\nNice to have: Go");
        assert_eq!(out, "Required Skills: Python\n\nNice to have: Go");
    }
}
