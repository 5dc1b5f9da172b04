//! Required vs preferred classification of job-description skills.

use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::lexicon::{contains_term, PREFERRED_INDICATORS, REQUIRED_INDICATORS};
use crate::models::skills::SkillSet;

static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.!?](?:\s+|$)").expect("SENTENCE_END: compile-time constant")
});

/// Sentences of one line, split after `.`, `!` or `?` followed by whitespace
/// or the end of the line. Dots inside tokens such as `Node.js` do not split.
pub(crate) fn split_sentences(line: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut last = 0;
    for m in SENTENCE_END.find_iter(line) {
        push_sentence(&mut sentences, &line[last..m.start()]);
        last = m.end();
    }
    push_sentence(&mut sentences, &line[last..]);
    sentences
}

fn push_sentence<'a>(sentences: &mut Vec<&'a str>, sentence: &'a str) {
    let sentence = sentence.trim();
    if !sentence.is_empty() {
        sentences.push(sentence);
    }
}

/// A sentence with the heading it sits under.
struct Context<'a> {
    sentence: &'a str,
    framing: String,
}

/// Sentences of line-canonicalized text. A line ending in `:` becomes the
/// heading for every following sentence until the next such line.
fn contexts(text: &str) -> Vec<Context<'_>> {
    let mut heading = String::new();
    let mut out = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.ends_with(':') {
            heading = line.to_lowercase();
        }
        for sentence in split_sentences(line) {
            out.push(Context {
                sentence,
                framing: format!("{heading} {}", sentence.to_lowercase()),
            });
        }
    }
    out
}

fn mentions_any(framing: &str, indicators: &[&str]) -> bool {
    indicators.iter().any(|i| contains_term(framing, i))
}

/// Splits `skills` into `(required, preferred)`.
///
/// A skill is required when any sentence mentioning it carries a required
/// indicator, preferred when only preferred indicators appear, and required
/// when no indicator appears at all. The two sets never overlap.
pub fn categorize_requirements_priority(text: &str, skills: &SkillSet) -> (SkillSet, SkillSet) {
    let contexts = contexts(text);
    let mut required = SkillSet::new();
    let mut preferred = SkillSet::new();

    for skill in skills.iter() {
        let mut is_required = false;
        let mut is_preferred = false;

        for ctx in contexts.iter().filter(|c| contains_term(c.sentence, skill)) {
            if mentions_any(&ctx.framing, REQUIRED_INDICATORS) {
                is_required = true;
            } else if mentions_any(&ctx.framing, PREFERRED_INDICATORS) {
                is_preferred = true;
            }
        }

        if is_preferred && !is_required {
            preferred.insert(skill);
        } else {
            required.insert(skill);
        }
    }

    tracing::debug!(
        required = required.len(),
        preferred = preferred.len(),
        "Categorized job skills"
    );
    (required, preferred)
}
