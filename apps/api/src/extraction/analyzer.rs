//! Text-analysis service injected into the résumé and job parsers.

use std::sync::LazyLock;

use regex::Regex;

/// Tokenization and person-name detection.
///
/// Owned by the engine and passed to parsers as `Arc<dyn TextAnalyzer>`, so a
/// different implementation can be swapped in without touching extraction.
pub trait TextAnalyzer: Send + Sync {
    /// Splits text into word tokens, keeping technology punctuation such as
    /// `C++`, `C#`, `Node.js` and `CI/CD` inside a token.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Candidate person names found in the text, in order of appearance.
    fn person_names(&self, text: &str) -> Vec<String>;
}

/// Token: starts with a letter or digit, may contain `+ # . / -` inside, and
/// ends with a letter, digit, `+` or `#`.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}](?:[\p{L}\p{N}+#./\-]*[\p{L}\p{N}+#])?")
        .expect("TOKEN: compile-time constant")
});

/// Heuristic analyzer: capitalized word runs as person names.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedAnalyzer;

impl RuleBasedAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl TextAnalyzer for RuleBasedAnalyzer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        TOKEN
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    fn person_names(&self, text: &str) -> Vec<String> {
        let mut names = Vec::new();
        let mut run: Vec<&str> = Vec::new();

        for raw in text.split_whitespace() {
            let word = raw.trim_end_matches([',', ';', ':', '.', '|']);
            let ends_phrase = word.len() != raw.len();

            if is_name_word(word) {
                run.push(word);
                if ends_phrase {
                    flush_run(&mut run, &mut names);
                }
            } else {
                flush_run(&mut run, &mut names);
            }
        }
        flush_run(&mut run, &mut names);
        names
    }
}

/// `Jane`, `O'Neil`, `Smith-Jones`, or an all-caps `DOE`.
fn is_name_word(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_uppercase() || word.chars().count() < 2 {
        return false;
    }
    let rest: Vec<char> = chars.collect();
    let all_lower = rest
        .iter()
        .all(|c| c.is_lowercase() || matches!(c, '\'' | '’' | '-'));
    let all_upper = rest.iter().all(|c| c.is_uppercase());
    all_lower || all_upper
}

fn flush_run(run: &mut Vec<&str>, names: &mut Vec<String>) {
    if (2..=5).contains(&run.len()) {
        names.push(run.join(" "));
    }
    run.clear();
}
