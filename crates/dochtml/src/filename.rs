//! Filename cleanup for extracted assets and the HTML attachment.

use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9\s.\-]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static WORD_EXTENSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.docx?").unwrap());

/// Turns a display name into a lowercase, hyphenated filename stem.
///
/// Keeps `a-z`, `0-9`, `.` and `-`, turns every whitespace run into a single
/// hyphen and drops `.doc`/`.docx` wherever they appear.
pub fn sanitize_filename(name: &str) -> String {
    let name = name.to_lowercase();
    let name = DISALLOWED.replace_all(&name, "");
    let name = WHITESPACE.replace_all(&name, "-");
    WORD_EXTENSION.replace_all(&name, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(sanitize_filename("My Report"), "my-report");
        assert_eq!(sanitize_filename("Chart A"), "chart-a");
        assert_eq!(sanitize_filename("Q3  results\tdraft"), "q3-results-draft");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(sanitize_filename("Budget (v2): final!"), "budget-v2-final");
        assert_eq!(sanitize_filename("Résumé"), "rsum");
        assert_eq!(sanitize_filename("a_b&c"), "abc");
    }

    #[test]
    fn drops_word_extensions() {
        assert_eq!(sanitize_filename("Notes.docx"), "notes");
        assert_eq!(sanitize_filename("Old Notes.DOC"), "old-notes");
        assert_eq!(sanitize_filename("v1.2 plan"), "v1.2-plan");
    }
}
