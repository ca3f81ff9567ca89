//! Textual cleanup of the assembled HTML.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// An ampersand, with the entity it starts if it is one the cleanup itself
/// emits or a numeric reference.
static AMPERSAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+;|#[xX][0-9a-fA-F]+;|(?:amp|nbsp|mdash|lt|gt|quot);)?").unwrap()
});
static EMPTY_LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<li></li>").unwrap());
static BLANK_STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<strong>\s*</strong>").unwrap());

/// Cleans up the HTML produced by a conversion.
///
/// Encodes bare ampersands and em-dashes, straightens smart quotes, turns
/// `&nbsp;` into spaces, removes empty list items and blank `<strong>` tags
/// and expands tabs to four spaces. Applying it twice yields the same output
/// as applying it once.
pub fn clean_output(html: &str) -> String {
    // Only the first pass can grow the text, so this settles.
    let mut current = clean_pass(html);
    loop {
        let next = clean_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_pass(html: &str) -> String {
    // Ampersands go first: later rules introduce entities of their own.
    let out = AMPERSAND.replace_all(html, |caps: &Captures| match caps.get(1) {
        Some(entity) => format!("&{}", entity.as_str()),
        None => "&amp;".to_owned(),
    });
    let out = out.replace('\u{2014}', "&mdash;");
    let out = out.replace('\u{2019}', "'");
    let out = out.replace(['\u{201c}', '\u{201d}'], "\"");
    let out = out.replace("&nbsp;", " ");
    let out = EMPTY_LIST_ITEM.replace_all(&out, "");
    let out = BLANK_STRONG.replace_all(&out, "");
    out.replace('\t', "    ")
}
