//! Textual cleanup of scraped prerequisite text
//!
//! Pure string massaging ahead of the requirement parser: markup, unit
//! counts, footnote asterisks and irregular whitespace are removed so that
//! the only structure left is codes joined by `and` / `or`.

use regex::Regex;
use std::sync::LazyLock;

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>|border[^>]*>").expect("tag pattern is valid"));

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^()]*)\)").expect("parenthetical pattern is valid"));

static CODE_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]{2,}\s*\d").expect("code-like pattern is valid"));

/// A conjunction glued between two codes, e.g. `15andECE` from joined schedule boxes
static GLUED_CONJUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9A-Z])(and|or)([A-Z])").expect("conjunction pattern is valid")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Strip markup and formatting noise from raw prerequisite text
///
/// Parentheticals that mention a course code keep their contents (only the
/// brackets go); all other parentheticals, such as unit counts or
/// `(C- or better)`, are dropped whole.
#[must_use]
pub fn clean_prerequisite_text(raw: &str) -> String {
    let text = raw.replace("&nbsp;", " ");
    let text = TAG.replace_all(&text, " ");

    let mut text = text.into_owned();
    // Innermost first, so nested brackets unwind one level per pass.
    while PARENTHETICAL.is_match(&text) {
        text = PARENTHETICAL
            .replace_all(&text, |caps: &regex::Captures| {
                let inner = &caps[1];
                if CODE_LIKE.is_match(inner) {
                    format!(" {inner} ")
                } else {
                    " ".to_string()
                }
            })
            .into_owned();
    }

    let mut text = text.replace(['(', ')', '*'], " ");
    loop {
        let spread = GLUED_CONJUNCTION.replace_all(&text, "$1 $2 $3").into_owned();
        if spread == text {
            break;
        }
        text = spread;
    }

    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}
