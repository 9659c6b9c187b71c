// ABOUTME: Spacing normalizer turning arbitrary blank-line runs into the verse-separator convention.
// ABOUTME: Two or more blank lines mark a stanza break (\n\n); a single blank line is a soft wrap (\n).

use once_cell::sync::Lazy;
use regex::Regex;

/// Private-use placeholder for a stanza break while soft wraps are collapsed.
const STANZA_SENTINEL: &str = "\u{F8FF}stanza\u{F8FF}";

/// Three or more newlines, with any whitespace between and after them.
static STANZA_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n\s*\n\s*").expect("stanza pattern"));

/// One blank line, possibly holding whitespace.
static SOFT_WRAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("wrap pattern"));

static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("newline pattern"));

/// Canonicalizes line terminators and blank-line runs.
///
/// Output has exactly one blank line between stanzas and none inside a stanza.
pub fn normalize_spacing(text: &str) -> String {
    let text = text
        .replace(STANZA_SENTINEL, "")
        .replace("\r\n", "\n")
        .replace('\r', "\n");
    let marked = STANZA_BREAK.replace_all(&text, STANZA_SENTINEL);
    let collapsed = SOFT_WRAP.replace_all(&marked, "\n");
    collapsed
        .replace(STANZA_SENTINEL, "\n\n")
        .trim()
        .to_string()
}

/// Reduces any run of three or more newlines to exactly two.
pub fn collapse_excess_newlines(text: &str) -> String {
    EXCESS_NEWLINES.replace_all(text, "\n\n").into_owned()
}
