// ABOUTME: Section handling: drops trailing Audio/Chords tab content and carves out language variants.
// ABOUTME: Variants are found through "Telugu Lyrics"/"English Lyrics" header markers in the text.

use std::fmt;

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::result::VariantMap;

/// A language with its own lyrics variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Telugu,
    English,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Telugu, Language::English];

    /// Key used in the variant map.
    pub fn key(self) -> &'static str {
        match self {
            Language::Telugu => "telugu",
            Language::English => "english",
        }
    }

    /// Header line written in front of a block in this language.
    pub fn header(self) -> &'static str {
        match self {
            Language::Telugu => "Telugu Lyrics",
            Language::English => "English Lyrics",
        }
    }

    /// Detects the language named in a tab title. Case-sensitive on the language word.
    pub fn from_label(label: &str) -> Option<Self> {
        if label.contains("Telugu") {
            Some(Language::Telugu)
        } else if label.contains("English") {
            Some(Language::English)
        } else {
            None
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A word marking the start of non-lyric tab content.
struct TailSentinel {
    word: &'static str,
    /// The word alone at the start of a line.
    line_start: Regex,
    /// A newline directly followed by the word, no word boundary required.
    loose: Regex,
}

impl TailSentinel {
    fn new(word: &'static str) -> Self {
        Self {
            word,
            line_start: Regex::new(&format!(r"(?im)^[ \t]*{}\b", word)).expect("sentinel pattern"),
            loose: Regex::new(&format!(r"(?i)\n{}", word)).expect("sentinel pattern"),
        }
    }

    fn cut_point(&self, text: &str) -> Option<usize> {
        self.line_start
            .find(text)
            .or_else(|| self.loose.find(text))
            .map(|m| m.start())
    }
}

/// Applied in order, each on the already-truncated text.
static TAIL_SENTINELS: Lazy<[TailSentinel; 2]> =
    Lazy::new(|| [TailSentinel::new("Audio"), TailSentinel::new("Chords")]);

static TELUGU_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Telugu Lyrics").expect("marker pattern"));
static ENGLISH_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)English Lyrics").expect("marker pattern"));

static HEADER_MARKERS: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(Language::ALL.map(Language::header))
        .expect("header markers")
});

/// Drops everything from the first Audio line, then from the first Chords line.
pub fn truncate_tail(text: &str) -> String {
    let mut kept = text;
    for sentinel in TAIL_SENTINELS.iter() {
        if let Some(at) = sentinel.cut_point(kept) {
            debug!(sentinel = sentinel.word, at, "truncating tail");
            kept = kept[..at].trim_end();
        }
    }
    kept.to_string()
}

/// Finds the text following each language header.
///
/// Telugu runs up to the English header or the end; English runs to the end.
/// Returns `None` when neither yields non-empty text.
pub fn extract_variants(text: &str) -> Option<VariantMap> {
    let mut variants = VariantMap::new();

    if let Some(m) = TELUGU_MARKER.find(text) {
        let rest = &text[m.end()..];
        let end = ENGLISH_MARKER
            .find(rest)
            .map_or(rest.len(), |english| english.start());
        insert_non_empty(&mut variants, Language::Telugu, &rest[..end]);
    }

    if let Some(m) = ENGLISH_MARKER.find(text) {
        insert_non_empty(&mut variants, Language::English, &text[m.end()..]);
    }

    if variants.is_empty() {
        None
    } else {
        debug!(languages = variants.len(), "language variants detected");
        Some(variants)
    }
}

fn insert_non_empty(variants: &mut VariantMap, language: Language, span: &str) {
    let span = span.trim();
    if !span.is_empty() {
        variants.insert(language.key().to_string(), span.to_string());
    }
}

/// Removes every language header (case-insensitive) and trims.
///
/// Repeats until no header remains, since a removal can join its neighbours
/// into a new header. Each pass shortens the text.
pub fn strip_headers(text: &str) -> String {
    let mut out = text.to_string();
    while HEADER_MARKERS.is_match(&out) {
        out = HEADER_MARKERS.replace_all(&out, &["", ""]);
    }
    out.trim().to_string()
}
