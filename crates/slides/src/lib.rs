// ABOUTME: Splits normalized lyrics into presentation slides with optional letter-case styling.
// ABOUTME: One slide per verse; the deck title is guessed from the first line.

//! Lyrix slides - the consumer side of the lyrics text contract.
//!
//! Verses are separated by one or more blank lines. A verse starting with
//! `-` is a title marker; the dash is not shown on the slide.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Title used when the first line of the lyrics is blank.
pub const DEFAULT_TITLE: &str = "Lyrics Presentation";

/// Longest title, in characters, taken from the first line.
pub const MAX_TITLE_CHARS: usize = 50;

static VERSE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\n+").expect("verse pattern"));
static WORD_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w").expect("word pattern"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlideError {
    #[error("lyrics contain no verses")]
    Empty,
    #[error("unknown font case {0:?}")]
    UnknownCase(String),
}

/// Letter case applied to slide text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontCase {
    #[default]
    Normal,
    Uppercase,
    Lowercase,
    Capitalize,
}

impl FontCase {
    pub fn apply(self, text: &str) -> String {
        match self {
            FontCase::Normal => text.to_string(),
            FontCase::Uppercase => text.to_uppercase(),
            FontCase::Lowercase => text.to_lowercase(),
            FontCase::Capitalize => WORD_START
                .replace_all(text, |caps: &Captures| caps[0].to_uppercase())
                .into_owned(),
        }
    }
}

impl FromStr for FontCase {
    type Err = SlideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(FontCase::Normal),
            "upper" | "uppercase" => Ok(FontCase::Uppercase),
            "lower" | "lowercase" => Ok(FontCase::Lowercase),
            "capitalize" => Ok(FontCase::Capitalize),
            _ => Err(SlideError::UnknownCase(s.to_string())),
        }
    }
}

impl fmt::Display for FontCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FontCase::Normal => "normal",
            FontCase::Uppercase => "uppercase",
            FontCase::Lowercase => "lowercase",
            FontCase::Capitalize => "capitalize",
        };
        f.write_str(name)
    }
}

/// Splits lyrics on blank-line runs, dropping verses that are only whitespace.
pub fn split_verses(text: &str) -> Vec<&str> {
    VERSE_BREAK
        .split(text)
        .filter(|verse| !verse.trim().is_empty())
        .collect()
}

/// Text shown for a verse: trimmed, with a leading title dash removed.
pub fn slide_text(verse: &str) -> &str {
    let verse = verse.trim();
    match verse.strip_prefix('-') {
        Some(rest) => rest.trim(),
        None => verse,
    }
}

/// First line of the lyrics, without a title dash, cut to [`MAX_TITLE_CHARS`].
pub fn guess_title(text: &str) -> String {
    let first = text.lines().next().unwrap_or_default().trim();
    let first = first.strip_prefix('-').map_or(first, str::trim);
    if first.is_empty() {
        return DEFAULT_TITLE.to_string();
    }
    first.chars().take(MAX_TITLE_CHARS).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Zero-based position in the deck.
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub title: String,
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Builds one slide per verse, with `case` applied to each slide's text.
    pub fn from_lyrics(text: &str, case: FontCase) -> Result<Self, SlideError> {
        let slides: Vec<Slide> = split_verses(text)
            .into_iter()
            .map(slide_text)
            .filter(|t| !t.is_empty())
            .enumerate()
            .map(|(index, t)| Slide {
                index,
                text: case.apply(t),
            })
            .collect();

        if slides.is_empty() {
            return Err(SlideError::Empty);
        }

        Ok(Deck {
            title: guess_title(text),
            slides,
        })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}
