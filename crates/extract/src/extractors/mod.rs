// ABOUTME: Markup extractors, one per source strategy, producing ordered labeled text blocks.
// ABOUTME: Missing markup degrades to fewer or empty blocks; extractors never fail.

//! Markup extraction.
//!
//! Each strategy turns a parsed page into an ordered list of [`LabeledBlock`]s
//! in document order. Submodules:
//! - `compiled`: cached selectors and query helpers.
//! - `tabbed`: bilingual tab-pane pages.
//! - `paragraph`: pages nesting lyrics, audio and chords in paragraph tabs.
//! - `container`: lyrics-container pages and the legacy `.lyrics` fallback.

pub mod compiled;
pub mod container;
pub mod paragraph;
pub mod tabbed;

use dom_query::Document;
use serde::{Deserialize, Serialize};

use crate::source::ExtractorKind;
use crate::text::sections::Language;

/// One semantically distinct chunk of extracted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledBlock {
    /// Source-provided title; only used to detect a language.
    pub label: Option<String>,
    pub text: String,
}

impl LabeledBlock {
    pub fn unlabeled(text: impl Into<String>) -> Self {
        Self {
            label: None,
            text: text.into(),
        }
    }

    pub fn labeled(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            text: text.into(),
        }
    }

    /// Language named by the label, if any.
    pub fn language(&self) -> Option<Language> {
        self.label.as_deref().and_then(Language::from_label)
    }
}

/// Blocks produced by one extractor run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub blocks: Vec<LabeledBlock>,
    /// True when the strategy's primary markup was missing and a fallback ran.
    pub fallback_used: bool,
}

impl Extraction {
    pub fn raw_length(&self) -> usize {
        self.blocks.iter().map(|b| b.text.len()).sum()
    }
}

/// Runs the extractor for `kind` over `doc`.
pub fn extract(kind: ExtractorKind, doc: &Document, extra_noise: &[String]) -> Extraction {
    match kind {
        ExtractorKind::TabbedPane => tabbed::extract(doc, extra_noise),
        ExtractorKind::ParagraphTabbed => paragraph::extract(doc, extra_noise),
        ExtractorKind::GenericContainer => container::extract(doc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_language_from_label() {
        assert_eq!(
            LabeledBlock::labeled("Telugu Lyrics", "x").language(),
            Some(Language::Telugu)
        );
        assert_eq!(
            LabeledBlock::labeled("English", "x").language(),
            Some(Language::English)
        );
        assert_eq!(LabeledBlock::labeled("Chords", "x").language(), None);
        assert_eq!(LabeledBlock::unlabeled("x").language(), None);
    }

    #[test]
    fn dispatch_uses_strategy() {
        let html = r#"<div data-lyrics-container="true">Hello<br>World</div>"#;
        let doc = Document::from(html);
        let generic = extract(ExtractorKind::GenericContainer, &doc, &[]);
        assert_eq!(generic.blocks.len(), 1);
        assert!(generic.blocks[0].text.contains("Hello\nWorld"));

        let tabbed = extract(ExtractorKind::TabbedPane, &doc, &[]);
        assert!(tabbed.blocks.is_empty());
        assert!(tabbed.fallback_used);
    }
}
