// ABOUTME: PipelineResult holding normalized lyrics plus optional language variants.
// ABOUTME: Diagnostics records advisory details about the strategy and intermediate text sizes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::resource::SourceTag;
use crate::source::ExtractorKind;

/// Language tag -> lyrics text. Only present when dual-language markers were found.
pub type VariantMap = BTreeMap<String, String>;

/// Advisory details about a pipeline run. Never required for correctness.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub strategy: Option<ExtractorKind>,
    pub source_tag: Option<SourceTag>,
    pub html_length: usize,
    pub blocks_found: usize,
    pub fallback_used: bool,
    pub raw_length: usize,
    pub cleaned_length: usize,
    /// Why the fetch failed, when the page was treated as empty because of it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieval_error: Option<String>,
}

/// The result of a successful extraction.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PipelineResult {
    /// Verses separated by `\n\n`, lines within a verse by `\n`.
    pub lyrics: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<VariantMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

impl PipelineResult {
    /// Returns the variant text for a language tag such as `"telugu"`.
    pub fn variant(&self, language: &str) -> Option<&str> {
        self.variants
            .as_ref()
            .and_then(|v| v.get(&language.to_lowercase()))
            .map(String::as_str)
    }

    /// Returns true if any language variant was detected.
    pub fn has_variants(&self) -> bool {
        self.variants.as_ref().map_or(false, |v| !v.is_empty())
    }

    /// Number of verses in the default lyrics.
    pub fn verse_count(&self) -> usize {
        self.lyrics
            .split("\n\n")
            .filter(|v| !v.trim().is_empty())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_lookup_is_case_insensitive() {
        let mut variants = VariantMap::new();
        variants.insert("telugu".to_string(), "నమస్కారం".to_string());
        let result = PipelineResult {
            lyrics: "నమస్కారం".to_string(),
            variants: Some(variants),
            diagnostics: None,
        };

        assert!(result.has_variants());
        assert_eq!(result.variant("Telugu"), Some("నమస్కారం"));
        assert_eq!(result.variant("english"), None);
    }

    #[test]
    fn serialization_omits_absent_variants() {
        let result = PipelineResult {
            lyrics: "line one\n\nline two".to_string(),
            variants: None,
            diagnostics: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["lyrics"], "line one\n\nline two");
        assert!(json.get("variants").is_none());
        assert_eq!(result.verse_count(), 2);
    }
}
