// ABOUTME: Text cleaner stripping bracketed annotations, residual markup and boilerplate lines.
// ABOUTME: Rules are an ordered list of regex substitutions; callers may append site-specific rules.

use once_cell::sync::Lazy;
use regex::Regex;

/// One substitution applied to every occurrence of `pattern`.
#[derive(Debug, Clone)]
pub struct BoilerplateRule {
    pub intent: String,
    pattern: Regex,
    replacement: String,
}

impl BoilerplateRule {
    /// Compiles a rule. `intent` documents what the rule removes.
    pub fn new(
        intent: impl Into<String>,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            intent: intent.into(),
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }

    /// Convenience for a rule that deletes its matches.
    pub fn remove(intent: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Self::new(intent, pattern, "")
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }
}

/// Built-in rules, applied in this order.
const BUILTIN_RULES: &[(&str, &str)] = &[
    ("section tags such as [Chorus]", r"\[.*?\]"),
    ("stray {metadata}", r"\{.*?\}"),
    ("markup that survived extraction", r"<.*?>"),
    ("lyricist credit", r"(?m)Lyricist:.*$"),
    ("lyricist credit (Telugu)", r"(?m)పాట రచయిత:.*$"),
    ("download links", r"(?m)Download Lyrics as:.*$"),
];

static BUILTIN: Lazy<Vec<BoilerplateRule>> = Lazy::new(|| {
    BUILTIN_RULES
        .iter()
        .map(|(intent, pattern)| {
            BoilerplateRule::remove(*intent, pattern).expect("builtin cleaner pattern")
        })
        .collect()
});

/// Cleans text with the built-in rules only.
pub fn clean(text: &str) -> String {
    TextCleaner::default().clean(text)
}

/// Built-in rules followed by caller-supplied ones.
#[derive(Debug, Clone, Default)]
pub struct TextCleaner {
    extra: Vec<BoilerplateRule>,
}

impl TextCleaner {
    pub fn new(extra: Vec<BoilerplateRule>) -> Self {
        Self { extra }
    }

    /// Applies every rule in order, then trims the ends. Total: never fails.
    pub fn clean(&self, text: &str) -> String {
        let cleaned = BUILTIN
            .iter()
            .chain(self.extra.iter())
            .fold(text.to_string(), |acc, rule| rule.apply(&acc));
        cleaned.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_brackets_keeping_inner_spacing() {
        assert_eq!(clean("Hello [Verse 1] World"), "Hello  World");
    }

    #[test]
    fn removes_every_bracket_and_brace_span() {
        assert_eq!(
            clean("[Intro]\nLine {x} one [Chorus]\nLine two {meta}"),
            "Line  one \nLine two"
        );
    }

    #[test]
    fn brackets_do_not_span_lines() {
        assert_eq!(clean("open [ here\nand ] there"), "open [ here\nand ] there");
    }

    #[test]
    fn removes_tag_shaped_spans() {
        assert_eq!(clean("<i>soft</i> voice<br/>"), "soft voice");
    }

    #[test]
    fn removes_lyricist_lines_in_both_scripts() {
        let text = "Lyricist: Someone\nయేసు నా రాజు\nపాట రచయిత: ఎవరో\nLine";
        assert_eq!(clean(text), "యేసు నా రాజు\n\nLine");
    }

    #[test]
    fn removes_download_links() {
        let text = "Last line\nDownload Lyrics as: PPT | PDF";
        assert_eq!(clean(text), "Last line");
    }

    #[test]
    fn extra_rules_run_after_builtins() {
        let cleaner = TextCleaner::new(vec![
            BoilerplateRule::remove("copyright", r"(?m)^©.*$").unwrap(),
            BoilerplateRule::new("smart quotes", "[’‘]", "'").unwrap(),
        ]);
        assert_eq!(cleaner.clean("It’s [x] love\n© 2020 Label"), "It's  love");
    }

    #[test]
    fn invalid_rule_is_rejected() {
        assert!(BoilerplateRule::remove("broken", r"(unclosed").is_err());
    }

    #[test]
    fn whitespace_only_cleans_to_empty() {
        assert_eq!(clean("  \n [Outro] \n "), "");
    }
}
