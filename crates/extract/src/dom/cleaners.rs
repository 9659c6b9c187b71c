// ABOUTME: Noise removal for lyrics markup: scripts, sharing widgets, related posts, audio players.
// ABOUTME: Always operates on a private document copy so one block's cleanup never affects another.

use dom_query::{Document, NodeRef, Selection};
use tracing::trace;

use crate::extractors::compiled::{remove_within, select_all};

/// Removed from every tab pane and from the whole-content fallback.
pub const NOISE_SELECTORS: &[&str] = &["script", "style", ".sharedaddy", ".related-posts"];

/// Removed from a paragraph-tab scope before its raw text is taken.
pub const PARAGRAPH_NOISE_SELECTORS: &[&str] = &[
    "script",
    "style",
    ".sharedaddy",
    ".related-posts",
    ".addtoany_share_save_container",
    ".jp-audio",
    r#"div[class*="share"]"#,
];

/// A detached, mutable copy of one element.
pub struct PrivateCopy {
    doc: Document,
}

impl PrivateCopy {
    /// Copies a single node into its own document.
    pub fn of_node(node: &NodeRef) -> Self {
        let html = node.html();
        Self {
            doc: Document::from(&*html),
        }
    }

    /// The copied element itself.
    fn root(&self) -> Option<Selection<'_>> {
        select_all(&self.doc, "body > *")
    }

    /// Removes built-in and caller-supplied noise from inside the copied element.
    ///
    /// The copied element is never removed, even when it matches a noise selector.
    pub fn strip_noise(&self, builtin: &[&str], extra: &[String]) -> &Self {
        let Some(root) = self.root() else {
            return self;
        };
        let mut removed = 0;
        for css in builtin.iter().copied().chain(extra.iter().map(String::as_str)) {
            removed += remove_within(&root, css);
        }
        trace!(removed, "stripped noise elements");
        self
    }

    /// The `<body>` holding the copied element.
    pub fn body(&self) -> Option<NodeRef<'_>> {
        select_all(&self.doc, "body").and_then(|s| s.nodes().first().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copy_of(doc: &Document, css: &str) -> PrivateCopy {
        let sel = doc.select(css);
        let node = sel.nodes().first().cloned().expect("node");
        PrivateCopy::of_node(&node)
    }

    fn body_text(copy: &PrivateCopy) -> String {
        copy.body().map(|b| b.text().trim().to_string()).unwrap_or_default()
    }

    #[test]
    fn copy_is_detached_from_source() {
        let doc = Document::from(
            r#"<div class="pane"><p>verse</p><div class="sharedaddy">share</div></div>"#,
        );
        let copy = copy_of(&doc, ".pane");
        copy.strip_noise(NOISE_SELECTORS, &[]);
        assert_eq!(body_text(&copy), "verse");
        assert!(select_all(&doc, ".sharedaddy").is_some());
    }

    #[test]
    fn extra_selectors_are_removed() {
        let doc = Document::from(r#"<div class="pane"><p>verse</p><aside class="ad">buy</aside></div>"#);
        let copy = copy_of(&doc, ".pane");
        copy.strip_noise(NOISE_SELECTORS, &[".ad".to_string()]);
        assert_eq!(body_text(&copy), "verse");
    }

    #[test]
    fn paragraph_noise_matches_share_divs() {
        let doc = Document::from(
            r#"<div class="tab">words<div class="post-share-buttons">x</div><div class="jp-audio">y</div></div>"#,
        );
        let copy = copy_of(&doc, ".tab");
        copy.strip_noise(PARAGRAPH_NOISE_SELECTORS, &[]);
        assert_eq!(body_text(&copy), "words");
    }

    #[test]
    fn copied_element_survives_matching_its_own_noise_selector() {
        let doc = Document::from(
            r#"<div class="tabcontent share-enabled">lyric line<div class="share-row">x</div></div>"#,
        );
        let copy = copy_of(&doc, ".tabcontent");
        copy.strip_noise(PARAGRAPH_NOISE_SELECTORS, &[]);
        assert_eq!(body_text(&copy), "lyric line");
    }
}
