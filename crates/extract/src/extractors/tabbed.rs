// ABOUTME: Extractor for pages rendering lyrics as a set of titled tab panes.
// ABOUTME: One block per non-empty pane, labeled with the pane title; falls back to the entry content.

use dom_query::Document;
use tracing::debug;

use crate::dom::cleaners::{PrivateCopy, NOISE_SELECTORS};
use crate::dom::text::{render_text, CONTENT_BLOCK_TAGS, PANE_BLOCK_TAGS};
use crate::extractors::compiled::select_all;
use crate::extractors::{Extraction, LabeledBlock};

pub const TAB_PANE_SELECTOR: &str = ".su-tabs-pane";
pub const TAB_TITLE_ATTR: &str = "data-title";
pub const CONTENT_SELECTOR: &str = ".entry-content";

/// True when the page carries at least one tab pane.
pub fn has_tab_panes(doc: &Document) -> bool {
    select_all(doc, TAB_PANE_SELECTOR).is_some()
}

pub fn extract(doc: &Document, extra_noise: &[String]) -> Extraction {
    let Some(panes) = select_all(doc, TAB_PANE_SELECTOR) else {
        debug!("no tab panes, falling back to entry content");
        return extract_content(doc, extra_noise);
    };

    let blocks: Vec<LabeledBlock> = panes
        .nodes()
        .iter()
        .filter_map(|pane| {
            let label = pane
                .attr(TAB_TITLE_ATTR)
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty());

            let copy = PrivateCopy::of_node(pane);
            copy.strip_noise(NOISE_SELECTORS, extra_noise);
            let text = copy
                .body()
                .map(|body| render_text(&body, PANE_BLOCK_TAGS))
                .unwrap_or_default();
            let text = text.trim();

            (!text.is_empty()).then(|| LabeledBlock {
                label,
                text: text.to_string(),
            })
        })
        .collect();

    debug!(panes = panes.length(), blocks = blocks.len(), "tab panes extracted");
    Extraction {
        blocks,
        fallback_used: false,
    }
}

/// Whole-content fallback: one unlabeled block from every entry-content element.
fn extract_content(doc: &Document, extra_noise: &[String]) -> Extraction {
    let mut text = String::new();
    if let Some(content) = select_all(doc, CONTENT_SELECTOR) {
        for node in content.nodes() {
            let copy = PrivateCopy::of_node(node);
            copy.strip_noise(NOISE_SELECTORS, extra_noise);
            if let Some(body) = copy.body() {
                text.push_str(&render_text(&body, CONTENT_BLOCK_TAGS));
            }
        }
    }

    let text = text.trim();
    let blocks = if text.is_empty() {
        Vec::new()
    } else {
        vec![LabeledBlock::unlabeled(text)]
    };
    Extraction {
        blocks,
        fallback_used: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TWO_PANES: &str = r#"<html><body><div class="entry-content">
        <div class="su-tabs-panes">
          <div class="su-tabs-pane" data-title="Telugu Lyrics">
            <p>యేసు నా రాజు<br>నా ప్రాణమా</p>
            <div class="sharedaddy">Share this</div>
            <script>track();</script>
          </div>
          <div class="su-tabs-pane" data-title="English Lyrics">
            <p>Yesu naa raaju<br>naa praanamaa</p>
          </div>
          <div class="su-tabs-pane" data-title="Video"></div>
        </div>
    </div></body></html>"#;

    #[test]
    fn one_block_per_non_empty_pane_in_order() {
        let doc = Document::from(TWO_PANES);
        let extraction = extract(&doc, &[]);

        assert!(!extraction.fallback_used);
        assert_eq!(extraction.blocks.len(), 2);
        assert_eq!(extraction.blocks[0].label.as_deref(), Some("Telugu Lyrics"));
        assert_eq!(extraction.blocks[0].text, "యేసు నా రాజు\nనా ప్రాణమా");
        assert_eq!(extraction.blocks[1].label.as_deref(), Some("English Lyrics"));
        assert_eq!(extraction.blocks[1].text, "Yesu naa raaju\nnaa praanamaa");
    }

    #[test]
    fn noise_is_removed_only_from_the_copy() {
        let doc = Document::from(TWO_PANES);
        let extraction = extract(&doc, &[]);
        assert!(!extraction.blocks[0].text.contains("Share this"));
        assert!(!extraction.blocks[0].text.contains("track"));
        assert!(select_all(&doc, ".sharedaddy").is_some());
    }

    #[test]
    fn missing_title_gives_unlabeled_block() {
        let doc = Document::from(r#"<div class="su-tabs-pane"><p>Only verse</p></div>"#);
        let extraction = extract(&doc, &[]);
        assert_eq!(extraction.blocks, vec![LabeledBlock::unlabeled("Only verse")]);
    }

    #[test]
    fn falls_back_to_entry_content() {
        let doc = Document::from(
            r#"<div class="entry-content"><h2>Song</h2><p>line one<br>line two</p>
               <div class="related-posts">More songs</div></div>"#,
        );
        let extraction = extract(&doc, &[]);
        assert!(extraction.fallback_used);
        assert_eq!(extraction.blocks.len(), 1);
        assert_eq!(extraction.blocks[0].label, None);
        assert!(extraction.blocks[0].text.starts_with("Song\nline one\nline two"));
        assert!(!extraction.blocks[0].text.contains("More songs"));
    }

    #[test]
    fn nothing_found_yields_no_blocks() {
        let doc = Document::from("<html><body><p>unrelated</p></body></html>");
        let extraction = extract(&doc, &[]);
        assert!(extraction.blocks.is_empty());
        assert!(!has_tab_panes(&doc));
    }
}
