// ABOUTME: Extractor for pages that nest lyrics, audio and chords in paragraph-based tabs.
// ABOUTME: Collects paragraph text from the first tab panel, falling back to cleaned raw text.

use dom_query::{Document, Selection};
use tracing::debug;

use crate::dom::cleaners::{PrivateCopy, PARAGRAPH_NOISE_SELECTORS};
use crate::dom::text::{render_text, NO_BLOCK_TAGS};
use crate::extractors::compiled::{select_all, select_within};
use crate::extractors::tabbed::CONTENT_SELECTOR;
use crate::extractors::{Extraction, LabeledBlock};

/// Tab panel class names, in priority order. Only the first one present is used.
pub const TAB_PANEL_SELECTORS: &[&str] = &[".responsive-tabs__panel", ".tabcontent"];

pub fn extract(doc: &Document, extra_noise: &[String]) -> Extraction {
    let Some(content) = select_all(doc, CONTENT_SELECTOR) else {
        debug!("no entry content found");
        return Extraction {
            blocks: vec![LabeledBlock::unlabeled("")],
            fallback_used: false,
        };
    };

    let scope = scope_of(&content);
    let mut text = paragraph_text(&scope);
    let mut fallback_used = false;

    if text.trim().is_empty() {
        debug!("no paragraph text, using raw scope text");
        text = raw_text(&scope, extra_noise);
        fallback_used = true;
    }

    Extraction {
        blocks: vec![LabeledBlock::unlabeled(text)],
        fallback_used,
    }
}

/// First matching tab panel, else the whole content container.
fn scope_of<'a>(content: &Selection<'a>) -> Selection<'a> {
    let panel = TAB_PANEL_SELECTORS
        .iter()
        .find_map(|css| select_within(content, css));
    match panel {
        Some(tabs) => {
            debug!(tabs = tabs.length(), "restricting to first tab panel");
            tabs.first()
        }
        None => content.clone(),
    }
}

/// Every non-empty paragraph, each followed by a blank line.
fn paragraph_text(scope: &Selection) -> String {
    let Some(paragraphs) = select_within(scope, "p") else {
        return String::new();
    };

    let mut text = String::new();
    for p in paragraphs.iter() {
        let para = p.text();
        let para = para.trim();
        if !para.is_empty() {
            text.push_str(para);
            text.push_str("\n\n");
        }
    }
    text
}

fn raw_text(scope: &Selection, extra_noise: &[String]) -> String {
    let mut text = String::new();
    for node in scope.nodes() {
        let copy = PrivateCopy::of_node(node);
        copy.strip_noise(PARAGRAPH_NOISE_SELECTORS, extra_noise);
        if let Some(body) = copy.body() {
            text.push_str(&render_text(&body, NO_BLOCK_TAGS));
        }
    }
    text
}
