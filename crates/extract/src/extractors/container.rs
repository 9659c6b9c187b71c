// ABOUTME: Default extractor for pages marking lyrics with data-lyrics-container elements.
// ABOUTME: Falls back to the legacy .lyrics class; all matches are concatenated into one block.

use dom_query::{Document, Selection};
use tracing::debug;

use crate::dom::text::{render_text, NO_BLOCK_TAGS};
use crate::extractors::compiled::select_all;
use crate::extractors::{Extraction, LabeledBlock};

pub const LYRICS_CONTAINER_SELECTOR: &str = r#"[data-lyrics-container="true"]"#;
pub const LEGACY_LYRICS_SELECTOR: &str = ".lyrics";

pub fn extract(doc: &Document) -> Extraction {
    let (containers, fallback_used) = match select_all(doc, LYRICS_CONTAINER_SELECTOR) {
        Some(found) => (Some(found), false),
        None => {
            debug!("no lyrics containers, trying legacy selector");
            (select_all(doc, LEGACY_LYRICS_SELECTOR), true)
        }
    };

    let text = containers.as_ref().map(concat_text).unwrap_or_default();
    Extraction {
        blocks: vec![LabeledBlock::unlabeled(text)],
        fallback_used,
    }
}

fn concat_text(containers: &Selection) -> String {
    let mut text = String::new();
    for node in containers.nodes() {
        text.push_str(&render_text(node, NO_BLOCK_TAGS));
        text.push_str("\n\n");
    }
    text
}
