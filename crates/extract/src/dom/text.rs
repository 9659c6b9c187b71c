// ABOUTME: Plain-text rendering of DOM nodes that preserves visual line structure.
// ABOUTME: Line breaks become newlines and selected block elements are terminated with a newline.

use dom_query::NodeRef;

/// Blocks that end with a newline inside a tab pane.
pub const PANE_BLOCK_TAGS: &[&str] = &["p", "h1", "h2", "h3", "h4", "div"];

/// Blocks that end with a newline in the whole-content fallback.
pub const CONTENT_BLOCK_TAGS: &[&str] = &["p", "h1", "h2", "h3", "h4"];

/// Only line breaks are converted; no block gets a trailing newline.
pub const NO_BLOCK_TAGS: &[&str] = &[];

/// Elements whose text never reaches the output.
const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Renders the text beneath `node` (not including the node's own block newline).
///
/// Each `<br>` contributes `\n`; each descendant element named in `block_tags`
/// is followed by `\n`, as if a newline had been appended as its last child.
pub fn render_text(node: &NodeRef, block_tags: &[&str]) -> String {
    let mut out = String::new();
    render_into(node, block_tags, &mut out);
    out
}

fn render_into(node: &NodeRef, block_tags: &[&str], out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            out.push_str(&child.text());
            continue;
        }
        if !child.is_element() {
            continue;
        }

        let name = child
            .node_name()
            .map(|n| n.to_ascii_lowercase())
            .unwrap_or_default();
        if name == "br" {
            out.push('\n');
            continue;
        }
        if SKIP_TAGS.contains(&name.as_str()) {
            continue;
        }

        render_into(&child, block_tags, out);
        if block_tags.contains(&name.as_str()) {
            out.push('\n');
        }
    }
}
