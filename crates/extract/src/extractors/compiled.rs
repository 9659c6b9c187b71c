// ABOUTME: Pre-compiled CSS selector cache shared by every extractor.
// ABOUTME: Query helpers return None for an invalid selector or an empty match, never an error.

//! Selector caching and query helpers.
//!
//! Extractors run the same handful of selectors on every page, so matchers are
//! compiled once and reused. Missing structure is represented as `None`.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use dom_query::{Document, Matcher, Selection};
use once_cell::sync::Lazy;

static SELECTOR_CACHE: Lazy<RwLock<HashMap<String, Option<Matcher>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a CSS selector, caching the result (invalid selectors cache as `None`).
pub fn get_or_compile(css: &str) -> Option<Matcher> {
    {
        let cache = SELECTOR_CACHE.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = Matcher::new(css).ok();
    let mut cache = SELECTOR_CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    cache
        .entry(css.to_string())
        .or_insert(compiled)
        .clone()
}

/// Returns true if `css` compiles to a valid selector.
pub fn is_valid_selector(css: &str) -> bool {
    get_or_compile(css).is_some()
}

/// All elements in `doc` matching `css`, or `None` when nothing matches.
pub fn select_all<'a>(doc: &'a Document, css: &str) -> Option<Selection<'a>> {
    let matcher = get_or_compile(css)?;
    let sel = doc.select_matcher(&matcher);
    sel.exists().then_some(sel)
}

/// Descendants of `scope` matching `css`, or `None` when nothing matches.
pub fn select_within<'a>(scope: &Selection<'a>, css: &str) -> Option<Selection<'a>> {
    let matcher = get_or_compile(css)?;
    let sel = scope.select_matcher(&matcher);
    sel.exists().then_some(sel)
}

/// Removes every descendant of `scope` matching `css`. Returns how many were removed.
pub fn remove_within(scope: &Selection, css: &str) -> usize {
    match select_within(scope, css) {
        Some(sel) => {
            let count = sel.length();
            sel.remove();
            count
        }
        None => 0,
    }
}
