// ABOUTME: DOM helpers for lyrics extraction on top of dom_query.
// ABOUTME: Provides private node copies, noise removal and line-preserving text rendering.

//! DOM utilities for lyrics markup.
//!
//! Extractors never mutate the shared parsed page. Anything that needs
//! removal works on a [`cleaners::PrivateCopy`]; line breaks and block
//! boundaries are turned into newlines by [`text::render_text`].

pub mod cleaners;
pub mod text;
