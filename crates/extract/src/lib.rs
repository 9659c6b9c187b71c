// ABOUTME: Main library entry point for the lyrix lyrics extraction pipeline.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, PipelineResult, ExtractError, source selection.

//! Lyrix extract - turns scraped lyrics pages into slide-ready verse text.
//!
//! Given HTML from one of several lyrics sites, the pipeline picks an
//! extraction strategy from the URL host, pulls out labeled text blocks,
//! strips annotations and boilerplate, drops trailing Audio/Chords tab
//! content, canonicalizes blank lines and separates Telugu/English variants.
//!
//! # Example
//!
//! ```
//! use lyrix_extract::Client;
//!
//! let html = r#"<div data-lyrics-container="true">[Verse 1]<br>Amazing grace</div>"#;
//! let result = Client::default()
//!     .extract_html(html, "https://genius.com/amazing-grace-lyrics")
//!     .unwrap();
//! assert_eq!(result.lyrics, "Amazing grace");
//! ```

pub mod client;
pub mod dom;
pub mod error;
pub mod extractors;
pub mod options;
pub mod resource;
pub mod result;
pub mod source;
pub mod text;

pub use crate::client::Client;
pub use crate::error::{ErrorCode, ExtractError};
pub use crate::extractors::{Extraction, LabeledBlock};
pub use crate::options::{ClientBuilder, Options};
pub use crate::resource::{decode_html, RetrievalResult, Retriever, SongMetadata, SourceTag};
pub use crate::result::{Diagnostics, PipelineResult, VariantMap};
pub use crate::source::{select, ExtractorKind, SongRef};
pub use crate::text::{clean, normalize_spacing, BoilerplateRule, Language, TextCleaner};
