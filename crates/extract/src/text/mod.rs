// ABOUTME: Pure string stages of the lyrics pipeline: cleaning, section handling and spacing.
// ABOUTME: Every stage is total; missing data yields empty strings, never errors.

pub mod clean;
pub mod sections;
pub mod spacing;

pub use clean::{clean, BoilerplateRule, TextCleaner};
pub use sections::{extract_variants, strip_headers, truncate_tail, Language};
pub use spacing::{collapse_excess_newlines, normalize_spacing};
