// ABOUTME: Error types for the lyrics pipeline including ErrorCode enum and ExtractError struct.
// ABOUTME: NotFound is the only terminal pipeline failure; the rest cover input, config and retrieval.

use std::fmt;

use crate::result::Diagnostics;

/// Error codes representing different categories of pipeline failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidSource,
    Config,
    Retrieval,
    NotFound,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidSource => "invalid source",
            ErrorCode::Config => "configuration error",
            ErrorCode::Retrieval => "retrieval error",
            ErrorCode::NotFound => "lyrics not found",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub struct ExtractError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    /// Advisory details about what the pipeline saw before giving up.
    pub diagnostics: Option<Diagnostics>,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lyrix: {} {}: {}", self.op, self.url, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ExtractError {
    /// Create an InvalidSource error.
    pub fn invalid_source(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::InvalidSource,
            url: url.into(),
            op: op.into(),
            diagnostics: None,
            source,
        }
    }

    /// Create a Config error. Config errors are not tied to a URL.
    pub fn config(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self {
            code: ErrorCode::Config,
            url: String::new(),
            op: op.into(),
            diagnostics: None,
            source,
        }
    }

    /// Create a Retrieval error.
    pub fn retrieval(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Retrieval,
            url: url.into(),
            op: op.into(),
            diagnostics: None,
            source,
        }
    }

    /// Create a NotFound error carrying the diagnostics gathered so far.
    pub fn not_found(
        url: impl Into<String>,
        op: impl Into<String>,
        diagnostics: Option<Diagnostics>,
    ) -> Self {
        Self {
            code: ErrorCode::NotFound,
            url: url.into(),
            op: op.into(),
            diagnostics,
            source: None,
        }
    }

    /// Returns true if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::NotFound
    }

    /// Returns true if this is an InvalidSource error.
    pub fn is_invalid_source(&self) -> bool {
        self.code == ErrorCode::InvalidSource
    }

    /// Returns true if this is a Config error.
    pub fn is_config(&self) -> bool {
        self.code == ErrorCode::Config
    }
}
