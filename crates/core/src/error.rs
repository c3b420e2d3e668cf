//! Error types for jobsift operations.
//!
//! This module defines the main error type [`SiftError`] covering everything
//! that can go wrong while parsing documents, running extraction strategies,
//! and fetching auxiliary resources.
//!
//! Inside the extraction engine no error is ever fatal: a strategy that
//! returns `Err` is demoted to "no candidate" and logged, and the public
//! entry point always produces a complete [`crate::JobRecord`]. The variants
//! here exist so that plumbing code (selector parsing, JSON-LD decoding,
//! HTTP fetching, CLI I/O) can propagate failures with `?` up to the point
//! where they are swallowed.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for job extraction operations.
///
/// # Example
///
/// ```rust
/// use jobsift_core::{SiftError, Result};
///
/// fn require_absolute(url: &str) -> Result<()> {
///     if !url.starts_with("http") {
///         return Err(SiftError::InvalidUrl(url.to_string()));
///     }
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum SiftError {
    /// HTTP request errors from reqwest.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// An auxiliary sub-resource did not finish loading in time.
    ///
    /// Treated as a strategy miss by the engine: the strategy waiting on the
    /// resource yields no candidate and extraction continues.
    #[error("Sub-resource timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// Embedded structured data (JSON-LD) failed to parse.
    ///
    /// Scoped to the single metadata block involved; other blocks and other
    /// strategies are unaffected.
    #[error("Malformed structured metadata: {0}")]
    MalformedMetadata(String),

    /// A single strategy found no usable value.
    ///
    /// The normal way a strategy signals "nothing here"; recovered locally
    /// by the tournament runner, never surfaced to the caller.
    #[error("Strategy found no candidate: {0}")]
    StrategyMiss(String),

    /// Site profile files are missing or invalid.
    #[error("Site profile error: {0}")]
    ProfileError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for SiftError.
pub type Result<T> = std::result::Result<T, SiftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SiftError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_timeout_error() {
        let err = SiftError::Timeout { timeout: 10 };
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn test_strategy_miss_error() {
        let err = SiftError::StrategyMiss("no heading matched".to_string());
        assert!(err.to_string().contains("no heading matched"));
    }
}
