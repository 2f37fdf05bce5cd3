//! Error types for wikifold operations.
//!
//! This module defines the main error type [`WikifoldError`] which represents
//! all possible errors that can occur during article fetching, parsing, and
//! sectioning operations.
//!
//! Most of the sectioning pipeline deliberately does *not* error: the
//! extraction functions degrade to documented fallback values instead, so a
//! reading client always receives something renderable. The variants below
//! cover the outer boundary (empty input, I/O, HTTP) and invalid selectors.
//!
//! # Example
//!
//! ```rust
//! use wikifold_core::{WikifoldError, Result};
//!
//! fn section_page(html: &str) -> Result<String> {
//!     if html.is_empty() {
//!         return Err(WikifoldError::InvalidInput);
//!     }
//!     // ... sectioning logic
//!     # Ok(String::new())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for article sectioning operations.
///
/// This enum represents all possible errors that can occur during HTML
/// sectioning, HTTP fetching, and file I/O.
///
/// # Example
///
/// ```rust
/// use wikifold_core::{WikifoldError, section_article};
///
/// match section_article("") {
///     Ok(article) => println!("{} sections", article.sections.len()),
///     Err(WikifoldError::InvalidInput) => println!("no HTML available"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum WikifoldError {
    /// No HTML was available to section.
    ///
    /// Returned only when the input string is empty. A caller should show a
    /// "no content available" state rather than an error dialog; every other
    /// input, however malformed, produces a (possibly degenerate) result.
    #[error("No HTML content available")]
    InvalidInput,

    /// HTML parsing errors.
    ///
    /// Returned when a CSS selector string cannot be compiled. Malformed
    /// markup itself never produces this error; the parser recovers.
    #[error("Failed to parse HTML: {0}")]
    HtmlParse(String),

    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    /// This variant is only available when the `fetch` feature is enabled.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    /// This variant is only available when the `fetch` feature is enabled.
    #[cfg(feature = "fetch")]
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a URL or wiki origin cannot be parsed or is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// File not found.
    ///
    /// Returned when attempting to read a file that doesn't exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    ///
    /// Wraps standard I/O errors for file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for WikifoldError.
///
/// This is a convenience alias for `std::result::Result<T, WikifoldError>`.
pub type Result<T> = std::result::Result<T, WikifoldError>;
