//! Article fetching from the Wikipedia REST API, files, and stdin.
//!
//! This module provides functions for retrieving article HTML from various
//! sources: the Wikipedia REST content endpoint, arbitrary HTTP/HTTPS URLs,
//! local files, and standard input. Network functions require the `fetch`
//! feature; file and stdin readers are always available.
//!
//! No retry or backoff policy lives here: a reading client schedules retries
//! itself, and the sectioning pipeline downstream is pure computation.

use std::fs;
use std::path::PathBuf;

use crate::{Result, WikifoldError};

#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use url::Url;

/// HTTP client configuration for fetching articles.
///
/// This struct controls the wiki origin, timeout, and user agent settings
/// for HTTP requests.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Wiki origin the REST endpoint is resolved against.
    pub origin: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

#[cfg(feature = "fetch")]
impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            origin: crate::infobox::DEFAULT_WIKI_ORIGIN.to_string(),
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; Wikifold/1.0; +https://github.com/stormlightlabs/wikifold)"
                .to_string(),
        }
    }
}

/// Fetches an article's HTML from the Wikipedia REST content endpoint.
///
/// The title is the human-readable article title; spaces are mapped to
/// underscores and the remaining reserved characters are percent-encoded
/// when the path segment is built.
#[cfg(feature = "fetch")]
pub async fn fetch_article(title: &str, config: &FetchConfig) -> Result<String> {
    let mut url = Url::parse(&config.origin).map_err(|e| WikifoldError::InvalidUrl(e.to_string()))?;

    url.path_segments_mut()
        .map_err(|_| WikifoldError::InvalidUrl("origin cannot be a base URL".to_string()))?
        .extend(["api", "rest_v1", "page", "html", &title.replace(' ', "_")]);

    fetch_url(url.as_str(), config).await
}

/// Fetches HTML content from a URL.
///
/// This function performs an HTTP GET request and returns the response body
/// as text. It follows redirects, respects the configured timeout, and sends
/// an HTML `Accept` header.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| WikifoldError::InvalidUrl(e.to_string()))?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(WikifoldError::Http)?;

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                WikifoldError::Timeout { timeout: config.timeout }
            } else {
                WikifoldError::Http(e)
            }
        })?;

    let content = response.text().await?;

    Ok(content)
}

/// Reads article HTML from a local file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(WikifoldError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(WikifoldError::from)
    }
}

/// Reads article HTML from standard input.
///
/// This function reads all available input from stdin until EOF.
/// Useful for piping content from other commands.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(WikifoldError::from)?;

    Ok(buffer)
}
