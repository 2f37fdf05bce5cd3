//! HTML preprocessing ahead of sectioning.
//!
//! Wikipedia's REST HTML output carries inline `<style>` elements, `<link>`
//! stylesheet references, and editor comments that must never reach the
//! rendering layer. This module strips them with a streaming rewrite before
//! the document is parsed into a tree. On any rewriter failure the input
//! passes through unchanged; preprocessing is an optimization, never a point
//! of failure.

use regex::Regex;

/// Configuration for HTML preprocessing
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// Whether to remove script tags
    pub remove_scripts: bool,
    /// Whether to remove style tags
    pub remove_styles: bool,
    /// Whether to remove noscript tags
    pub remove_noscript: bool,
    /// Whether to remove link elements (stylesheet and metadata references)
    pub remove_links: bool,
    /// Whether to strip HTML comments
    pub strip_comments: bool,
    /// Whether to collapse whitespace runs
    pub collapse_whitespace: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            remove_scripts: true,
            remove_styles: true,
            remove_noscript: true,
            remove_links: true,
            strip_comments: true,
            collapse_whitespace: true,
        }
    }
}

/// Preprocess article HTML by removing non-content elements
pub fn preprocess_html(html: &str, config: &PreprocessConfig) -> String {
    let mut processed = html.to_string();

    if config.remove_scripts || config.remove_styles || config.remove_noscript || config.remove_links {
        processed = remove_unwanted_tags(&processed, config);
    }

    if config.strip_comments {
        processed = remove_comments(&processed);
    }

    if config.collapse_whitespace {
        processed = collapse_whitespace(processed);
    }

    processed
}

/// Remove script, style, noscript, and link tags from HTML
fn remove_unwanted_tags(html: &str, config: &PreprocessConfig) -> String {
    let mut output = String::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![
                if config.remove_scripts {
                    Some(lol_html::element!("script", |el| {
                        el.remove();
                        Ok(())
                    }))
                } else {
                    None
                },
                if config.remove_styles {
                    Some(lol_html::element!("style", |el| {
                        el.remove();
                        Ok(())
                    }))
                } else {
                    None
                },
                if config.remove_noscript {
                    Some(lol_html::element!("noscript", |el| {
                        el.remove();
                        Ok(())
                    }))
                } else {
                    None
                },
                if config.remove_links {
                    Some(lol_html::element!("link", |el| {
                        el.remove();
                        Ok(())
                    }))
                } else {
                    None
                },
            ]
            .into_iter()
            .flatten()
            .collect(),
            ..Default::default()
        },
        |c: &[u8]| {
            output.push_str(&String::from_utf8_lossy(c));
        },
    );

    match rewriter.write(html.as_bytes()) {
        Ok(_) => {}
        Err(_) => return html.to_string(),
    }

    match rewriter.end() {
        Ok(_) => {}
        Err(_) => return html.to_string(),
    }

    if output.is_empty() { html.to_string() } else { output }
}

/// Remove HTML comments from the document
fn remove_comments(html: &str) -> String {
    let re = Regex::new(r"(?s)<!--.*?-->").unwrap();
    re.replace_all(html, "").to_string()
}

/// Collapse whitespace runs in HTML
fn collapse_whitespace(html: String) -> String {
    let re = Regex::new(r"\s+").unwrap();
    re.replace_all(&html, " ").to_string()
}
