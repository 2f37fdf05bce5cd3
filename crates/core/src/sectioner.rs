//! Main article sectioning API.
//!
//! This module provides the primary API for turning raw Wikipedia article
//! HTML into renderer-ready sections. The main entry point is the
//! [`Sectioner`] struct, along with convenience functions like
//! [`section_article`] and (behind the `fetch` feature)
//! [`fetch_and_section`].
//!
//! The pipeline is pure, synchronous, and CPU-bound: preprocess, extract the
//! infobox, split the intro, split the named sections. Each call receives its
//! own HTML string and produces its own output; there is no shared state
//! between invocations, so byte-identical input always yields byte-identical
//! output. Callers that run on a UI thread decide *before* invoking whether
//! the document is large enough to defer; the pipeline itself never yields.
//!
//! # Example
//!
//! ```rust
//! use wikifold_core::section_article;
//!
//! let html = "<body><p>Lead</p><section><h2>History</h2><p>Text</p></section></body>";
//! let article = section_article(html).unwrap();
//!
//! assert!(article.intro_html.contains("Lead"));
//! assert_eq!(article.sections[0].heading, "History");
//! ```

use crate::article::SectionedArticle;
use crate::infobox::{InfoboxConfig, extract_infobox_with_config};
use crate::parse::Document;
use crate::preprocess::{PreprocessConfig, preprocess_html};
use crate::sections::{extract_intro, split_into_sections};
use crate::{Result, WikifoldError};

#[cfg(feature = "fetch")]
use crate::fetch::{FetchConfig, fetch_article};

/// Configuration for the sectioning pipeline.
///
/// # Example
///
/// ```rust
/// use wikifold_core::SectionConfig;
///
/// let config = SectionConfig::builder()
///     .origin("https://de.wikipedia.org")
///     .infobox_selector(r#"[class~="infobox"]"#)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct SectionConfig {
    /// Infobox selector and image-URL origin.
    pub infobox: InfoboxConfig,

    /// Preprocessing applied before the tree is parsed.
    pub preprocess: PreprocessConfig,
}

impl SectionConfig {
    /// Creates a new builder for SectionConfig.
    pub fn builder() -> SectionConfigBuilder {
        SectionConfigBuilder::new()
    }
}

/// Builder for SectionConfig.
///
/// Provides a fluent API for configuring the sectioning pipeline.
pub struct SectionConfigBuilder {
    config: SectionConfig,
}

impl SectionConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: SectionConfig::default() }
    }

    /// Sets the origin used to resolve relative image paths.
    pub fn origin(mut self, value: impl Into<String>) -> Self {
        self.config.infobox.origin = value.into();
        self
    }

    /// Sets the CSS selector locating the infobox element.
    pub fn infobox_selector(mut self, value: impl Into<String>) -> Self {
        self.config.infobox.selector = value.into();
        self
    }

    /// Sets the preprocessing configuration.
    pub fn preprocess(mut self, value: PreprocessConfig) -> Self {
        self.config.preprocess = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> SectionConfig {
        self.config
    }
}

impl Default for SectionConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Main entry point for article sectioning.
///
/// # Example
///
/// ```rust
/// use wikifold_core::Sectioner;
///
/// let sectioner = Sectioner::new();
/// let article = sectioner.section("<body><p>Stub article.</p></body>").unwrap();
/// assert!(article.sections.is_empty());
/// ```
pub struct Sectioner {
    config: SectionConfig,
}

impl Sectioner {
    /// Creates a new Sectioner with default settings.
    pub fn new() -> Self {
        Self { config: SectionConfig::default() }
    }

    /// Creates a new Sectioner with a custom configuration.
    pub fn with_config(config: SectionConfig) -> Self {
        Self { config }
    }

    /// Sections one article HTML document.
    ///
    /// Stages run in a fixed order: the infobox must come out before the
    /// intro/section split, since it is rendered in its own slot and must
    /// never leak into the intro or a section body.
    ///
    /// # Errors
    ///
    /// Returns [`WikifoldError::InvalidInput`] for an empty input string.
    /// Every other input degrades inside the individual stages instead of
    /// erroring, worst case to "the whole document is one unnamed section".
    pub fn section(&self, html: &str) -> Result<SectionedArticle> {
        if html.is_empty() {
            return Err(WikifoldError::InvalidInput);
        }

        let meta = Document::parse(html).map(|doc| doc.extract_page_meta()).unwrap_or_default();

        let cleaned = preprocess_html(html, &self.config.preprocess);
        let infobox = extract_infobox_with_config(&cleaned, &self.config.infobox);
        let intro = extract_intro(&infobox.remaining);
        let sections = split_into_sections(&intro.remaining);

        Ok(SectionedArticle::new(
            infobox.infobox_html,
            infobox.infobox_image,
            intro.intro_html,
            sections,
            meta,
        ))
    }
}

impl Default for Sectioner {
    fn default() -> Self {
        Self::new()
    }
}

/// Sections article HTML with default configuration.
pub fn section_article(html: &str) -> Result<SectionedArticle> {
    Sectioner::new().section(html)
}

/// Sections article HTML with a custom configuration.
pub fn section_article_with_config(html: &str, config: &SectionConfig) -> Result<SectionedArticle> {
    Sectioner::with_config(config.clone()).section(html)
}

/// Fetches an article from the Wikipedia REST API and sections it.
///
/// # Example
///
/// ```rust,no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let article = wikifold_core::fetch_and_section("Caffeine").await?;
/// println!("{} sections", article.sections.len());
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "fetch")]
pub async fn fetch_and_section(title: &str) -> Result<SectionedArticle> {
    let html = fetch_article(title, &FetchConfig::default()).await?;
    section_article(&html)
}

/// Fetches an article and sections it with custom configurations.
#[cfg(feature = "fetch")]
pub async fn fetch_and_section_with_config(
    title: &str, config: &SectionConfig, fetch_config: &FetchConfig,
) -> Result<SectionedArticle> {
    let html = fetch_article(title, fetch_config).await?;
    section_article_with_config(&html, config)
}
