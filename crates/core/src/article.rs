//! Sectioned article output type with renderer slots and format conversion.
//!
//! This module defines the [`SectionedArticle`] struct which represents the
//! complete result of sectioning one article: the detached infobox and its
//! lead image, the intro, the ordered named sections, page metadata, and
//! derived reading metrics.

use serde::Serialize;

use crate::infobox::InfoboxImage;
use crate::metadata::PageMeta;
use crate::parse::Document;
use crate::sections::{INFOBOX_SECTION_ID, INTRO_SECTION_ID, Section};
use crate::{Result, WikifoldError};

/// Markup used for the intro slot when an article genuinely has no lead
/// content. The intro is the default-expanded entry point and must always
/// render something.
pub const EMPTY_INTRO_PLACEHOLDER: &str = "<p>No article text.</p>";

/// Output format options for sectioned article content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Structured JSON (the full article, serialized).
    Json,
    /// Plain text outline (headings and stripped section text).
    Text,
    /// Concatenated slot HTML.
    Html,
}

/// The complete result of sectioning an article HTML document.
///
/// All fields are derived state, recomputed from raw HTML on every call;
/// nothing here outlives a single extraction. Ids in [`Self::sections`] are
/// stable within this result only.
#[derive(Debug, Clone, Serialize)]
pub struct SectionedArticle {
    /// Serialized infobox markup (lead image row removed), empty when the
    /// article has no infobox.
    pub infobox_html: String,

    /// Lead image pulled out of the infobox, if one was present.
    pub infobox_image: Option<InfoboxImage>,

    /// Lead content appearing before the first named section.
    pub intro_html: String,

    /// Named sections in document order.
    pub sections: Vec<Section>,

    /// Page metadata from the document head.
    pub meta: PageMeta,

    /// Word count across intro and section text.
    pub word_count: usize,

    /// Estimated reading time in minutes (assuming 200 words per minute).
    pub reading_time: f64,
}

impl SectionedArticle {
    /// Creates a new SectionedArticle, computing derived reading metrics.
    pub fn new(
        infobox_html: String, infobox_image: Option<InfoboxImage>, intro_html: String, sections: Vec<Section>,
        meta: PageMeta,
    ) -> Self {
        let mut text = html_to_text(&intro_html);
        for section in &sections {
            text.push(' ');
            text.push_str(&html_to_text(&section.html));
        }

        let word_count = count_words(&text);
        let reading_time = word_count as f64 / 200.0;

        Self { infobox_html, infobox_image, intro_html, sections, meta, word_count, reading_time }
    }

    /// The ordered slot list a rendering collaborator consumes.
    ///
    /// An `infobox` slot first when present (a non-accordion slot), then the
    /// always-present `intro` slot (placeholder markup when the article has
    /// no lead text), then the named sections. Reserved slots carry an empty
    /// heading; the renderer does not title them.
    pub fn slots(&self) -> Vec<Section> {
        let mut slots = Vec::with_capacity(self.sections.len() + 2);

        if !self.infobox_html.trim().is_empty() {
            slots.push(Section {
                id: INFOBOX_SECTION_ID.to_string(),
                heading: String::new(),
                html: self.infobox_html.clone(),
            });
        }

        let intro_html = if self.intro_html.trim().is_empty() {
            EMPTY_INTRO_PLACEHOLDER.to_string()
        } else {
            self.intro_html.clone()
        };
        slots.push(Section { id: INTRO_SECTION_ID.to_string(), heading: String::new(), html: intro_html });

        slots.extend(self.sections.iter().cloned());
        slots
    }

    /// Converts the article to the specified format.
    pub fn to_format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => self.to_json().map(|v| v.to_string()),
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Html => Ok(self.to_html()),
        }
    }

    /// Gets the article as structured JSON.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| WikifoldError::HtmlParse(e.to_string()))
    }

    /// Gets the article as a plain text outline: the title, the intro text,
    /// then each section's heading followed by its stripped text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        if let Some(title) = &self.meta.title {
            out.push_str(title);
            out.push_str("\n\n");
        }

        let intro = html_to_text(&self.intro_html);
        let intro = intro.trim();
        if !intro.is_empty() {
            out.push_str(intro);
            out.push('\n');
        }

        for section in &self.sections {
            out.push('\n');
            out.push_str(&section.heading);
            out.push('\n');
            out.push_str(html_to_text(&section.html).trim());
            out.push('\n');
        }

        out
    }

    /// Gets the article as concatenated slot HTML, in render order.
    pub fn to_html(&self) -> String {
        self.slots().iter().map(|slot| slot.html.as_str()).collect()
    }
}

/// Convert an HTML fragment to plain text by dropping tags
fn html_to_text(html: &str) -> String {
    match Document::parse(html) {
        Ok(doc) => doc.text_content(),
        Err(_) => String::new(),
    }
}

/// Count words in text using a simple regex pattern
fn count_words(text: &str) -> usize {
    use regex::Regex;
    let word_regex = Regex::new(r"\b[\w'-]+\b").unwrap();
    word_regex.find_iter(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_article() -> SectionedArticle {
        SectionedArticle::new(
            r#"<table class="infobox"><tbody><tr><td>Founded 1921</td></tr></tbody></table>"#.to_string(),
            Some(InfoboxImage {
                src: "https://upload.wikimedia.org/x.png".to_string(),
                alt: "Skyline".to_string(),
                width: 220,
                height: 180,
            }),
            "<p>Lead paragraph of the article.</p>".to_string(),
            vec![
                Section {
                    id: "section-0".to_string(),
                    heading: "History".to_string(),
                    html: "<p>History text.</p>".to_string(),
                },
                Section {
                    id: "section-1".to_string(),
                    heading: "Legacy".to_string(),
                    html: "<p>Legacy text.</p>".to_string(),
                },
            ],
            PageMeta { title: Some("Test Article".to_string()), ..Default::default() },
        )
    }

    #[test]
    fn test_slots_order_and_reserved_ids() {
        let article = sample_article();
        let slots = article.slots();

        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0].id, INFOBOX_SECTION_ID);
        assert_eq!(slots[1].id, INTRO_SECTION_ID);
        assert_eq!(slots[2].id, "section-0");
        assert_eq!(slots[3].id, "section-1");
    }

    #[test]
    fn test_slots_skip_missing_infobox() {
        let article = SectionedArticle::new(String::new(), None, "<p>Lead.</p>".to_string(), vec![], PageMeta::default());
        let slots = article.slots();

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].id, INTRO_SECTION_ID);
    }

    #[test]
    fn test_intro_slot_always_present_with_placeholder() {
        let article = SectionedArticle::new(String::new(), None, "   ".to_string(), vec![], PageMeta::default());
        let slots = article.slots();

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].id, INTRO_SECTION_ID);
        assert_eq!(slots[0].html, EMPTY_INTRO_PLACEHOLDER);
    }

    #[test]
    fn test_word_count_and_reading_time() {
        let article = sample_article();

        assert!(article.word_count >= 9);
        assert!(article.reading_time > 0.0);
    }

    #[test]
    fn test_to_text_outline() {
        let article = sample_article();
        let text = article.to_text();

        assert!(text.starts_with("Test Article"));
        assert!(text.contains("Lead paragraph"));
        assert!(text.contains("History\nHistory text."));
        assert!(text.contains("Legacy"));
        assert!(!text.contains("<p>"));
    }

    #[test]
    fn test_to_html_concatenates_slots() {
        let article = sample_article();
        let html = article.to_html();

        assert!(html.starts_with("<table"));
        assert!(html.contains("Lead paragraph"));
        assert!(html.ends_with("<p>Legacy text.</p>"));
    }

    #[test]
    fn test_serialization() {
        let article = sample_article();
        let json = article.to_json().unwrap();

        assert!(json.is_object());
        assert_eq!(json["sections"][0]["heading"], "History");
        assert_eq!(json["infobox_image"]["src"], "https://upload.wikimedia.org/x.png");
        assert_eq!(json["meta"]["title"], "Test Article");
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("hello world"), 2);
        assert_eq!(count_words("one"), 1);
        assert_eq!(count_words(""), 0);
    }
}
