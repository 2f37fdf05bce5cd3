//! Infobox extraction.
//!
//! A Wikipedia infobox is the summary table carrying an `infobox` class,
//! typically rendered top-right of an article. The reading client shows it in
//! its own slot (never inside the intro or a section body) and surfaces its
//! lead image separately, so this module pulls the first infobox out of the
//! document, captures the lead image's metadata, removes the image's table
//! row from the infobox markup, and returns the article with the infobox
//! detached.
//!
//! [`extract_infobox`] is a total function: malformed markup, a missing
//! infobox, or a broken image `src` all degrade to a well-formed result
//! instead of an error. Most short articles simply have no infobox.
//!
//! # Example
//!
//! ```rust
//! use wikifold_core::infobox::extract_infobox;
//!
//! let html = r#"<body><table class="infobox"><tbody><tr><td>Born 1879</td></tr></tbody></table><p>Lead</p></body>"#;
//! let extract = extract_infobox(html);
//!
//! assert!(extract.infobox_html.contains("Born 1879"));
//! assert!(!extract.remaining.contains("infobox"));
//! ```

use serde::Serialize;
use url::Url;

use crate::Result;
use crate::parse::Document;

/// Default selector for the infobox element: any element carrying an
/// `infobox` class word (`class="infobox vcard"` matches,
/// `class="infobox-caption"` does not).
pub const DEFAULT_INFOBOX_SELECTOR: &str = r#"[class~="infobox"]"#;

/// Default origin for resolving root-relative and bare-relative image paths.
pub const DEFAULT_WIKI_ORIGIN: &str = "https://en.wikipedia.org";

/// Fallback image width in pixels when the attribute is absent or unparseable.
pub const DEFAULT_IMAGE_WIDTH: u32 = 400;

/// Fallback image height in pixels when the attribute is absent or unparseable.
pub const DEFAULT_IMAGE_HEIGHT: u32 = 300;

/// Configuration for infobox extraction
#[derive(Debug, Clone)]
pub struct InfoboxConfig {
    /// CSS selector locating the infobox element
    pub selector: String,
    /// Origin used to resolve relative image `src` values
    pub origin: String,
}

impl Default for InfoboxConfig {
    fn default() -> Self {
        Self { selector: DEFAULT_INFOBOX_SELECTOR.to_string(), origin: DEFAULT_WIKI_ORIGIN.to_string() }
    }
}

/// Metadata for the infobox lead image.
///
/// Produced at most once per article, from the first `<img>` inside the
/// infobox. The `src` is guaranteed absolute and `https`-schemed; a renderer
/// never needs to apply its own protocol resolution to this field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoboxImage {
    /// Absolute image URL, always `https`
    pub src: String,
    /// Display text for the image
    pub alt: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// The result of infobox extraction
#[derive(Debug, Clone)]
pub struct InfoboxExtract {
    /// Serialized infobox markup with the lead image's row removed, or an
    /// empty string when the article has no infobox
    pub infobox_html: String,
    /// Lead image metadata, if the infobox carried one
    pub infobox_image: Option<InfoboxImage>,
    /// The article with the infobox element removed
    pub remaining: String,
}

impl InfoboxExtract {
    fn absent(html: &str) -> Self {
        Self { infobox_html: String::new(), infobox_image: None, remaining: html.to_string() }
    }
}

/// Extract the first infobox from article HTML using default configuration.
///
/// Never fails: when no infobox exists (or the input is degenerate), the
/// result carries an empty `infobox_html`, no image, and the input unchanged
/// as `remaining`.
pub fn extract_infobox(html: &str) -> InfoboxExtract {
    extract_infobox_with_config(html, &InfoboxConfig::default())
}

/// Extract the first infobox using a custom selector and origin.
///
/// Only the first element matching the selector is treated as *the* infobox;
/// any later matches are left in `remaining` untouched.
pub fn extract_infobox_with_config(html: &str, config: &InfoboxConfig) -> InfoboxExtract {
    try_extract_infobox(html, config).unwrap_or_else(|_| InfoboxExtract::absent(html))
}

fn try_extract_infobox(html: &str, config: &InfoboxConfig) -> Result<InfoboxExtract> {
    let mut doc = Document::parse(html)?;

    let Some(infobox) = doc.select_first(&config.selector)? else {
        return Ok(InfoboxExtract::absent(html));
    };

    let infobox_id = infobox.id();
    let image = find_lead_image(&doc, config)?;

    if let Some((_, removal_id)) = &image {
        doc.detach(*removal_id);
    }

    let infobox_html = doc.element(infobox_id).map(|el| el.outer_html()).unwrap_or_default();

    doc.detach(infobox_id);
    let remaining = doc.html();

    Ok(InfoboxExtract { infobox_html, infobox_image: image.map(|(img, _)| img), remaining })
}

/// Locate the first image inside the infobox and work out which node to
/// remove: the nearest enclosing table row, so an emptied row leaves no
/// visual gap, or the bare image when no row encloses it.
///
/// Returns `None` when there is no image or its `src` cannot be resolved; in
/// the latter case the image stays in the infobox markup, since without
/// metadata the renderer has no lead-image slot to show it in.
fn find_lead_image(doc: &Document, config: &InfoboxConfig) -> Result<Option<(InfoboxImage, ego_tree::NodeId)>> {
    let Some(infobox) = doc.select_first(&config.selector)? else {
        return Ok(None);
    };

    let Some(img) = infobox.select_first("img")? else {
        return Ok(None);
    };

    let Some(src) = img.attr("src").and_then(|src| resolve_image_src(src, &config.origin)) else {
        return Ok(None);
    };

    let alt = image_alt_text(&img, &src);
    let width = parse_dimension(img.attr("width"), DEFAULT_IMAGE_WIDTH);
    let height = parse_dimension(img.attr("height"), DEFAULT_IMAGE_HEIGHT);

    let mut removal_id = img.id();
    for ancestor in img.ancestors() {
        if ancestor.id() == infobox.id() {
            break;
        }
        if ancestor.tag_name() == "tr" {
            removal_id = ancestor.id();
            break;
        }
    }

    Ok(Some((InfoboxImage { src, alt, width, height }, removal_id)))
}

/// Resolve an image `src` to an absolute `https` URL.
///
/// Handles protocol-relative (`//upload.wikimedia.org/...`), root-relative
/// (`/wiki/...`), and bare-relative paths by joining against the configured
/// origin; an `http` scheme is upgraded to `https`. Returns `None` for
/// malformed values and non-web schemes.
fn resolve_image_src(src: &str, origin: &str) -> Option<String> {
    let src = src.trim();
    if src.is_empty() {
        return None;
    }

    let base = Url::parse(origin).ok()?;
    let mut resolved = base.join(src).ok()?;

    if resolved.scheme() == "http" {
        resolved.set_scheme("https").ok()?;
    }
    if resolved.scheme() != "https" {
        return None;
    }

    Some(resolved.to_string())
}

/// Alt text fallback chain: explicit `alt` attribute, then caption-like
/// attributes, then a name derived from the `src` filename.
fn image_alt_text(img: &crate::parse::Element<'_>, src: &str) -> String {
    for attr in ["alt", "data-caption", "title", "aria-label"] {
        if let Some(value) = img.attr(attr) {
            let value = value.trim();
            if !value.is_empty() {
                return value.to_string();
            }
        }
    }

    filename_from_src(src)
}

/// Derive a readable name from the last path segment of an image URL:
/// `.../Albert_Einstein_1921.jpg` becomes `Albert Einstein 1921`.
fn filename_from_src(src: &str) -> String {
    let segment = src
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .rsplit('/')
        .next()
        .unwrap_or_default();

    let stem = segment.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(segment);
    stem.replace('_', " ")
}

fn parse_dimension(value: Option<&str>, fallback: u32) -> u32 {
    value.and_then(|v| v.trim().parse::<u32>().ok()).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INFOBOX_ARTICLE: &str = r#"
        <body>
            <table class="infobox vcard">
                <tbody>
                    <tr><th>Caffeine</th></tr>
                    <tr><td><img src="//upload.wikimedia.org/caffeine.png" alt="Structure" width="220" height="180"></td></tr>
                    <tr><td>Stimulant</td></tr>
                </tbody>
            </table>
            <p>Caffeine is a central nervous system stimulant.</p>
        </body>
    "#;

    #[test]
    fn test_extract_infobox_with_image() {
        let extract = extract_infobox(INFOBOX_ARTICLE);

        let image = extract.infobox_image.expect("image should be extracted");
        assert_eq!(image.src, "https://upload.wikimedia.org/caffeine.png");
        assert_eq!(image.alt, "Structure");
        assert_eq!(image.width, 220);
        assert_eq!(image.height, 180);
    }

    #[test]
    fn test_image_row_removed_from_infobox_html() {
        let extract = extract_infobox(INFOBOX_ARTICLE);

        assert!(!extract.infobox_html.contains("<img"));
        assert!(extract.infobox_html.contains("Caffeine"));
        assert!(extract.infobox_html.contains("Stimulant"));
    }

    #[test]
    fn test_infobox_removed_from_remaining() {
        let extract = extract_infobox(INFOBOX_ARTICLE);

        assert!(!extract.remaining.contains("infobox"));
        assert!(extract.remaining.contains("central nervous system"));
    }

    #[test]
    fn test_no_infobox_is_not_an_error() {
        let html = "<body><p>Just a stub article.</p></body>";
        let extract = extract_infobox(html);

        assert_eq!(extract.infobox_html, "");
        assert!(extract.infobox_image.is_none());
        assert_eq!(extract.remaining, html);
    }

    #[test]
    fn test_infobox_without_image() {
        let html = r#"<body><div class="infobox"><p>Founded 1921</p></div><p>Lead</p></body>"#;
        let extract = extract_infobox(html);

        assert!(extract.infobox_html.contains("Founded 1921"));
        assert!(extract.infobox_image.is_none());
    }

    #[test]
    fn test_only_first_infobox_extracted() {
        let html = r#"
            <body>
                <table class="infobox"><tbody><tr><td>First</td></tr></tbody></table>
                <table class="infobox"><tbody><tr><td>Second</td></tr></tbody></table>
            </body>
        "#;
        let extract = extract_infobox(html);

        assert!(extract.infobox_html.contains("First"));
        assert!(!extract.infobox_html.contains("Second"));
        assert!(extract.remaining.contains("Second"));
    }

    #[test]
    fn test_malformed_src_keeps_infobox_text() {
        let html = r#"<body><div class="infobox"><img src="   "><p>Population 5000</p></div></body>"#;
        let extract = extract_infobox(html);

        assert!(extract.infobox_image.is_none());
        assert!(extract.infobox_html.contains("Population 5000"));
    }

    #[test]
    fn test_data_url_rejected() {
        let html = r#"<body><div class="infobox"><img src="data:image/gif;base64,R0lGOD"></div></body>"#;
        let extract = extract_infobox(html);

        assert!(extract.infobox_image.is_none());
    }

    #[test]
    fn test_image_without_row_container() {
        let html = r#"<body><div class="infobox"><img src="/static/portrait.jpg" alt="Portrait"></div></body>"#;
        let extract = extract_infobox(html);

        let image = extract.infobox_image.expect("image should be extracted");
        assert_eq!(image.src, "https://en.wikipedia.org/static/portrait.jpg");
        assert!(!extract.infobox_html.contains("<img"));
    }

    #[test]
    fn test_dimension_defaults() {
        let html = r#"<body><div class="infobox"><img src="//upload.wikimedia.org/x.png" width="oops"></div></body>"#;
        let extract = extract_infobox(html);

        let image = extract.infobox_image.expect("image should be extracted");
        assert_eq!(image.width, DEFAULT_IMAGE_WIDTH);
        assert_eq!(image.height, DEFAULT_IMAGE_HEIGHT);
    }

    #[test]
    fn test_alt_fallback_to_caption_attribute() {
        let html = r#"<body><div class="infobox"><img src="//u.org/x.png" data-caption="City skyline"></div></body>"#;
        let extract = extract_infobox(html);

        assert_eq!(extract.infobox_image.unwrap().alt, "City skyline");
    }

    #[test]
    fn test_alt_fallback_to_filename() {
        let html = r#"<body><div class="infobox"><img src="//u.org/Albert_Einstein_1921.jpg"></div></body>"#;
        let extract = extract_infobox(html);

        assert_eq!(extract.infobox_image.unwrap().alt, "Albert Einstein 1921");
    }

    #[test]
    fn test_empty_input_falls_back() {
        let extract = extract_infobox("");

        assert_eq!(extract.infobox_html, "");
        assert!(extract.infobox_image.is_none());
        assert_eq!(extract.remaining, "");
    }

    #[test]
    fn test_resolve_image_src_forms() {
        let origin = DEFAULT_WIKI_ORIGIN;

        assert_eq!(
            resolve_image_src("//upload.wikimedia.org/a.png", origin),
            Some("https://upload.wikimedia.org/a.png".to_string())
        );
        assert_eq!(
            resolve_image_src("/wiki/File:A.png", origin),
            Some("https://en.wikipedia.org/wiki/File:A.png".to_string())
        );
        assert_eq!(
            resolve_image_src("thumb/a.png", origin),
            Some("https://en.wikipedia.org/thumb/a.png".to_string())
        );
        assert_eq!(
            resolve_image_src("http://upload.wikimedia.org/a.png", origin),
            Some("https://upload.wikimedia.org/a.png".to_string())
        );
        assert_eq!(resolve_image_src("", origin), None);
    }

    #[test]
    fn test_filename_from_src_strips_query() {
        assert_eq!(filename_from_src("https://u.org/Eiffel_Tower.jpg?width=200"), "Eiffel Tower");
    }
}
