//! Intro/section splitting.
//!
//! Given infobox-free article HTML, [`extract_intro`] separates the lead
//! content (everything before the first second-level heading) from the rest,
//! and [`split_into_sections`] partitions the rest into named sections, one
//! per `h2`-level heading, in document order.
//!
//! Two document shapes are handled by a single sweep over the top-level
//! children of the body. Wikipedia's modern HTML wraps each logical section
//! in an explicit `<section>` container, so a container holding an `h2`
//! becomes one section with the heading element stripped from its body. Flat
//! documents without container wrapping fall back to bucketing the top-level
//! siblings between heading boundaries. Nested sub-headings (`h3`, `h4`, …)
//! are never split out; they stay inline in their section's markup.
//!
//! Both functions are total. Any internal failure degrades to a documented
//! fallback (the whole input as intro, or the whole input as one unnamed
//! section) so the rendering layer always receives something renderable. A
//! document with no second-level heading at all is a valid stub article:
//! everything is intro and the section list is empty.

use ego_tree::NodeId;
use serde::Serialize;

use crate::Result;
use crate::parse::Document;

/// Reserved section id for the article intro slot.
pub const INTRO_SECTION_ID: &str = "intro";

/// Reserved section id for the infobox slot.
pub const INFOBOX_SECTION_ID: &str = "infobox";

/// Heading used when a section has no usable heading text.
pub const FALLBACK_HEADING: &str = "Content";

/// Heading tags that open a new section. `h1` counts as "same or higher
/// level" and therefore also terminates the preceding section.
const SECTION_HEADING_TAGS: &[&str] = &["h1", "h2"];

/// Wikipedia's explicit per-section wrapper element.
const SECTION_CONTAINER_TAG: &str = "section";

/// One named article section.
///
/// Sections are value types: produced in document order, immutable after
/// construction, with ids stable only within a single extraction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Positional id (`section-0`, `section-1`, …) or a reserved id
    /// (`intro`, `infobox`)
    pub id: String,
    /// Trimmed heading text, or [`FALLBACK_HEADING`] when absent
    pub heading: String,
    /// Serialized section markup with the heading element removed
    pub html: String,
}

impl Section {
    pub(crate) fn numbered(index: usize, heading: String, html: String) -> Self {
        Self { id: format!("section-{}", index), heading, html }
    }
}

/// The result of splitting the intro from the rest of the article
#[derive(Debug, Clone)]
pub struct IntroSplit {
    /// Lead content appearing before the first second-level heading
    pub intro_html: String,
    /// Everything from the first second-level heading onward
    pub remaining: String,
}

/// Split article HTML into the intro and the remainder.
///
/// The intro is everything before the first top-level `h2` (or the first
/// `<section>` container holding one). When no such boundary exists the whole
/// document is the intro and `remaining` is empty. Never fails: degraded
/// input produces the whole input as intro.
pub fn extract_intro(html: &str) -> IntroSplit {
    try_extract_intro(html)
        .unwrap_or_else(|_| IntroSplit { intro_html: html.to_string(), remaining: String::new() })
}

/// Split post-intro HTML into an ordered list of named sections.
///
/// Ids are assigned positionally after dropping sections whose markup is
/// empty once the heading is removed (a heading immediately followed by
/// another heading produces no entry). Never fails: degraded input collapses
/// to a single section carrying the whole input under [`FALLBACK_HEADING`].
pub fn split_into_sections(html: &str) -> Vec<Section> {
    if html.trim().is_empty() {
        return Vec::new();
    }

    try_split_into_sections(html).unwrap_or_else(|_| {
        vec![Section::numbered(0, FALLBACK_HEADING.to_string(), html.to_string())]
    })
}

fn try_extract_intro(html: &str) -> Result<IntroSplit> {
    let doc = Document::parse(html)?;

    let Some(body) = doc.body() else {
        return Ok(IntroSplit { intro_html: html.to_string(), remaining: String::new() });
    };

    let children = doc.child_ids(body.id());
    let Some(boundary) = children.iter().position(|id| is_section_boundary(&doc, *id)) else {
        return Ok(IntroSplit { intro_html: html.to_string(), remaining: String::new() });
    };

    let intro_html: String = children[..boundary].iter().map(|id| doc.node_html(*id)).collect();
    let remaining: String = children[boundary..].iter().map(|id| doc.node_html(*id)).collect();

    Ok(IntroSplit { intro_html, remaining })
}

/// A top-level node opens a new section when it is a second-level heading
/// itself, or a section container holding one anywhere in its subtree.
fn is_section_boundary(doc: &Document, id: NodeId) -> bool {
    let Some(el) = doc.element(id) else {
        return false;
    };

    let tag = el.tag_name();
    if SECTION_HEADING_TAGS.contains(&tag.as_str()) {
        return true;
    }

    tag == SECTION_CONTAINER_TAG && container_heading_id(doc, id).is_some()
}

/// First `h1`/`h2` inside a section container, at any depth.
fn container_heading_id(doc: &Document, container_id: NodeId) -> Option<NodeId> {
    let container = doc.element(container_id)?;
    container.select_first("h1, h2").ok().flatten().map(|h| h.id())
}

struct RawSection {
    heading: String,
    html: String,
}

fn try_split_into_sections(html: &str) -> Result<Vec<Section>> {
    let mut doc = Document::parse(html)?;

    let Some(body) = doc.body() else {
        return Ok(Vec::new());
    };

    let children = doc.child_ids(body.id());
    let mut sections: Vec<RawSection> = Vec::new();
    let mut current: Option<RawSection> = None;
    let mut leading = String::new();

    for id in children {
        let Some(tag) = doc.element(id).map(|el| el.tag_name()) else {
            append_chunk(&mut current, &mut leading, &doc.node_html(id));
            continue;
        };

        if SECTION_HEADING_TAGS.contains(&tag.as_str()) {
            // Flat document: the heading opens a new bucket and is itself
            // excluded from the section body.
            let heading = doc.element(id).map(|el| el.text().trim().to_string()).unwrap_or_default();
            if let Some(done) = current.take() {
                sections.push(done);
            }
            current = Some(RawSection { heading: heading_or_fallback(heading), html: String::new() });
            continue;
        }

        if tag == SECTION_CONTAINER_TAG
            && let Some(heading_id) = container_heading_id(&doc, id)
        {
            let heading =
                doc.element(heading_id).map(|el| el.text().trim().to_string()).unwrap_or_default();

            doc.detach(heading_id);
            let body_html = doc.element(id).map(|el| el.inner_html()).unwrap_or_default();

            if let Some(done) = current.take() {
                sections.push(done);
            }
            current = Some(RawSection { heading: heading_or_fallback(heading), html: body_html });
            continue;
        }

        // A container without a heading, or any other element: content
        // belongs to the section in progress. Dropping it would lose text.
        let chunk = doc.node_html(id);
        append_chunk(&mut current, &mut leading, &chunk);
    }

    if let Some(done) = current.take() {
        sections.push(done);
    }

    // Stray content before the first heading keeps its own unnamed entry.
    if !leading.trim().is_empty() {
        sections.insert(0, RawSection { heading: FALLBACK_HEADING.to_string(), html: leading });
    }

    Ok(sections
        .into_iter()
        .filter(|s| !s.html.trim().is_empty())
        .enumerate()
        .map(|(i, s)| Section::numbered(i, s.heading, s.html))
        .collect())
}

fn append_chunk(current: &mut Option<RawSection>, leading: &mut String, chunk: &str) {
    match current.as_mut() {
        Some(section) => section.html.push_str(chunk),
        None => leading.push_str(chunk),
    }
}

fn heading_or_fallback(heading: String) -> String {
    if heading.is_empty() { FALLBACK_HEADING.to_string() } else { heading }
}
