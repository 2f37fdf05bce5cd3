//! HTML parsing and DOM manipulation.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! HTML and navigating the DOM tree using CSS selectors. Parsing is tolerant:
//! malformed markup (unclosed tags, stray text, missing `<body>`) is
//! recovered by the html5ever tree builder rather than reported as an error.
//! Only an empty input string is rejected.
//!
//! Unlike a read-only query layer, [`Document`] also supports detaching nodes
//! in place. Detaching re-links the remaining siblings, so serializing the
//! tree afterwards reflects the removal. This is the primitive the infobox
//! and section extractors are built on.
//!
//! # Example
//!
//! ```rust
//! use wikifold_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h2>History</h2>
//!             <p class="lead">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let headings = doc.select("h2").unwrap();
//! assert_eq!(headings[0].text(), "History");
//! ```

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};

use crate::{Result, WikifoldError};

/// Represents a parsed HTML document.
///
/// A Document wraps an HTML page and provides methods for querying elements
/// using CSS selectors, extracting text, detaching nodes, and serializing the
/// (possibly mutated) tree back to an HTML string.
///
/// # Example
///
/// ```rust
/// use wikifold_core::parse::Document;
///
/// let html = "<html><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// assert!(doc.text_content().contains("Hello"));
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Any syntactically recoverable input produces a document; unclosed tags
    /// and stray text are absorbed by the parser's error recovery.
    ///
    /// # Errors
    ///
    /// Returns [`WikifoldError::InvalidInput`] only when `html` is empty,
    /// signaling to the caller that no HTML was available at all.
    pub fn parse(html: &str) -> Result<Self> {
        if html.is_empty() {
            return Err(WikifoldError::InvalidInput);
        }

        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Gets the entire document as an HTML string.
    ///
    /// Serialization round-trips attribute values and preserves child order,
    /// including the effect of any [`Document::detach`] calls made so far.
    pub fn html(&self) -> String {
        self.html.html()
    }

    /// Gets all text content from the document.
    ///
    /// Returns the concatenation of all text nodes in document order.
    pub fn text_content(&self) -> String {
        self.html.root_element().text().collect()
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Arguments
    ///
    /// * `selector` - A CSS selector string (e.g., `"section"`, `".infobox"`,
    ///   `"table[class~=\"infobox\"] img"`)
    ///
    /// # Errors
    ///
    /// Returns [`WikifoldError::HtmlParse`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| WikifoldError::HtmlParse(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first element matching a CSS selector, if any.
    ///
    /// # Errors
    ///
    /// Returns [`WikifoldError::HtmlParse`] if the selector is invalid.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| WikifoldError::HtmlParse(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).next().map(|el| Element { element: el }))
    }

    /// Gets the `<body>` element.
    ///
    /// The parser synthesizes a body even for fragments, so this only returns
    /// `None` for degenerate documents (e.g., whitespace-only input).
    pub fn body(&'_ self) -> Option<Element<'_>> {
        self.select_first("body").ok().flatten()
    }

    /// Re-wraps a node id as an [`Element`], if the node is an element.
    ///
    /// Node ids stay valid across [`Document::detach`] calls, so this is how
    /// extraction code gets a fresh handle on a subtree after mutating it.
    pub fn element(&'_ self, id: NodeId) -> Option<Element<'_>> {
        self.html.tree.get(id).and_then(ElementRef::wrap).map(|element| Element { element })
    }

    /// Gets the ordered child node ids of a node.
    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.html.tree.get(id).map(|node| node.children().map(|c| c.id()).collect()).unwrap_or_default()
    }

    /// Serializes a single node: outer HTML for elements, the raw text for
    /// text nodes, and an empty string for comments and other node kinds.
    pub fn node_html(&self, id: NodeId) -> String {
        let Some(node) = self.html.tree.get(id) else {
            return String::new();
        };

        if let Some(element) = ElementRef::wrap(node) {
            return element.html();
        }

        match node.value() {
            scraper::Node::Text(text) => text.to_string(),
            _ => String::new(),
        }
    }

    /// Detaches a node from its parent, re-linking the remaining siblings.
    ///
    /// The node (and its subtree) stays addressable by id, so it can still be
    /// serialized on its own. Detaching an already-detached node is a no-op.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// A wrapper around scraper's ElementRef for easier DOM navigation.
///
/// Element represents a single node in the HTML document tree and provides
/// methods for accessing its attributes, text content, and subtree, plus the
/// node id needed to mutate it through [`Document::detach`].
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the id of the underlying tree node.
    pub fn id(&self) -> NodeId {
        self.element.id()
    }

    /// Gets the inner HTML of this element.
    pub fn inner_html(&self) -> String {
        self.element.inner_html()
    }

    /// Gets the outer HTML of this element, including its own tags.
    pub fn outer_html(&self) -> String {
        self.element.html()
    }

    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute, or `None` if not present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`WikifoldError::HtmlParse`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel =
            Selector::parse(selector).map_err(|e| WikifoldError::HtmlParse(format!("Invalid selector: {}", e)))?;

        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first matching descendant element, if any.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'a>>> {
        Ok(self.select(selector)?.into_iter().next())
    }

    /// Gets the element ancestors of this node, nearest first.
    pub fn ancestors(&self) -> Vec<Element<'a>> {
        self.element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .map(|element| Element { element })
            .collect()
    }
}
