use serde::Serialize;

use crate::Document;

/// Page metadata extracted from an article document's head
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageMeta {
    pub title: Option<String>,
    pub language: Option<String>,
    pub canonical_url: Option<String>,
    pub description: Option<String>,
}

impl Document {
    /// Extract title with priority fallback:
    /// 1. Open Graph `og:title`
    /// 2. `<title>` element
    /// 3. First `<h1>` element
    pub fn extract_title(&self) -> Option<String> {
        if let Some(title) = self.get_meta_content("og:title") {
            return Some(title);
        }

        if let Ok(Some(title)) = self.select_first("title") {
            let text = title.text();
            let text = text.trim();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }

        if let Ok(elements) = self.select("h1")
            && let Some(first) = elements.first()
        {
            let text = first.text();
            let text = text.trim();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }

        None
    }

    /// Extract the document language from `<html lang>`.
    pub fn extract_language(&self) -> Option<String> {
        let html = self.select_first("html").ok().flatten()?;
        let lang = html.attr("lang")?.trim();
        if lang.is_empty() { None } else { Some(lang.to_string()) }
    }

    /// Extract the canonical article URL:
    /// 1. `<link rel="canonical">`
    /// 2. `<base href>` (Wikipedia's REST HTML carries the wiki base here)
    pub fn extract_canonical_url(&self) -> Option<String> {
        if let Ok(Some(link)) = self.select_first(r#"link[rel="canonical"]"#)
            && let Some(href) = link.attr("href")
            && !href.trim().is_empty()
        {
            return Some(href.trim().to_string());
        }

        if let Ok(Some(base)) = self.select_first("base")
            && let Some(href) = base.attr("href")
            && !href.trim().is_empty()
        {
            return Some(href.trim().to_string());
        }

        None
    }

    /// Extract a short description:
    /// 1. Open Graph `og:description`
    /// 2. Meta `description`
    pub fn extract_description(&self) -> Option<String> {
        self.get_meta_content("og:description").or_else(|| self.get_meta_content("description"))
    }

    /// Extract all page metadata in one pass.
    pub fn extract_page_meta(&self) -> PageMeta {
        PageMeta {
            title: self.extract_title(),
            language: self.extract_language(),
            canonical_url: self.extract_canonical_url(),
            description: self.extract_description(),
        }
    }

    /// Gets meta tag content by `name` or `property` attribute.
    fn get_meta_content(&self, name: &str) -> Option<String> {
        for attr in ["name", "property"] {
            let selector = format!(r#"meta[{}="{}"]"#, attr, name);
            if let Ok(Some(meta)) = self.select_first(&selector)
                && let Some(content) = meta.attr("content")
            {
                let content = content.trim();
                if !content.is_empty() {
                    return Some(content.to_string());
                }
            }
        }

        None
    }
}
