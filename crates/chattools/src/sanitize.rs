//! HTML sanitization and parsing
//!
//! Executable markup is stripped from the raw string before parsing, so
//! traversal of the resulting tree never sees attacker-controlled script.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// `<script>`/`<noscript>` blocks, including their contents
static SCRIPT_BLOCKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|noscript)\b[^>]*>.*?</(script|noscript)\s*>").unwrap()
});

/// Unbalanced script tags left over after block removal
static STRAY_SCRIPT_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?(script|noscript)\b[^>]*>").unwrap());

/// Inline event-handler attributes (`onclick=`, `onload=`, ...)
static EVENT_HANDLERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\son[a-z]+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).unwrap());

/// `javascript:` URLs in href/src attributes
static JAVASCRIPT_URLS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\s(href|src)\s*=\s*("\s*javascript:[^"]*"|'\s*javascript:[^']*'|javascript:[^\s>]+)"#,
    )
    .unwrap()
});

/// Remove executable constructs from raw HTML.
///
/// Best effort by design: the passes are plain string rewrites, and any
/// markup they miss is still neutralized by the skip rules of the text
/// extractor downstream.
pub fn sanitize_html(html: &str) -> String {
    let cleaned = SCRIPT_BLOCKS.replace_all(html, "");
    let cleaned = STRAY_SCRIPT_TAGS.replace_all(&cleaned, "");
    let cleaned = EVENT_HANDLERS.replace_all(&cleaned, "");
    JAVASCRIPT_URLS.replace_all(&cleaned, "").into_owned()
}

/// A document tree built from sanitized markup.
///
/// Parsing is permissive html5 semantics: malformed input degrades to a
/// best-effort tree instead of erroring. The tree is read-only.
pub struct SanitizedDocument {
    html: Html,
}

impl SanitizedDocument {
    /// Sanitize and parse an HTML string.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(&sanitize_html(html)),
        }
    }

    /// First element matching a CSS selector.
    ///
    /// Invalid selector strings yield `None`, never a panic.
    pub fn select_first(&self, selector: &str) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(selector).ok()?;
        self.html.select(&selector).next()
    }

    /// Attribute value of the first element matching the selector.
    pub fn attr(&self, selector: &str, name: &str) -> Option<String> {
        self.select_first(selector)?
            .value()
            .attr(name)
            .map(str::to_string)
    }

    /// Trimmed text content of the first element matching the selector.
    pub fn text(&self, selector: &str) -> Option<String> {
        let element = self.select_first(selector)?;
        let text: String = element.text().collect();
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_blocks_removed() {
        let html = "<p>Before</p><script>alert('bad');</script><p>After</p>";
        let cleaned = sanitize_html(html);
        assert!(!cleaned.contains("alert"));
        assert!(cleaned.contains("Before"));
        assert!(cleaned.contains("After"));
    }

    #[test]
    fn test_unclosed_script_tag_removed() {
        let cleaned = sanitize_html("<p>Hi</p><script src=\"x.js\">");
        assert!(!cleaned.contains("<script"));
        assert!(cleaned.contains("Hi"));
    }

    #[test]
    fn test_event_handler_absent_from_tree() {
        let doc = SanitizedDocument::parse(r#"<button onclick="evil()" id="go">Go</button>"#);
        let button = doc.select_first("#go").unwrap();
        assert!(button.value().attr("onclick").is_none());
        assert_eq!(button.value().attr("id"), Some("go"));
    }

    #[test]
    fn test_javascript_url_removed() {
        let doc = SanitizedDocument::parse(r#"<a href="javascript:evil()" id="x">link</a>"#);
        let link = doc.select_first("#x").unwrap();
        assert!(link.value().attr("href").is_none());
    }

    #[test]
    fn test_plain_href_survives() {
        let doc = SanitizedDocument::parse(r#"<a href="https://example.com" id="x">link</a>"#);
        assert_eq!(
            doc.attr("#x", "href"),
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn test_malformed_html_degrades_gracefully() {
        let doc = SanitizedDocument::parse("<p>unclosed <div><span>nested");
        assert!(doc.select_first("span").is_some());
    }

    #[test]
    fn test_invalid_selector_yields_none() {
        let doc = SanitizedDocument::parse("<p>text</p>");
        assert!(doc.select_first("p[[").is_none());
        assert!(doc.attr("p[[", "id").is_none());
    }

    #[test]
    fn test_attr_lookup() {
        let doc = SanitizedDocument::parse(
            r#"<head><meta itemprop="name" content="A Title"></head>"#,
        );
        assert_eq!(
            doc.attr(r#"meta[itemprop="name"]"#, "content"),
            Some("A Title".to_string())
        );
        assert_eq!(doc.attr(r#"meta[itemprop="missing"]"#, "content"), None);
    }

    #[test]
    fn test_text_lookup() {
        let doc = SanitizedDocument::parse("<title>  My Page  </title>");
        assert_eq!(doc.text("title"), Some("My Page".to_string()));
        assert_eq!(doc.text("h1"), None);
    }
}
