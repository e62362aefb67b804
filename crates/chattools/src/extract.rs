//! Readable text and metadata extraction over sanitized documents

use crate::sanitize::SanitizedDocument;
use crate::types::TranscriptResponse;
use scraper::node::Element;
use scraper::ElementRef;
use serde::Deserialize;

/// Elements whose contents are never readable text
const SKIP_TAGS: &[&str] = &[
    "script", "style", "noscript", "iframe", "svg", "template", "head",
];

/// Elements that end a line of readable text
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "h1", "h2", "h3", "h4", "h5", "h6", "li", "tr", "section", "article",
    "header", "footer", "blockquote", "pre", "table", "ul", "ol",
];

/// Render the subtree at `root_selector` as a single readable string.
///
/// Returns an empty string when nothing matches the selector. The document
/// is not mutated.
pub fn readable_text(doc: &SanitizedDocument, root_selector: &str) -> String {
    match doc.select_first(root_selector) {
        Some(root) => {
            let mut out = String::new();
            collect_text(&root, &mut out);
            clean_whitespace(&out)
        }
        None => String::new(),
    }
}

fn collect_text(element: &ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(el) = child.value().as_element() {
            let tag = el.name();
            if SKIP_TAGS.contains(&tag) || is_hidden(el) {
                continue;
            }
            if let Some(child_ref) = ElementRef::wrap(child) {
                collect_text(&child_ref, out);
                if BLOCK_TAGS.contains(&tag) {
                    out.push('\n');
                }
            }
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
}

fn is_hidden(el: &Element) -> bool {
    if el.attr("hidden").is_some() || el.attr("aria-hidden") == Some("true") {
        return true;
    }
    if let Some(style) = el.attr("style") {
        if style.to_lowercase().replace(' ', "").contains("display:none") {
            return true;
        }
    }
    false
}

/// Collapse whitespace runs, trim, keep at most two consecutive newlines.
pub fn clean_whitespace(s: &str) -> String {
    let mut result = String::new();
    let mut last_was_space = false;
    let mut newline_count = 0;

    for c in s.chars() {
        if c == '\n' {
            if last_was_space && result.ends_with(' ') {
                result.pop();
            }
            newline_count += 1;
            last_was_space = true;
            if newline_count <= 2 {
                result.push(c);
            }
        } else if c.is_whitespace() {
            newline_count = 0;
            if !last_was_space {
                result.push(' ');
                last_was_space = true;
            }
        } else {
            newline_count = 0;
            last_was_space = false;
            result.push(c);
        }
    }

    result.trim().to_string()
}

/// Optional metadata scraped from a video watch page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub upload_date: Option<String>,
    pub author: Option<String>,
    pub views: Option<String>,
}

/// Look up the fixed itemprop selector/attribute pairs of a watch page.
///
/// Any selector with no match yields an absent field, never an error.
pub fn video_metadata(doc: &SanitizedDocument) -> VideoMetadata {
    VideoMetadata {
        title: doc.attr(r#"meta[itemprop="name"]"#, "content"),
        description: doc.attr(r#"meta[itemprop="description"]"#, "content"),
        upload_date: doc.attr(r#"meta[itemprop="uploadDate"]"#, "content"),
        author: doc.attr(r#"link[itemprop="name"]"#, "content"),
        views: doc.attr(r#"meta[itemprop="interactionCount"]"#, "content"),
    }
}

/// A transcript backend body, decided by a validation step: either the
/// structured JSON shape the backend emits, or the body verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptPayload {
    /// Valid JSON body with transcript text and watch-page markup
    Structured {
        transcript: Option<String>,
        html: Option<String>,
    },
    /// Anything else, passed through untouched
    Raw(String),
}

#[derive(Deserialize)]
struct StructuredBody {
    transcript: Option<String>,
    html: Option<String>,
}

/// Classify a backend body as structured or raw.
pub fn parse_transcript_payload(body: &str) -> TranscriptPayload {
    match serde_json::from_str::<StructuredBody>(body) {
        Ok(parsed) => TranscriptPayload::Structured {
            transcript: parsed.transcript,
            html: parsed.html,
        },
        Err(_) => TranscriptPayload::Raw(body.to_string()),
    }
}

/// Turn a backend transcript body into the tool response.
///
/// Raw bodies land verbatim in the `transcript` field; this is the
/// deliberate fallback for backends that return plain text.
pub fn transcript_response(body: &str) -> TranscriptResponse {
    match parse_transcript_payload(body) {
        TranscriptPayload::Structured { transcript, html } => {
            let meta = html
                .as_deref()
                .map(|html| video_metadata(&SanitizedDocument::parse(html)))
                .unwrap_or_default();
            TranscriptResponse {
                title: meta.title,
                date: meta.upload_date,
                views: meta.views,
                author: meta.author,
                description: meta.description,
                transcript,
            }
        }
        TranscriptPayload::Raw(text) => TranscriptResponse {
            transcript: Some(text),
            ..Default::default()
        },
    }
}
