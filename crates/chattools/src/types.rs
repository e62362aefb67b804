//! Core request/response types for the chat tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Request for a YouTube video transcript
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptRequest {
    /// Video URL or bare 11-character video id (required)
    pub url: String,

    /// Preferred transcript language code (optional, backend picks when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl TranscriptRequest {
    /// Create a new request for the given URL or id
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the preferred transcript language
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

/// Transcript text plus optional metadata scraped from the watch page
///
/// Every field may be absent; a missing piece of page markup is not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptResponse {
    /// Video title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Upload date as published in the page metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// View count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<String>,

    /// Channel name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Video description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Transcript text, or the raw backend body when it was not structured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}

/// Request for the readable text of a web page
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PageTextRequest {
    /// The URL to fetch (required, must be http:// or https://)
    pub url: String,

    /// CSS selector of the subtree to read (optional, default "body")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

impl PageTextRequest {
    /// Create a new request for the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the root selector
    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Get the effective root selector (default to "body")
    pub fn effective_root(&self) -> &str {
        self.root.as_deref().unwrap_or("body")
    }
}

/// Readable text extracted from a fetched page
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PageTextResponse {
    /// The fetched URL
    pub url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Page title, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Readable text of the selected subtree
    pub text: String,

    /// True if the body was truncated due to timeout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated: Option<bool>,
}

/// Parameters for the user environment tool (none)
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct EnvironmentRequest {}

/// The user's locale, local date and time, and time zone
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct EnvironmentInfo {
    /// Preferred language tag, e.g. "en-US"
    pub locale: String,

    /// Local date, e.g. "Friday, August 29, 2025"
    pub local_date: String,

    /// Local time in 24-hour format, e.g. "14:03:27"
    pub local_time: String,

    /// Time zone name or UTC offset
    pub time_zone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_request_builder() {
        let req = TranscriptRequest::new("https://youtu.be/dQw4w9WgXcQ").lang("en");
        assert_eq!(req.url, "https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(req.lang, Some("en".to_string()));
    }

    #[test]
    fn test_page_request_effective_root() {
        let req = PageTextRequest::new("https://example.com");
        assert_eq!(req.effective_root(), "body");

        let req = req.root("article");
        assert_eq!(req.effective_root(), "article");
    }

    #[test]
    fn test_transcript_response_serialization() {
        let resp = TranscriptResponse {
            transcript: Some("hello".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&resp).unwrap();
        // Optional None fields should be omitted
        assert!(!json.contains("title"));
        assert!(json.contains("\"transcript\":\"hello\""));
    }

    #[test]
    fn test_page_request_deserialization() {
        let req: PageTextRequest =
            serde_json::from_str(r#"{"url": "https://example.com", "root": "main"}"#).unwrap();
        assert_eq!(req.url, "https://example.com");
        assert_eq!(req.root, Some("main".to_string()));
    }
}
