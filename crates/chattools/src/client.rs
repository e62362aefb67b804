//! HTTP layer for the network-backed tools

use crate::error::ToolError;
use crate::extract::{readable_text, transcript_response};
use crate::ident::{extract_video_id, is_canonical_id};
use crate::sanitize::SanitizedDocument;
use crate::types::{PageTextRequest, PageTextResponse, TranscriptRequest, TranscriptResponse};
use crate::DEFAULT_USER_AGENT;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use std::time::Duration;
use tracing::{error, warn};

/// Default backend origin for the transcript endpoint
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Backend path serving transcripts
const TRANSCRIPT_PATH: &str = "/api/search/transcript";

/// Content type prefixes never worth extracting text from
const BINARY_PREFIXES: &[&str] = &[
    "image/",
    "audio/",
    "video/",
    "application/octet-stream",
    "application/pdf",
    "application/zip",
    "application/gzip",
    "font/",
];

/// Connect + first-byte timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Body timeout (total)
const BODY_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout message appended to truncated content
const TIMEOUT_MESSAGE: &str = "\n\n[..more content timed out...]";

/// Options shared by the network-backed tools
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Backend origin serving the transcript endpoint
    pub base_url: Option<String>,
    /// Custom User-Agent
    pub user_agent: Option<String>,
    /// Default transcript language when the request leaves it unset
    pub lang: Option<String>,
}

impl ClientOptions {
    fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

/// Fetch a video transcript from the backend.
///
/// Accepts a watch URL in any known shape or a bare canonical id. The
/// original's URL-only validation rejected bare ids that its own extractor
/// handled; both are accepted here.
pub async fn fetch_transcript(
    req: TranscriptRequest,
    options: ClientOptions,
) -> Result<TranscriptResponse, ToolError> {
    if req.url.is_empty() {
        return Err(ToolError::MissingUrl);
    }
    if !is_canonical_id(&req.url) && url::Url::parse(&req.url).is_err() {
        return Err(ToolError::InvalidUrl);
    }

    let id = extract_video_id(&req.url);
    let lang = req
        .lang
        .clone()
        .or_else(|| options.lang.clone())
        .unwrap_or_default();

    let client = build_client(&options)?;
    let endpoint = format!(
        "{}{}",
        options.effective_base_url().trim_end_matches('/'),
        TRANSCRIPT_PATH
    );

    let response = client
        .post(&endpoint)
        .json(&serde_json::json!({ "id": id, "lang": lang, "json": true }))
        .send()
        .await
        .map_err(ToolError::from_reqwest)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ToolError::UpstreamStatus(status.as_u16()));
    }

    let (body, truncated) = read_body_with_timeout(response, BODY_TIMEOUT).await;
    if truncated {
        warn!(id = %id, "transcript body truncated at timeout");
    }

    let text = String::from_utf8_lossy(&body).to_string();
    Ok(transcript_response(&text))
}

/// Fetch a page and return the readable text of the requested subtree.
pub async fn fetch_page_text(
    req: PageTextRequest,
    options: ClientOptions,
) -> Result<PageTextResponse, ToolError> {
    if req.url.is_empty() {
        return Err(ToolError::MissingUrl);
    }
    if !req.url.starts_with("http://") && !req.url.starts_with("https://") {
        return Err(ToolError::InvalidUrlScheme);
    }

    let client = build_client(&options)?;
    let response = client
        .get(&req.url)
        .header(
            ACCEPT,
            HeaderValue::from_static("text/html, text/plain, */*;q=0.8"),
        )
        .send()
        .await
        .map_err(ToolError::from_reqwest)?;

    let status_code = response.status().as_u16();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    if let Some(ref ct) = content_type {
        if is_binary_content_type(ct) {
            return Err(ToolError::RequestError(format!(
                "Binary content is not supported: {}",
                ct
            )));
        }
    }

    let (body, truncated) = read_body_with_timeout(response, BODY_TIMEOUT).await;
    let html = String::from_utf8_lossy(&body).to_string();

    // The parsed tree is not Send, so keep it off the await path.
    let (title, mut text) = {
        let doc = SanitizedDocument::parse(&html);
        (doc.text("title"), readable_text(&doc, req.effective_root()))
    };

    if truncated {
        text.push_str(TIMEOUT_MESSAGE);
    }

    Ok(PageTextResponse {
        url: req.url,
        status_code,
        title,
        text,
        truncated: if truncated { Some(true) } else { None },
    })
}

fn build_client(options: &ClientOptions) -> Result<reqwest::Client, ToolError> {
    let mut headers = HeaderMap::new();
    let user_agent = options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(BODY_TIMEOUT)
        .build()
        .map_err(ToolError::ClientBuildError)
}

/// Check if content type indicates binary content
fn is_binary_content_type(content_type: &str) -> bool {
    let ct_lower = content_type.to_lowercase();
    BINARY_PREFIXES
        .iter()
        .any(|prefix| ct_lower.starts_with(prefix))
}

/// Read response body with timeout, returning partial content if timeout occurs
async fn read_body_with_timeout(response: reqwest::Response, timeout: Duration) -> (Bytes, bool) {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    let deadline = tokio::time::Instant::now() + timeout;

    loop {
        tokio::select! {
            chunk = stream.next() => {
                match chunk {
                    Some(Ok(bytes)) => {
                        body.extend_from_slice(&bytes);
                    }
                    Some(Err(e)) => {
                        error!("Error reading body chunk: {}", e);
                        let has_content = !body.is_empty();
                        return (Bytes::from(body), has_content);
                    }
                    None => {
                        return (Bytes::from(body), false);
                    }
                }
            }
            _ = tokio::time::sleep_until(deadline) => {
                warn!("Body timeout reached, returning partial content");
                return (Bytes::from(body), true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_binary_content_type() {
        assert!(is_binary_content_type("image/png"));
        assert!(is_binary_content_type("video/mp4"));
        assert!(is_binary_content_type("application/pdf"));
        assert!(is_binary_content_type("font/woff2"));

        assert!(!is_binary_content_type("text/html"));
        assert!(!is_binary_content_type("text/plain"));
        assert!(!is_binary_content_type("application/json"));
    }

    #[test]
    fn test_effective_base_url() {
        assert_eq!(
            ClientOptions::default().effective_base_url(),
            DEFAULT_BASE_URL
        );

        let options = ClientOptions {
            base_url: Some("https://backend.example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(options.effective_base_url(), "https://backend.example.com");
    }

    #[tokio::test]
    async fn test_transcript_rejects_missing_url() {
        let result = fetch_transcript(TranscriptRequest::new(""), ClientOptions::default()).await;
        assert!(matches!(result, Err(ToolError::MissingUrl)));
    }

    #[tokio::test]
    async fn test_transcript_rejects_unparseable_input() {
        let result =
            fetch_transcript(TranscriptRequest::new("not a url"), ClientOptions::default()).await;
        assert!(matches!(result, Err(ToolError::InvalidUrl)));
    }

    #[tokio::test]
    async fn test_page_rejects_bad_scheme() {
        let result = fetch_page_text(
            PageTextRequest::new("ftp://example.com/file.txt"),
            ClientOptions::default(),
        )
        .await;
        assert!(matches!(result, Err(ToolError::InvalidUrlScheme)));
    }
}
