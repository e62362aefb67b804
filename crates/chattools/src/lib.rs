//! Chattools - chat-assistant tool library
//!
//! This crate provides the tool callbacks an LLM orchestrator can invoke:
//! user environment reporting, YouTube transcript retrieval, and readable
//! web page text extraction.
//!
//! The pure core (identifier extraction, sanitization, text extraction,
//! metadata lookups) is usable without the network layer.

mod client;
mod environment;
mod error;
mod extract;
mod ident;
mod sanitize;
mod tool;
mod types;

pub use client::{fetch_page_text, fetch_transcript, ClientOptions, DEFAULT_BASE_URL};
pub use environment::{user_environment, EnvironmentOptions, FALLBACK_LOCALE};
pub use error::ToolError;
pub use extract::{
    clean_whitespace, parse_transcript_payload, readable_text, transcript_response,
    video_metadata, TranscriptPayload, VideoMetadata,
};
pub use ident::{extract_video_id, is_canonical_id};
pub use sanitize::{sanitize_html, SanitizedDocument};
pub use tool::{
    EnvironmentTool, PageTextTool, Tool, ToolDefinition, ToolRegistry, TranscriptTool,
};
pub use types::{
    EnvironmentInfo, EnvironmentRequest, PageTextRequest, PageTextResponse, TranscriptRequest,
    TranscriptResponse,
};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "Chattools/1.0";

/// Description of the user environment tool, for LLM consumption
pub const ENVIRONMENT_TOOL_DESCRIPTION: &str = "Returns the user environment information: \
preferred language, local date and time, and timezone.";

/// Description of the transcript tool, for LLM consumption
pub const TRANSCRIPT_TOOL_DESCRIPTION: &str = "Returns a YouTube video script. \
Called when a YouTube video URL is detected in the user input.";

/// Description of the page text tool, for LLM consumption
pub const PAGE_TEXT_TOOL_DESCRIPTION: &str = "Fetches a web page and returns its readable \
text content, with scripts, styles, and hidden markup removed.";

/// Extended documentation for LLM consumption (llmtxt)
pub const TOOL_LLMTXT: &str = r#"# Chattools

Tool callbacks for a chat assistant.

## GetUserEnvironment
Returns the user's preferred language, local date and time, and timezone.
Takes no parameters.

## GetYouTubeVideoScript
Returns the transcript of a YouTube video plus page metadata.

Input parameters:
- `url` (required): a watch URL in any known shape, or a bare 11-character
  video id
- `lang` (optional): preferred transcript language code

Output fields (all optional): `title`, `date`, `views`, `author`,
`description`, `transcript`. When the backend answers with plain text
instead of JSON, the whole body is returned in `transcript`.

## GetWebPageText
Fetches a page and returns its readable text.

Input parameters:
- `url` (required): the page URL (must be http:// or https://)
- `root` (optional): CSS selector of the subtree to read (default `body`)

Output fields: `url`, `status_code`, `title`, `text`, `truncated`.

## Error handling
- Invalid URLs return an error
- Binary content returns an error
- Missing page markup yields absent fields, not errors
- Timeouts return partial content with the truncated flag
"#;
