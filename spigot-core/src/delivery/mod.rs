//! Delivery adapter: how selected stream bytes reach the caller.
//!
//! Three mutually exclusive modes exist, one per historical deployment
//! variant: hand back the direct CDN URL, buffer the bytes and base64-encode
//! them for inline transport, or persist to disk and stream the file back
//! with an attachment header.

mod disposition;
mod fetch;

use serde::Serialize;

pub use disposition::{content_disposition, sanitize_filename};
pub use fetch::{DeliveryError, Fetcher};

/// How a selected stream is delivered to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Return the descriptor's direct URL as JSON; no proxying.
    Redirect,
    /// Download fully into memory and return base64-encoded bytes.
    Inline,
    /// Persist to the download directory, then stream the file back.
    Attachment,
}

/// JSON payload for the inline (buffer-and-encode) delivery mode.
#[derive(Debug, Clone, Serialize)]
pub struct InlinePayload {
    /// Suggested download filename.
    pub filename: String,
    /// MIME type of the encoded bytes.
    pub mime: String,
    /// Base64-encoded media bytes.
    pub data: String,
}

/// Encodes buffered media bytes for inline JSON transport.
pub fn inline_payload(bytes: &[u8], filename: &str, mime: &str) -> InlinePayload {
    use base64::Engine as _;

    InlinePayload {
        filename: filename.to_string(),
        mime: mime.to_string(),
        data: base64::engine::general_purpose::STANDARD.encode(bytes),
    }
}
