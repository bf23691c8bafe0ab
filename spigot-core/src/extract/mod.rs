//! Stream extraction facade.
//!
//! Wraps a remote video identifier into a queryable set of stream
//! descriptors. The heavy lifting (signature decryption, manifest parsing)
//! belongs to the extraction library; this module owns only the descriptor
//! snapshot handed to the selector and delivery layers.

mod mock;
mod youtube;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use mock::MockExtractor;
pub use youtube::YoutubeExtractor;

/// Kind of media track a descriptor represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// Progressive stream: audio and video muxed into a single file.
    Video,
    /// Audio-only adaptive track.
    Audio,
}

impl TrackKind {
    /// Lowercase wire name, matching the `download_type` API parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackKind::Video => "video",
            TrackKind::Audio => "audio",
        }
    }
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One playable stream offered by the extraction library.
///
/// Immutable snapshot taken per request; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    pub kind: TrackKind,
    /// Resolution label such as "720p". Present for video descriptors.
    pub resolution: Option<String>,
    /// Audio bitrate in kbps. Present for audio descriptors.
    pub audio_bitrate: Option<u64>,
    /// Container extension such as "mp4" or "webm".
    pub container: String,
    /// Full MIME type including codec parameters.
    pub mime: String,
    /// Direct, already-deciphered media URL.
    pub url: String,
}

/// Everything one extraction yields for a single video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoStreams {
    /// Video title as reported by the source.
    pub title: String,
    /// All usable stream descriptors, in library order.
    pub descriptors: Vec<StreamDescriptor>,
}

impl VideoStreams {
    /// Derives a safe download filename for the given descriptor.
    ///
    /// Combines the sanitized title with the descriptor's container
    /// extension, falling back to "download" for degenerate titles.
    pub fn suggested_filename(&self, descriptor: &StreamDescriptor) -> String {
        let stem = crate::delivery::sanitize_filename(&self.title);
        format!("{stem}.{}", descriptor.container)
    }
}

/// Errors that can occur while extracting stream descriptors.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The supplied URL was not recognized as a video URL.
    #[error("Invalid video URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL that was rejected
        url: String,
        /// The reason for the rejection
        reason: String,
    },

    /// The video exists but its streams could not be retrieved.
    #[error("Video unavailable: {reason}")]
    Unavailable {
        /// The reason the video is unavailable
        reason: String,
    },

    /// The extraction library failed in an unexpected way.
    #[error("Extraction library error: {reason}")]
    Library {
        /// The reason for the library failure
        reason: String,
    },
}

/// Trait for stream extraction backends.
///
/// Each HTTP request independently instantiates one extraction; there is
/// no cross-request cache. Implementations must be cheap to construct.
#[async_trait]
pub trait StreamExtractor: Send + Sync {
    /// Fetches the full descriptor set for a video URL.
    async fn fetch_streams(&self, url: &str) -> Result<VideoStreams, ExtractError>;
}
