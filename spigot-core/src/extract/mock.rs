//! Canned extractor for tests and development.

use async_trait::async_trait;

use super::{ExtractError, StreamDescriptor, StreamExtractor, TrackKind, VideoStreams};

/// Extractor returning a fixed descriptor set without network access.
///
/// Construct with [`MockExtractor::with_streams`] for the happy path or
/// [`MockExtractor::unavailable`] to exercise error handling.
#[derive(Debug, Clone)]
pub struct MockExtractor {
    streams: Option<VideoStreams>,
}

impl MockExtractor {
    /// Creates a mock that yields the given streams for every URL.
    pub fn with_streams(streams: VideoStreams) -> Self {
        Self {
            streams: Some(streams),
        }
    }

    /// Creates a mock that fails every lookup with `Unavailable`.
    pub fn unavailable() -> Self {
        Self { streams: None }
    }

    /// Creates a mock with a small realistic descriptor set.
    ///
    /// Two progressive MP4 video streams (720p, 360p) and two audio
    /// tracks (160 kbps webm, 48 kbps mp4), in typical library order.
    pub fn with_demo_streams() -> Self {
        let descriptors = vec![
            StreamDescriptor {
                kind: TrackKind::Video,
                resolution: Some("720p".to_string()),
                audio_bitrate: Some(128),
                container: "mp4".to_string(),
                mime: "video/mp4; codecs=\"avc1.64001F, mp4a.40.2\"".to_string(),
                url: "https://cdn.example/video-720p".to_string(),
            },
            StreamDescriptor {
                kind: TrackKind::Video,
                resolution: Some("360p".to_string()),
                audio_bitrate: Some(96),
                container: "mp4".to_string(),
                mime: "video/mp4; codecs=\"avc1.42001E, mp4a.40.2\"".to_string(),
                url: "https://cdn.example/video-360p".to_string(),
            },
            StreamDescriptor {
                kind: TrackKind::Audio,
                resolution: None,
                audio_bitrate: Some(160),
                container: "webm".to_string(),
                mime: "audio/webm; codecs=\"opus\"".to_string(),
                url: "https://cdn.example/audio-160".to_string(),
            },
            StreamDescriptor {
                kind: TrackKind::Audio,
                resolution: None,
                audio_bitrate: Some(48),
                container: "mp4".to_string(),
                mime: "audio/mp4; codecs=\"mp4a.40.5\"".to_string(),
                url: "https://cdn.example/audio-48".to_string(),
            },
        ];

        Self::with_streams(VideoStreams {
            title: "Demo Video".to_string(),
            descriptors,
        })
    }
}

#[async_trait]
impl StreamExtractor for MockExtractor {
    async fn fetch_streams(&self, url: &str) -> Result<VideoStreams, ExtractError> {
        match &self.streams {
            Some(streams) => Ok(streams.clone()),
            None => Err(ExtractError::Unavailable {
                reason: format!("mock extractor has no streams for {url}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_streams_cover_both_kinds() {
        let mock = MockExtractor::with_demo_streams();
        let streams = mock.fetch_streams("https://youtu.be/demo").await.unwrap();

        assert_eq!(streams.title, "Demo Video");
        assert!(
            streams
                .descriptors
                .iter()
                .any(|d| d.kind == TrackKind::Video)
        );
        assert!(
            streams
                .descriptors
                .iter()
                .any(|d| d.kind == TrackKind::Audio)
        );
    }

    #[tokio::test]
    async fn test_unavailable_mock_fails() {
        let mock = MockExtractor::unavailable();
        let result = mock.fetch_streams("https://youtu.be/demo").await;

        assert!(matches!(result, Err(ExtractError::Unavailable { .. })));
    }
}
