//! Production extractor backed by the `rusty_ytdl` library.

use async_trait::async_trait;
use rusty_ytdl::{Video, VideoFormat};
use tracing::debug;

use super::{ExtractError, StreamDescriptor, StreamExtractor, TrackKind, VideoStreams};

/// Stream extractor that resolves YouTube URLs via `rusty_ytdl`.
///
/// Stateless: each lookup constructs a fresh library client, mirroring the
/// one-request-per-call semantics of the API surface.
#[derive(Debug, Default, Clone)]
pub struct YoutubeExtractor;

impl YoutubeExtractor {
    /// Creates a new extractor.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StreamExtractor for YoutubeExtractor {
    async fn fetch_streams(&self, url: &str) -> Result<VideoStreams, ExtractError> {
        let video = Video::new(url).map_err(|e| ExtractError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let info = video
            .get_info()
            .await
            .map_err(|e| ExtractError::Unavailable {
                reason: e.to_string(),
            })?;

        let descriptors: Vec<StreamDescriptor> =
            info.formats.iter().filter_map(map_format).collect();

        debug!(
            "Extracted {} usable descriptors for '{}'",
            descriptors.len(),
            info.video_details.title
        );

        Ok(VideoStreams {
            title: info.video_details.title.clone(),
            descriptors,
        })
    }
}

/// Maps a library format onto a descriptor, dropping formats the API
/// never serves: live/segmented streams, video-only DASH tracks, and
/// progressive streams in containers other than MP4.
fn map_format(format: &VideoFormat) -> Option<StreamDescriptor> {
    if format.is_live || format.is_hls || format.is_dash_mpd {
        return None;
    }

    if format.has_video && format.has_audio {
        if format.mime_type.container != "mp4" {
            return None;
        }
        let resolution = format.quality_label.clone()?;
        Some(StreamDescriptor {
            kind: TrackKind::Video,
            resolution: Some(resolution),
            audio_bitrate: format.audio_bitrate,
            container: format.mime_type.container.clone(),
            mime: format.mime_type.mime.to_string(),
            url: format.url.clone(),
        })
    } else if format.has_audio {
        let bitrate = format.audio_bitrate?;
        Some(StreamDescriptor {
            kind: TrackKind::Audio,
            resolution: None,
            audio_bitrate: Some(bitrate),
            container: format.mime_type.container.clone(),
            mime: format.mime_type.mime.to_string(),
            url: format.url.clone(),
        })
    } else {
        None
    }
}
