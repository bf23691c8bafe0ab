//! Stream selection by kind and quality hint.
//!
//! Given the descriptor list one extraction yields, picks exactly one
//! descriptor (or a not-found error) and produces the quality listings the
//! lookup endpoints serve. Ties are broken by library order: the earliest
//! matching entry wins.

use thiserror::Error;

use crate::extract::{StreamDescriptor, TrackKind};

/// Requested quality for a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QualityHint {
    /// Best available: highest resolution or highest audio bitrate.
    Highest,
    /// Worst available: lowest resolution or lowest audio bitrate.
    Lowest,
    /// An explicit resolution label such as "720p". Video only.
    Exact(String),
}

impl QualityHint {
    /// Parses the `resolution` API parameter.
    ///
    /// Absent or "highest" means best available; any other value is an
    /// exact resolution match.
    pub fn from_resolution_param(raw: Option<&str>) -> Self {
        match raw {
            None | Some("highest") => QualityHint::Highest,
            Some(value) => QualityHint::Exact(value.to_string()),
        }
    }

    /// Parses the `audio_quality` API parameter.
    ///
    /// Only "high" (default) and "low" are accepted; anything else is a
    /// validation error.
    ///
    /// # Errors
    /// - `SelectionError::InvalidQuality` - Unrecognized audio quality value
    pub fn from_audio_param(raw: Option<&str>) -> Result<Self, SelectionError> {
        match raw {
            None | Some("high") => Ok(QualityHint::Highest),
            Some("low") => Ok(QualityHint::Lowest),
            Some(value) => Err(SelectionError::InvalidQuality {
                value: value.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for QualityHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityHint::Highest => f.write_str("highest"),
            QualityHint::Lowest => f.write_str("lowest"),
            QualityHint::Exact(value) => f.write_str(value),
        }
    }
}

/// One selection: which kind of track, at which quality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRequest {
    pub kind: TrackKind,
    pub hint: QualityHint,
}

impl SelectionRequest {
    /// Convenience constructor.
    pub fn new(kind: TrackKind, hint: QualityHint) -> Self {
        Self { kind, hint }
    }
}

/// Errors produced by stream selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// No descriptor of the requested kind matches the hint.
    #[error("No {kind} stream matches quality '{hint}'")]
    NotFound {
        /// The requested track kind
        kind: TrackKind,
        /// The quality hint that failed to match
        hint: String,
    },

    /// The audio quality parameter was not "low" or "high".
    #[error("Invalid audio quality '{value}': expected 'low' or 'high'")]
    InvalidQuality {
        /// The rejected parameter value
        value: String,
    },
}

/// Distinct progressive video resolutions, best first.
///
/// Ordering is numeric on pixel height, so "1080p" sorts above "720p"
/// despite comparing lower lexicographically.
pub fn video_resolutions(descriptors: &[StreamDescriptor]) -> Vec<String> {
    let mut resolutions: Vec<String> = descriptors
        .iter()
        .filter(|d| d.kind == TrackKind::Video)
        .filter_map(|d| d.resolution.clone())
        .collect();

    resolutions.sort_by_key(|label| std::cmp::Reverse(resolution_height(label)));
    resolutions.dedup();
    resolutions
}

/// Distinct audio bitrate labels ("160kbps"), best first.
pub fn audio_qualities(descriptors: &[StreamDescriptor]) -> Vec<String> {
    let mut bitrates: Vec<u64> = descriptors
        .iter()
        .filter(|d| d.kind == TrackKind::Audio)
        .filter_map(|d| d.audio_bitrate)
        .collect();

    bitrates.sort_unstable_by(|a, b| b.cmp(a));
    bitrates.dedup();
    bitrates.into_iter().map(|b| format!("{b}kbps")).collect()
}

/// Selects exactly one descriptor for the request.
///
/// # Errors
/// - `SelectionError::NotFound` - No descriptor of the kind matches the hint
/// - `SelectionError::InvalidQuality` - Exact hints are not valid for audio
pub fn select<'a>(
    descriptors: &'a [StreamDescriptor],
    request: &SelectionRequest,
) -> Result<&'a StreamDescriptor, SelectionError> {
    let mut candidates = descriptors.iter().filter(|d| d.kind == request.kind);

    let not_found = || SelectionError::NotFound {
        kind: request.kind,
        hint: request.hint.to_string(),
    };

    match (request.kind, &request.hint) {
        (TrackKind::Video, QualityHint::Exact(resolution)) => candidates
            .find(|d| d.resolution.as_deref() == Some(resolution.as_str()))
            .ok_or_else(not_found),
        (TrackKind::Video, hint) => {
            extremum(candidates, *hint == QualityHint::Lowest, |d| {
                d.resolution.as_deref().map(resolution_height)
            })
            .ok_or_else(not_found)
        }
        (TrackKind::Audio, QualityHint::Exact(value)) => Err(SelectionError::InvalidQuality {
            value: value.clone(),
        }),
        (TrackKind::Audio, hint) => extremum(candidates, *hint == QualityHint::Lowest, |d| {
            d.audio_bitrate
        })
        .ok_or_else(not_found),
    }
}

/// Max (or min) by key, keeping the earliest entry on ties and skipping
/// descriptors with no key at all.
fn extremum<'a, I, K, F>(candidates: I, lowest: bool, key: F) -> Option<&'a StreamDescriptor>
where
    I: Iterator<Item = &'a StreamDescriptor>,
    K: Ord + Copy,
    F: Fn(&StreamDescriptor) -> Option<K>,
{
    let mut best: Option<(&StreamDescriptor, K)> = None;

    for descriptor in candidates {
        let Some(k) = key(descriptor) else { continue };
        let better = match best {
            None => true,
            Some((_, best_key)) => {
                if lowest {
                    k < best_key
                } else {
                    k > best_key
                }
            }
        };
        if better {
            best = Some((descriptor, k));
        }
    }

    best.map(|(descriptor, _)| descriptor)
}

/// Numeric pixel height of a resolution label ("1080p" -> 1080).
///
/// Labels without a leading number rank as zero.
fn resolution_height(label: &str) -> u64 {
    let digits: String = label.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(resolution: &str, url: &str) -> StreamDescriptor {
        StreamDescriptor {
            kind: TrackKind::Video,
            resolution: Some(resolution.to_string()),
            audio_bitrate: None,
            container: "mp4".to_string(),
            mime: "video/mp4".to_string(),
            url: url.to_string(),
        }
    }

    fn audio(bitrate: u64, url: &str) -> StreamDescriptor {
        StreamDescriptor {
            kind: TrackKind::Audio,
            resolution: None,
            audio_bitrate: Some(bitrate),
            container: "webm".to_string(),
            mime: "audio/webm".to_string(),
            url: url.to_string(),
        }
    }

    fn mixed_list() -> Vec<StreamDescriptor> {
        vec![
            video("360p", "v360"),
            video("1080p", "v1080"),
            video("720p", "v720"),
            audio(48, "a48"),
            audio(160, "a160"),
            audio(128, "a128"),
        ]
    }

    #[test]
    fn test_resolutions_sort_numerically() {
        let descriptors = mixed_list();
        assert_eq!(
            video_resolutions(&descriptors),
            vec!["1080p", "720p", "360p"]
        );
    }

    #[test]
    fn test_resolutions_dedup() {
        let descriptors = vec![video("720p", "a"), video("720p", "b"), video("360p", "c")];
        assert_eq!(video_resolutions(&descriptors), vec!["720p", "360p"]);
    }

    #[test]
    fn test_audio_qualities_labeled_and_sorted() {
        let descriptors = mixed_list();
        assert_eq!(
            audio_qualities(&descriptors),
            vec!["160kbps", "128kbps", "48kbps"]
        );
    }

    #[test]
    fn test_select_highest_video() {
        let descriptors = mixed_list();
        let request = SelectionRequest::new(TrackKind::Video, QualityHint::Highest);
        assert_eq!(select(&descriptors, &request).unwrap().url, "v1080");
    }

    #[test]
    fn test_select_exact_video() {
        let descriptors = mixed_list();
        let request =
            SelectionRequest::new(TrackKind::Video, QualityHint::Exact("720p".to_string()));
        assert_eq!(select(&descriptors, &request).unwrap().url, "v720");
    }

    #[test]
    fn test_select_exact_video_missing_is_not_found() {
        let descriptors = mixed_list();
        let request =
            SelectionRequest::new(TrackKind::Video, QualityHint::Exact("480p".to_string()));
        assert!(matches!(
            select(&descriptors, &request),
            Err(SelectionError::NotFound { .. })
        ));
    }

    #[test]
    fn test_select_highest_and_lowest_audio() {
        let descriptors = mixed_list();

        let high = SelectionRequest::new(TrackKind::Audio, QualityHint::Highest);
        assert_eq!(select(&descriptors, &high).unwrap().url, "a160");

        let low = SelectionRequest::new(TrackKind::Audio, QualityHint::Lowest);
        assert_eq!(select(&descriptors, &low).unwrap().url, "a48");
    }

    #[test]
    fn test_select_audio_exact_is_invalid() {
        let descriptors = mixed_list();
        let request =
            SelectionRequest::new(TrackKind::Audio, QualityHint::Exact("128kbps".to_string()));
        assert_eq!(
            select(&descriptors, &request),
            Err(SelectionError::InvalidQuality {
                value: "128kbps".to_string()
            })
        );
    }

    #[test]
    fn test_select_empty_list_is_not_found() {
        let descriptors: Vec<StreamDescriptor> = Vec::new();
        for request in [
            SelectionRequest::new(TrackKind::Video, QualityHint::Highest),
            SelectionRequest::new(TrackKind::Audio, QualityHint::Lowest),
        ] {
            assert!(matches!(
                select(&descriptors, &request),
                Err(SelectionError::NotFound { .. })
            ));
        }
    }

    #[test]
    fn test_ties_keep_library_order() {
        let descriptors = vec![audio(128, "first"), audio(128, "second")];
        let request = SelectionRequest::new(TrackKind::Audio, QualityHint::Highest);
        assert_eq!(select(&descriptors, &request).unwrap().url, "first");

        let request = SelectionRequest::new(TrackKind::Audio, QualityHint::Lowest);
        assert_eq!(select(&descriptors, &request).unwrap().url, "first");
    }

    #[test]
    fn test_audio_hint_parsing() {
        assert_eq!(
            QualityHint::from_audio_param(None).unwrap(),
            QualityHint::Highest
        );
        assert_eq!(
            QualityHint::from_audio_param(Some("high")).unwrap(),
            QualityHint::Highest
        );
        assert_eq!(
            QualityHint::from_audio_param(Some("low")).unwrap(),
            QualityHint::Lowest
        );
        assert!(matches!(
            QualityHint::from_audio_param(Some("medium")),
            Err(SelectionError::InvalidQuality { .. })
        ));
    }

    #[test]
    fn test_resolution_hint_parsing() {
        assert_eq!(
            QualityHint::from_resolution_param(None),
            QualityHint::Highest
        );
        assert_eq!(
            QualityHint::from_resolution_param(Some("highest")),
            QualityHint::Highest
        );
        assert_eq!(
            QualityHint::from_resolution_param(Some("480p")),
            QualityHint::Exact("480p".to_string())
        );
    }

    #[test]
    fn test_resolution_height_parsing() {
        assert_eq!(resolution_height("1080p"), 1080);
        assert_eq!(resolution_height("720p60"), 720);
        assert_eq!(resolution_height("auto"), 0);
    }
}
