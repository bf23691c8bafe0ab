//! Metadata lookup and direct-URL handlers.

use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{Value, json};
use spigot_core::extract::TrackKind;
use spigot_core::select::{self, QualityHint, SelectionRequest};
use tracing::info;

use super::ApiError;
use crate::server::AppState;

/// Query parameters for metadata lookups.
#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    /// Video page URL to inspect.
    pub url: String,
}

/// Query parameters shared by all delivery endpoints.
#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    /// Video page URL to download from.
    pub url: String,
    /// "video" for a progressive stream, "audio" for an audio-only track.
    pub download_type: String,
    /// Resolution label, or "highest" (default) for the best available.
    pub resolution: Option<String>,
    /// "high" (default) or "low".
    pub audio_quality: Option<String>,
}

impl DownloadQuery {
    /// Translates the raw query parameters into a selection request.
    ///
    /// # Errors
    /// - `ApiError` (400) - Unknown `download_type` or audio quality value
    pub fn selection_request(&self) -> Result<SelectionRequest, ApiError> {
        match self.download_type.as_str() {
            "video" => Ok(SelectionRequest::new(
                TrackKind::Video,
                QualityHint::from_resolution_param(self.resolution.as_deref()),
            )),
            "audio" => {
                let hint = QualityHint::from_audio_param(self.audio_quality.as_deref())?;
                Ok(SelectionRequest::new(TrackKind::Audio, hint))
            }
            other => Err(ApiError::bad_request(format!(
                "download_type must be 'video' or 'audio', got '{other}'"
            ))),
        }
    }
}

/// Returns all progressive MP4 resolutions for a video URL.
pub async fn video_resolutions(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<Value>, ApiError> {
    let streams = state
        .extractor
        .fetch_streams(&query.url)
        .await
        .map_err(|e| ApiError::extract("Could not fetch resolutions", e))?;

    let resolutions = select::video_resolutions(&streams.descriptors);
    if resolutions.is_empty() {
        return Err(ApiError::not_found("No progressive video streams found"));
    }

    info!(
        "Listed {} resolutions for '{}'",
        resolutions.len(),
        streams.title
    );
    Ok(Json(json!({ "resolutions": resolutions })))
}

/// Returns all audio bitrates for a video URL.
pub async fn audio_qualities(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<Value>, ApiError> {
    let streams = state
        .extractor
        .fetch_streams(&query.url)
        .await
        .map_err(|e| ApiError::extract("Could not fetch audio qualities", e))?;

    let qualities = select::audio_qualities(&streams.descriptors);
    if qualities.is_empty() {
        return Err(ApiError::not_found("No audio streams found"));
    }

    info!(
        "Listed {} audio qualities for '{}'",
        qualities.len(),
        streams.title
    );
    Ok(Json(json!({ "audio_qualities": qualities })))
}

/// Returns the direct CDN URL for the requested stream (redirect-style
/// delivery; no proxying).
pub async fn download_url(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Json<Value>, ApiError> {
    let request = query.selection_request()?;

    let streams = state
        .extractor
        .fetch_streams(&query.url)
        .await
        .map_err(|e| ApiError::extract("Error generating download URL", e))?;

    let descriptor = select::select(&streams.descriptors, &request)?;

    info!(
        "Resolved {} download URL for '{}' at {}",
        request.kind, streams.title, request.hint
    );
    Ok(Json(json!({ "download_url": descriptor.url })))
}

/// Service health and uptime.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "uptime_seconds": state.started_at.elapsed().as_secs(),
    }))
}
