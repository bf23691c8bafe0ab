//! Proxying delivery handlers: attachment and inline.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{Response, header};
use axum::response::Json;
use spigot_core::delivery::{self, DeliveryMode, content_disposition};
use spigot_core::extract::StreamDescriptor;
use spigot_core::select;
use tokio_util::io::ReaderStream;
use tracing::info;

use super::ApiError;
use super::api::DownloadQuery;
use crate::server::AppState;

/// Persists the selected stream to the download directory and streams the
/// file back with an attachment Content-Disposition header.
pub async fn download_attachment(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response<Body>, ApiError> {
    let (descriptor, filename) = resolve_stream(&state, &query, DeliveryMode::Attachment).await?;

    let path = state
        .fetcher
        .persist(
            &descriptor.url,
            &state.config.delivery.download_dir,
            &filename,
        )
        .await?;

    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| ApiError::internal(format!("Could not reopen download: {e}")))?;
    let size = file
        .metadata()
        .await
        .map_err(|e| ApiError::internal(format!("Could not stat download: {e}")))?
        .len();

    Response::builder()
        .header(header::CONTENT_TYPE, descriptor.mime.clone())
        .header(header::CONTENT_LENGTH, size)
        .header(header::CONTENT_DISPOSITION, content_disposition(&filename))
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| ApiError::internal(format!("Could not build response: {e}")))
}

/// Buffers the selected stream in memory and returns it base64-encoded.
pub async fn download_inline(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Json<delivery::InlinePayload>, ApiError> {
    let (descriptor, filename) = resolve_stream(&state, &query, DeliveryMode::Inline).await?;

    let bytes = state.fetcher.buffer(&descriptor.url).await?;

    Ok(Json(delivery::inline_payload(
        &bytes,
        &filename,
        &descriptor.mime,
    )))
}

/// Runs extraction and selection for a delivery request.
///
/// Returns the chosen descriptor together with its suggested download
/// filename.
async fn resolve_stream(
    state: &AppState,
    query: &DownloadQuery,
    mode: DeliveryMode,
) -> Result<(StreamDescriptor, String), ApiError> {
    let request = query.selection_request()?;

    let streams = state
        .extractor
        .fetch_streams(&query.url)
        .await
        .map_err(|e| ApiError::extract("Could not fetch streams", e))?;

    let descriptor = select::select(&streams.descriptors, &request)?.clone();
    let filename = streams.suggested_filename(&descriptor);

    info!(
        "Delivering {} stream of '{}' as {:?} ({})",
        request.kind, streams.title, mode, filename
    );
    Ok((descriptor, filename))
}
