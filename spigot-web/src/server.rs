//! Axum API server for Spigot
//!
//! Ties the extraction facade, stream selector, and delivery adapter
//! together behind a handful of JSON endpoints.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::routing::get;
use spigot_core::config::SpigotConfig;
use spigot_core::delivery::{DeliveryError, Fetcher};
use spigot_core::extract::{StreamExtractor, YoutubeExtractor};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::handlers::{
    audio_qualities, download_attachment, download_inline, download_url, health, video_resolutions,
};

/// Shared state for all request handlers.
///
/// The extractor seam is a trait object so tests can swap in a canned
/// extractor without touching the network.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<dyn StreamExtractor>,
    pub fetcher: Arc<Fetcher>,
    pub config: SpigotConfig,
    pub started_at: Instant,
}

impl AppState {
    /// Creates state with the production YouTube extractor.
    ///
    /// # Errors
    /// - `DeliveryError::Http` - The outbound HTTP client could not be built
    pub fn new(config: SpigotConfig) -> Result<Self, DeliveryError> {
        Self::with_extractor(config, Arc::new(YoutubeExtractor::new()))
    }

    /// Creates state with a caller-supplied extractor.
    ///
    /// # Errors
    /// - `DeliveryError::Http` - The outbound HTTP client could not be built
    pub fn with_extractor(
        config: SpigotConfig,
        extractor: Arc<dyn StreamExtractor>,
    ) -> Result<Self, DeliveryError> {
        let fetcher = Fetcher::new(&config.fetch, &config.delivery)?;

        Ok(Self {
            extractor,
            fetcher: Arc::new(fetcher),
            config,
            started_at: Instant::now(),
        })
    }
}

/// Builds the API router over the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Metadata lookup endpoints
        .route("/api/video/resolutions", get(video_resolutions))
        .route("/api/audio/qualities", get(audio_qualities))
        // Delivery endpoints, one per mode
        .route("/api/download_url", get(download_url))
        .route("/api/download", get(download_attachment))
        .route("/api/download/inline", get(download_inline))
        // Service health
        .route("/api/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Runs the API server until the process is stopped.
///
/// # Errors
/// Returns an error if the HTTP client cannot be built or the listen
/// address cannot be bound.
pub async fn run_server(config: SpigotConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config)?;
    let app = build_router(state);

    info!("Spigot media server running on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use spigot_core::extract::MockExtractor;

    use super::*;

    #[test]
    fn test_router_builds_with_mock_state() {
        let state = AppState::with_extractor(
            SpigotConfig::for_testing(),
            Arc::new(MockExtractor::with_demo_streams()),
        )
        .unwrap();

        let _router = build_router(state);
    }
}
