//! Spigot Core - YouTube stream lookup and delivery building blocks
//!
//! This crate provides the library side of Spigot: the extraction facade over
//! the third-party stream library, stream selection by quality hint, the
//! delivery adapter (direct URL, in-memory inline payload, or persist to
//! disk), and configuration management.

pub mod config;
pub mod delivery;
pub mod extract;
pub mod select;

// Re-export main types for convenient access
pub use config::SpigotConfig;
pub use delivery::{DeliveryError, DeliveryMode, Fetcher};
pub use extract::{ExtractError, StreamDescriptor, StreamExtractor, TrackKind, VideoStreams};
pub use select::{QualityHint, SelectionError, SelectionRequest};

/// Core errors that can bubble up from any Spigot subsystem.
///
/// High-level error types representing failures in core functionality.
#[derive(Debug, thiserror::Error)]
pub enum SpigotError {
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpigotError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            SpigotError::Extract(e) => match e {
                ExtractError::InvalidUrl { url, .. } => {
                    format!("Not a valid video URL: {url}")
                }
                ExtractError::Unavailable { reason } => {
                    format!("Video unavailable: {reason}")
                }
                ExtractError::Library { .. } => "Stream extraction failed".to_string(),
            },
            SpigotError::Selection(SelectionError::NotFound { kind, hint }) => {
                format!("No {kind} stream matches quality '{hint}'")
            }
            SpigotError::Selection(SelectionError::InvalidQuality { value }) => {
                format!("Invalid audio quality '{value}'")
            }
            SpigotError::Delivery(_) => "Download failed".to_string(),
            SpigotError::Configuration { reason } => format!("Configuration error: {reason}"),
            SpigotError::Io(_) => "File system error occurred".to_string(),
        }
    }

    /// Checks if this error is due to user input validation.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            SpigotError::Selection(SelectionError::InvalidQuality { .. })
                | SpigotError::Extract(ExtractError::InvalidUrl { .. })
                | SpigotError::Configuration { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SpigotError>;
