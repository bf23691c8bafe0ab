//! HTTP request handlers for the Spigot API.

pub mod api;
pub mod download;
mod error;

pub use api::{audio_qualities, download_url, health, video_resolutions};
pub use download::{download_attachment, download_inline};
pub use error::ApiError;
