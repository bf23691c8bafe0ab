//! Spigot Web - JSON API Server

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Pure JSON API server for YouTube stream lookup and download delivery.
//! Provides RESTful endpoints for frontend applications and external clients.

pub mod handlers;
pub mod server;

// Re-export main types
pub use server::{AppState, build_router, run_server};
