//! CLI command implementations

use std::path::PathBuf;
use std::sync::Arc;

use clap::Subcommand;
use spigot_core::config::SpigotConfig;
use spigot_core::delivery::Fetcher;
use spigot_core::extract::{StreamExtractor, TrackKind, YoutubeExtractor};
use spigot_core::select::{self, QualityHint, SelectionRequest};
use spigot_core::{Result, SpigotError};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
        /// Directory for persisted downloads
        #[arg(long)]
        download_dir: Option<PathBuf>,
    },
    /// List available stream qualities for a video URL
    Formats {
        /// Video page URL
        url: String,
    },
    /// Download a stream to disk
    Fetch {
        /// Video page URL
        url: String,
        /// Track to download: "video" or "audio"
        #[arg(long, default_value = "video")]
        kind: String,
        /// Resolution label for video ("highest" by default), or
        /// "high"/"low" for audio
        #[arg(short, long)]
        quality: Option<String>,
        /// Output directory (defaults to the configured download dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Serve {
            host,
            port,
            download_dir,
        } => serve(host, port, download_dir).await,
        Commands::Formats { url } => list_formats(url).await,
        Commands::Fetch {
            url,
            kind,
            quality,
            output,
        } => fetch(url, kind, quality, output).await,
    }
}

/// Start the API server
///
/// # Errors
/// - `SpigotError::Configuration` - Server failed to start
async fn serve(host: String, port: u16, download_dir: Option<PathBuf>) -> Result<()> {
    let mut config = SpigotConfig::from_env();
    config.server.host = host;
    config.server.port = port;
    if let Some(dir) = download_dir {
        config.delivery.download_dir = dir;
    }

    spigot_web::run_server(config)
        .await
        .map_err(|e| SpigotError::Configuration {
            reason: e.to_string(),
        })
}

/// Print available resolutions and audio qualities for a URL
///
/// # Errors
/// - `SpigotError::Extract` - Stream lookup failed
async fn list_formats(url: String) -> Result<()> {
    let extractor = YoutubeExtractor::new();
    let streams = extractor.fetch_streams(&url).await?;

    println!("{}", streams.title);

    let resolutions = select::video_resolutions(&streams.descriptors);
    println!("Video (progressive mp4):");
    if resolutions.is_empty() {
        println!("  none");
    }
    for resolution in resolutions {
        println!("  {resolution}");
    }

    let qualities = select::audio_qualities(&streams.descriptors);
    println!("Audio:");
    if qualities.is_empty() {
        println!("  none");
    }
    for quality in qualities {
        println!("  {quality}");
    }

    Ok(())
}

/// Download a stream to disk
///
/// # Errors
/// - `SpigotError::Extract` - Stream lookup failed
/// - `SpigotError::Selection` - No stream matches the requested quality
/// - `SpigotError::Delivery` - Download failed
async fn fetch(
    url: String,
    kind: String,
    quality: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let request = build_request(&kind, quality.as_deref())?;

    let config = SpigotConfig::from_env();
    let extractor: Arc<dyn StreamExtractor> = Arc::new(YoutubeExtractor::new());
    let fetcher = Fetcher::new(&config.fetch, &config.delivery)?;

    let streams = extractor.fetch_streams(&url).await?;
    let descriptor = select::select(&streams.descriptors, &request)?;
    let filename = streams.suggested_filename(descriptor);

    let dir = output.unwrap_or(config.delivery.download_dir);
    println!("Downloading '{}' ({})...", streams.title, request.hint);

    let path = fetcher.persist(&descriptor.url, &dir, &filename).await?;
    println!("Saved to {}", path.display());

    Ok(())
}

/// Translate CLI arguments into a selection request
fn build_request(kind: &str, quality: Option<&str>) -> Result<SelectionRequest> {
    match kind {
        "video" => Ok(SelectionRequest::new(
            TrackKind::Video,
            QualityHint::from_resolution_param(quality),
        )),
        "audio" => {
            let hint = QualityHint::from_audio_param(quality)?;
            Ok(SelectionRequest::new(TrackKind::Audio, hint))
        }
        other => Err(SpigotError::Configuration {
            reason: format!("kind must be 'video' or 'audio', got '{other}'"),
        }),
    }
}
