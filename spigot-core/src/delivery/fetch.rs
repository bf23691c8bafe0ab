//! HTTP fetcher for proxying stream bytes.
//!
//! Downloads a selected descriptor's direct URL either fully into memory
//! (inline delivery) or onto disk (attachment delivery). Writes go to a
//! temporary file first and are renamed once complete, so a crashed
//! download never leaves a partial file under the final name.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::config::{DeliveryConfig, FetchConfig};

/// Errors that can occur while fetching stream bytes.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The CDN request failed or returned a non-success status.
    #[error("HTTP fetch failed: {reason}")]
    Http {
        /// The reason for the HTTP failure
        reason: String,
    },

    /// The download exceeds the inline buffering limit.
    #[error("Download of {size} bytes exceeds inline limit of {limit} bytes")]
    TooLarge {
        /// Observed (or declared) download size in bytes
        size: u64,
        /// Configured inline limit in bytes
        limit: u64,
    },

    /// Disk I/O failed while persisting a download.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP client wrapper implementing the buffer and persist delivery modes.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    max_inline_bytes: u64,
    temp_file_suffix: &'static str,
}

impl Fetcher {
    /// Creates a fetcher from the fetch and delivery configuration.
    ///
    /// # Errors
    /// - `DeliveryError::Http` - The underlying HTTP client could not be built
    pub fn new(fetch: &FetchConfig, delivery: &DeliveryConfig) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .user_agent(fetch.user_agent)
            .connect_timeout(fetch.connect_timeout)
            .build()
            .map_err(|e| DeliveryError::Http {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            max_inline_bytes: delivery.max_inline_bytes,
            temp_file_suffix: delivery.temp_file_suffix,
        })
    }

    /// Downloads the URL fully into memory.
    ///
    /// # Errors
    /// - `DeliveryError::Http` - Request failed or returned an error status
    /// - `DeliveryError::TooLarge` - Body exceeds the configured inline limit
    pub async fn buffer(&self, url: &str) -> Result<Bytes, DeliveryError> {
        let mut response = self.get(url).await?;

        if let Some(declared) = response.content_length() {
            if declared > self.max_inline_bytes {
                return Err(DeliveryError::TooLarge {
                    size: declared,
                    limit: self.max_inline_bytes,
                });
            }
        }

        let mut buffer: Vec<u8> = Vec::new();
        while let Some(chunk) = self.next_chunk(&mut response).await? {
            if (buffer.len() + chunk.len()) as u64 > self.max_inline_bytes {
                return Err(DeliveryError::TooLarge {
                    size: (buffer.len() + chunk.len()) as u64,
                    limit: self.max_inline_bytes,
                });
            }
            buffer.extend_from_slice(&chunk);
        }

        debug!("Buffered {} bytes from {url}", buffer.len());
        Ok(Bytes::from(buffer))
    }

    /// Streams the URL to `<dir>/<filename>` and returns the final path.
    ///
    /// The caller is responsible for supplying an already-sanitized
    /// filename.
    ///
    /// # Errors
    /// - `DeliveryError::Http` - Request failed or returned an error status
    /// - `DeliveryError::Io` - Creating, writing, or renaming the file failed
    pub async fn persist(
        &self,
        url: &str,
        dir: &Path,
        filename: &str,
    ) -> Result<PathBuf, DeliveryError> {
        tokio::fs::create_dir_all(dir).await?;

        let final_path = dir.join(filename);
        let temp_path = dir.join(format!("{filename}{}", self.temp_file_suffix));

        let mut response = self.get(url).await?;
        let mut file = tokio::fs::File::create(&temp_path).await?;
        let mut written: u64 = 0;

        while let Some(chunk) = self.next_chunk(&mut response).await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        file.flush().await?;
        drop(file);
        tokio::fs::rename(&temp_path, &final_path).await?;

        info!("Persisted {written} bytes to {}", final_path.display());
        Ok(final_path)
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, DeliveryError> {
        self.client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| DeliveryError::Http {
                reason: e.to_string(),
            })
    }

    async fn next_chunk(
        &self,
        response: &mut reqwest::Response,
    ) -> Result<Option<Bytes>, DeliveryError> {
        response.chunk().await.map_err(|e| DeliveryError::Http {
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    use super::*;

    /// Serves one HTTP response with the given body on a local port.
    async fn serve_once(body: Vec<u8>) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut request = [0u8; 1024];
                let _ = socket.read(&mut request).await;

                let header = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = socket.write_all(header.as_bytes()).await;
                let _ = socket.write_all(&body).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{addr}/media")
    }

    fn fetcher(max_inline_bytes: u64) -> Fetcher {
        let delivery = DeliveryConfig {
            max_inline_bytes,
            ..Default::default()
        };
        Fetcher::new(&FetchConfig::default(), &delivery).unwrap()
    }

    #[tokio::test]
    async fn test_buffer_returns_body() {
        let url = serve_once(b"stream bytes".to_vec()).await;
        let bytes = fetcher(1024).buffer(&url).await.unwrap();

        assert_eq!(&bytes[..], b"stream bytes");
    }

    #[tokio::test]
    async fn test_buffer_rejects_oversized_body() {
        let url = serve_once(vec![0u8; 64]).await;
        let result = fetcher(16).buffer(&url).await;

        assert!(matches!(result, Err(DeliveryError::TooLarge { .. })));
    }

    #[tokio::test]
    async fn test_persist_writes_final_file_only() {
        let url = serve_once(b"persisted".to_vec()).await;
        let dir = tempfile::tempdir().unwrap();

        let path = fetcher(1024)
            .persist(&url, dir.path(), "clip.mp4")
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("clip.mp4"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"persisted");
        assert!(!dir.path().join("clip.mp4.tmp").exists());
    }

    #[tokio::test]
    async fn test_fetch_error_surfaces_as_http() {
        let result = fetcher(1024).buffer("http://127.0.0.1:1/unreachable").await;
        assert!(matches!(result, Err(DeliveryError::Http { .. })));
    }
}
