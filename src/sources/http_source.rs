use super::probe::probe_duration;
use super::types::{FetchedMedia, MediaSource};
use crate::errors::{ClipResult, SourceError};
use crate::process::CommandRunner;
use async_trait::async_trait;
use log::{info, warn};
use reqwest::{header::CONTENT_LENGTH, Client, Url};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::AsyncWriteExt;

/// Downloads a direct media URL into a local directory
pub struct HttpMediaSource<R: CommandRunner> {
    client: Client,
    download_dir: PathBuf,
    runner: R,
    http_request_count: AtomicU64,
    http_request_bytes_read: AtomicU64,
}

impl<R: CommandRunner> HttpMediaSource<R> {
    pub fn new(download_dir: impl Into<PathBuf>, runner: R) -> ClipResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(300))
            .build()
            .map_err(|e| SourceError::new(e.to_string()))?;

        Ok(Self {
            client,
            download_dir: download_dir.into(),
            runner,
            http_request_count: AtomicU64::new(0),
            http_request_bytes_read: AtomicU64::new(0),
        })
    }

    /// HEAD and GET requests sent so far
    pub fn http_request_count(&self) -> u64 {
        self.http_request_count.load(Ordering::Relaxed)
    }

    /// Body bytes written to disk so far
    pub fn http_request_bytes_read(&self) -> u64 {
        self.http_request_bytes_read.load(Ordering::Relaxed)
    }

    pub fn print_stats(&self) {
        let bytes = self.http_request_bytes_read();
        info!("📊 Download Statistics:");
        info!("   🔢 HTTP Requests: {}", self.http_request_count());
        info!(
            "   📥 Total Downloaded: {} bytes ({:.2} KB, {:.2} MB)",
            bytes,
            bytes as f64 / 1024.0,
            bytes as f64 / 1024.0 / 1024.0
        );
    }

    /// Size announced by a HEAD request, when the server reports one
    async fn content_length(&self, url: &Url) -> ClipResult<Option<u64>> {
        let response = self
            .client
            .head(url.clone())
            .send()
            .await
            .map_err(|e| SourceError::new(e.to_string()))?;

        self.http_request_count.fetch_add(1, Ordering::Relaxed);

        if !response.status().is_success() {
            return Err(SourceError::new(format!("HTTP error: {}", response.status())).into());
        }

        Ok(response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok()))
    }

    /// Stream the body of `url` into `target`, returning the byte count
    pub async fn download(&self, url: &Url, target: &Path) -> ClipResult<u64> {
        let expected = self.content_length(url).await?;

        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| SourceError::new(e.to_string()))?;

        self.http_request_count.fetch_add(1, Ordering::Relaxed);

        if !response.status().is_success() {
            return Err(SourceError::new(format!("HTTP error: {}", response.status())).into());
        }

        let mut file = tokio::fs::File::create(target).await?;
        let mut written = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| SourceError::new(e.to_string()))?
        {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        self.http_request_bytes_read
            .fetch_add(written, Ordering::Relaxed);

        if let Some(expected) = expected {
            if expected != written {
                warn!(
                    "Download of {} truncated: {} of {} bytes",
                    url, written, expected
                );
                return Err(SourceError::new(format!(
                    "incomplete download: received {} of {} bytes",
                    written, expected
                ))
                .into());
            }
        }

        Ok(written)
    }
}

/// Local file name for a media URL: its last path segment, or `download.mp4`
pub(crate) fn file_name_for(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "download.mp4".to_string())
}

#[async_trait]
impl<R: CommandRunner> MediaSource for HttpMediaSource<R> {
    async fn fetch(&self, query: &str) -> ClipResult<FetchedMedia> {
        let url = Url::parse(query)
            .map_err(|e| SourceError::new(format!("'{}' is not a media URL: {}", query, e)))?;

        tokio::fs::create_dir_all(&self.download_dir).await?;
        let path = self.download_dir.join(file_name_for(&url));

        info!("Downloading {} to {}", url, path.display());
        let bytes = self.download(&url, &path).await?;
        info!("Downloaded {} bytes", bytes);
        self.print_stats();

        let duration = probe_duration(&self.runner, &path).await?;

        Ok(FetchedMedia { path, duration })
    }
}
