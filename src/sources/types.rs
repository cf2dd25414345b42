use crate::errors::ClipResult;
use async_trait::async_trait;
use std::path::PathBuf;

/// A media file made available locally
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedMedia {
    pub path: PathBuf,
    /// Duration in seconds
    pub duration: f64,
}

/// Media retrieval collaborator
///
/// `query` is a URL, a platform identifier or a search phrase depending on the
/// implementation. Failures are reported as [`crate::ClipError::Source`].
#[async_trait]
pub trait MediaSource: Send + Sync {
    async fn fetch(&self, query: &str) -> ClipResult<FetchedMedia>;
}
