use crate::cues::RecognizedSegment;
use crate::errors::ClipResult;
use async_trait::async_trait;
use std::path::Path;

/// Recognizer output for one media file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcription {
    /// Full concatenated transcript
    pub text: String,
    /// Timed segments in playback order
    pub segments: Vec<RecognizedSegment>,
}

/// Speech-to-text collaborator
///
/// Every failure is reported as a [`crate::ClipError::Transcription`].
#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn transcribe(&self, media_path: &Path) -> ClipResult<Transcription>;
}
