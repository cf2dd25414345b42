use super::types::{Recognizer, Transcription};
use crate::config::PipelineConfig;
use crate::cues::{RecognizedSegment, WordTimestamp};
use crate::errors::{ClipResult, TranscriptionError};
use crate::process::{CommandRunner, Invocation};
use async_trait::async_trait;
use log::{info, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// JSON document written by `whisper --output_format json`
#[derive(Debug, Deserialize)]
struct WhisperDocument {
    #[serde(default)]
    text: String,
    #[serde(default)]
    segments: Vec<WhisperSegment>,
}

#[derive(Debug, Deserialize)]
struct WhisperSegment {
    start: f64,
    end: f64,
    text: String,
    #[serde(default)]
    words: Vec<WhisperWord>,
}

#[derive(Debug, Deserialize)]
struct WhisperWord {
    word: String,
    start: f64,
    end: f64,
}

/// Convert a whisper JSON document into a [`Transcription`]
///
/// Segments that do not end after they start are dropped.
pub fn parse_whisper_json(json: &str) -> ClipResult<Transcription> {
    let document: WhisperDocument = serde_json::from_str(json)
        .map_err(|e| TranscriptionError::new(format!("invalid whisper JSON: {}", e)))?;

    let mut segments = Vec::with_capacity(document.segments.len());
    for segment in document.segments {
        if segment.end <= segment.start {
            warn!(
                "Dropping recognized segment with non-positive duration ({:.3}-{:.3})",
                segment.start, segment.end
            );
            continue;
        }

        segments.push(RecognizedSegment {
            start: segment.start,
            end: segment.end,
            text: segment.text,
            words: segment
                .words
                .into_iter()
                .map(|w| WordTimestamp {
                    word: w.word.trim().to_string(),
                    start: w.start,
                    end: w.end,
                })
                .collect(),
        });
    }

    Ok(Transcription {
        text: document.text.trim().to_string(),
        segments,
    })
}

/// [`Recognizer`] that shells out to the `whisper` command line tool
pub struct WhisperCliRecognizer<R: CommandRunner> {
    runner: R,
    program: String,
    model: String,
    scratch_dir: PathBuf,
}

impl<R: CommandRunner> WhisperCliRecognizer<R> {
    pub fn new(runner: R, model: impl Into<String>, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            program: "whisper".to_string(),
            model: model.into(),
            scratch_dir: scratch_dir.into(),
        }
    }

    /// Recognizer using the configured `whisper_model`, writing its JSON under
    /// `<download_dir>/whisper`
    pub fn from_config(runner: R, config: &PipelineConfig) -> Self {
        Self::new(
            runner,
            config.whisper_model.clone(),
            config.download_dir.join("whisper"),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Use a different executable name or path
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn invocation(&self, media_path: &Path) -> Invocation {
        Invocation::new(self.program.clone())
            .path_arg(media_path)
            .args(["--model", self.model.as_str()])
            .args(["--word_timestamps", "True"])
            .args(["--output_format", "json"])
            .arg("--output_dir")
            .path_arg(&self.scratch_dir)
    }

    /// Where whisper writes its JSON for `media_path`
    pub fn output_path(&self, media_path: &Path) -> PathBuf {
        let stem = media_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "transcript".to_string());
        self.scratch_dir.join(format!("{}.json", stem))
    }
}

#[async_trait]
impl<R: CommandRunner> Recognizer for WhisperCliRecognizer<R> {
    async fn transcribe(&self, media_path: &Path) -> ClipResult<Transcription> {
        info!(
            "Transcribing {} with whisper model '{}'",
            media_path.display(),
            self.model
        );
        tokio::fs::create_dir_all(&self.scratch_dir)
            .await
            .map_err(|e| TranscriptionError::new(format!("cannot create scratch dir: {}", e)))?;

        let output = self
            .runner
            .run(self.invocation(media_path))
            .await
            .map_err(|e| TranscriptionError::new(format!("failed to start whisper: {}", e)))?;

        if !output.is_success() {
            return Err(TranscriptionError::new(format!(
                "whisper exited with status {:?}: {}",
                output.status,
                output.stderr_tail(5)
            ))
            .into());
        }

        let json_path = self.output_path(media_path);
        let json = tokio::fs::read_to_string(&json_path).await.map_err(|e| {
            TranscriptionError::new(format!(
                "cannot read whisper output {}: {}",
                json_path.display(),
                e
            ))
        })?;

        let transcription = parse_whisper_json(&json)?;
        info!(
            "Recognized {} segments ({} characters)",
            transcription.segments.len(),
            transcription.text.len()
        );
        Ok(transcription)
    }
}
