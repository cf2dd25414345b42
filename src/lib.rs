pub mod timecode;
pub use timecode::{decode, encode};

pub mod cues;
pub use cues::{Cue, CueTimeline, ParsedTimeline, RecognizedSegment, WordTimestamp};

pub mod segmentation;
pub use segmentation::{
    plan_segments, select_split_points, slice_timeline, SegmentInterval, SlicedTimeline,
    TranscriptExcerpt,
};

pub mod process;
pub use process::{CommandOutput, CommandRunner, Invocation, TokioCommandRunner};

pub mod recognizer;
pub use recognizer::{Recognizer, Transcription, WhisperCliRecognizer};

pub mod sources;
pub use sources::{FetchedMedia, HttpMediaSource, MediaSource, TrendingLookup, YtDlpSource};

pub mod render;
pub use render::{CaptionStyle, FfmpegCompositor, FrameSize};

pub mod config;
pub use config::{Layout, PipelineConfig};

pub mod pipeline;
pub use pipeline::{ClipPipeline, ClipReport, ProducedClip};

pub mod errors;
pub use errors::{
    ClipError, ClipResult, ConfigError, FormatError, RenderError, SegmentationError, SourceError,
    TranscriptionError,
};

use std::path::Path;

/// Transcribe `media` and persist the cue timeline and the plain transcript
///
/// Returns the in-memory timeline that was written to `srt_path`.
pub async fn generate_subtitles<R: Recognizer + ?Sized>(
    recognizer: &R,
    media: &Path,
    srt_path: &Path,
    transcript_path: &Path,
) -> ClipResult<CueTimeline> {
    let transcription = recognizer.transcribe(media).await?;
    let timeline = cues::build_timeline(&transcription.segments);

    cues::write_timeline(srt_path, &timeline)?;
    std::fs::write(transcript_path, format!("{}\n", transcription.text.trim()))?;
    Ok(timeline)
}

/// Split points for a persisted SRT file
pub fn split_points_for_srt<P: AsRef<Path>>(path: P, min_duration: f64) -> ClipResult<Vec<f64>> {
    segmentation::split_points_from_file(path, min_duration)
}
