use crate::cues::{read_timeline, CueTimeline};
use crate::errors::{ClipResult, SegmentationError};
use log::debug;
use std::path::Path;

/// Choose segment boundaries at sentence-final cues
///
/// Scans the timeline in order keeping the last accepted boundary (initially 0).
/// The end of a sentence-final cue is accepted when it lies at least
/// `min_duration` after that boundary; rejected candidates do not move it.
/// The end of the video is never added, so the tail after the last boundary
/// is left to the caller.
pub fn select_split_points(timeline: &CueTimeline, min_duration: f64) -> Vec<f64> {
    let mut split_points = Vec::new();
    let mut last_split = 0.0;

    for cue in timeline.iter().filter(|cue| cue.is_sentence_final()) {
        let gap = cue.end - last_split;
        if gap >= min_duration && cue.end > last_split {
            debug!(
                "Split at {:.3}s after cue #{} ({:.3}s since previous split)",
                cue.end, cue.index, gap
            );
            split_points.push(cue.end);
            last_split = cue.end;
        }
    }

    split_points
}

/// Like [`select_split_points`], but an empty result is a [`SegmentationError::NoSplitPoints`]
pub fn require_split_points(timeline: &CueTimeline, min_duration: f64) -> ClipResult<Vec<f64>> {
    let split_points = select_split_points(timeline, min_duration);
    if split_points.is_empty() {
        return Err(SegmentationError::NoSplitPoints { min_duration }.into());
    }
    Ok(split_points)
}

/// Read a persisted SRT timeline and select split points from it
pub fn split_points_from_file<P: AsRef<Path>>(path: P, min_duration: f64) -> ClipResult<Vec<f64>> {
    let parsed = read_timeline(path)?;
    Ok(select_split_points(&parsed.timeline, min_duration))
}

/// Half-open output interval `[start, end)` in source time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentInterval {
    pub start: f64,
    pub end: f64,
}

impl SegmentInterval {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Turn split points into consecutive intervals starting at 0
///
/// With `include_remainder` and a known media duration, the tail after the
/// last split point becomes one more interval when it is not empty.
pub fn plan_segments(
    split_points: &[f64],
    media_duration: Option<f64>,
    include_remainder: bool,
) -> Vec<SegmentInterval> {
    let mut intervals = Vec::with_capacity(split_points.len() + 1);
    let mut start = 0.0;

    for &end in split_points {
        intervals.push(SegmentInterval { start, end });
        start = end;
    }

    if include_remainder {
        if let Some(duration) = media_duration {
            if duration > start {
                intervals.push(SegmentInterval {
                    start,
                    end: duration,
                });
            }
        }
    }

    intervals
}
