use super::transcript::TranscriptExcerpt;
use crate::cues::{read_timeline, Cue, CueTimeline};
use crate::errors::{ClipResult, SegmentationError};
use log::debug;
use std::path::Path;

/// Segment-scoped timeline and its transcript excerpt
#[derive(Debug, Clone, PartialEq)]
pub struct SlicedTimeline {
    pub timeline: CueTimeline,
    pub transcript: TranscriptExcerpt,
}

/// Cut the cues overlapping `[start_time, end_time)` out of a timeline
///
/// Included cues are clamped to the interval, shifted so `start_time` maps to
/// 0 and renumbered from 1 in source order. Cues that only touch a boundary
/// are left out.
pub fn slice_timeline(
    timeline: &CueTimeline,
    start_time: f64,
    end_time: f64,
) -> ClipResult<SlicedTimeline> {
    if !start_time.is_finite() || !end_time.is_finite() || start_time < 0.0 || start_time >= end_time
    {
        return Err(SegmentationError::InvalidInterval {
            start: start_time,
            end: end_time,
        }
        .into());
    }

    let cues: Vec<Cue> = timeline
        .iter()
        .filter(|cue| cue.overlaps(start_time, end_time))
        .zip(1..)
        .map(|(cue, index)| {
            Cue::new(
                index,
                cue.start.max(start_time) - start_time,
                cue.end.min(end_time) - start_time,
                cue.text.clone(),
            )
        })
        .collect();

    debug!(
        "Sliced {} of {} cues into [{:.3}, {:.3})",
        cues.len(),
        timeline.len(),
        start_time,
        end_time
    );

    let timeline = CueTimeline::from_cues(cues);
    let transcript = TranscriptExcerpt::from_timeline(&timeline);
    Ok(SlicedTimeline {
        timeline,
        transcript,
    })
}

/// Read a persisted SRT timeline and slice it
pub fn slice_timeline_file<P: AsRef<Path>>(
    path: P,
    start_time: f64,
    end_time: f64,
) -> ClipResult<SlicedTimeline> {
    let parsed = read_timeline(path)?;
    slice_timeline(&parsed.timeline, start_time, end_time)
}
