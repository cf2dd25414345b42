use super::chunker::chunk_text;
use super::types::{Cue, CueTimeline, RecognizedSegment};
use log::{debug, info};

/// Convert one recognized segment into cues, numbering from `next_index`
///
/// The segment duration is shared equally between its chunks so the cues
/// partition `[segment.start, segment.end]` in text order. Returns the cues and
/// the index the next segment should start from; a segment without words
/// produces no cues and leaves the index unchanged.
pub fn build_segment_cues(segment: &RecognizedSegment, next_index: usize) -> (Vec<Cue>, usize) {
    let chunks = chunk_text(segment.text.trim());
    if chunks.is_empty() {
        debug!(
            "Segment {:.3}-{:.3} has no words, skipping",
            segment.start, segment.end
        );
        return (Vec::new(), next_index);
    }

    let chunk_duration = (segment.end - segment.start) / chunks.len() as f64;
    let last = chunks.len() - 1;
    let mut index = next_index;
    let mut cues = Vec::with_capacity(chunks.len());

    for (j, chunk) in chunks.into_iter().enumerate() {
        let start = segment.start + j as f64 * chunk_duration;
        // the last cue ends exactly on the segment end
        let end = if j == last {
            segment.end
        } else {
            (segment.start + (j + 1) as f64 * chunk_duration).min(segment.end)
        };

        cues.push(Cue::new(index, start, end, chunk));
        index += 1;
    }

    (cues, index)
}

/// Build the full caption timeline for an ordered sequence of recognized segments
pub fn build_timeline(segments: &[RecognizedSegment]) -> CueTimeline {
    let mut cues = Vec::new();
    let mut next_index = 1;

    for segment in segments {
        let (segment_cues, advanced) = build_segment_cues(segment, next_index);
        cues.extend(segment_cues);
        next_index = advanced;
    }

    info!(
        "Built {} cues from {} recognized segments",
        cues.len(),
        segments.len()
    );
    CueTimeline::from_cues(cues)
}
