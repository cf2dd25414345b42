mod builder;
mod chunker;
mod srt;
mod types;

pub use builder::{build_segment_cues, build_timeline};
pub use chunker::chunk_text;
pub use srt::{parse, read_timeline, serialize, write_timeline};
pub use types::{
    Cue, CueTimeline, ParsedTimeline, RecognizedSegment, SkippedEntry, WordTimestamp,
};

#[cfg(test)]
pub mod unit_test;
