mod slicer;
mod split_points;
mod transcript;

pub use slicer::{slice_timeline, slice_timeline_file, SlicedTimeline};
pub use split_points::{
    plan_segments, require_split_points, select_split_points, split_points_from_file,
    SegmentInterval,
};
pub use transcript::{read_transcript, write_transcript, TranscriptExcerpt};
