mod clip_pipeline;
mod report;

pub use clip_pipeline::ClipPipeline;
pub use report::{ClipReport, ProducedClip};
