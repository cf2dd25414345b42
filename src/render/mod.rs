mod compositor;
mod style;

pub use compositor::FfmpegCompositor;
pub use style::{CaptionStyle, FrameSize};

#[cfg(test)]
pub mod unit_test;
