use crate::errors::{ClipResult, ConfigError};
use crate::render::{CaptionStyle, FrameSize};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// How each segment is composed into the vertical frame
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layout {
    /// Source on a blurred copy of itself
    BlurredBackground,
    /// Source stacked above filler footage fetched with `query`
    FillerStack { query: String },
}

impl Default for Layout {
    fn default() -> Self {
        Layout::BlurredBackground
    }
}

/// Settings for one pipeline run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Shortest allowed distance between two split points, in seconds
    pub min_segment_duration: f64,
    pub output_dir: PathBuf,
    pub download_dir: PathBuf,
    /// Also produce the tail after the last split point
    pub include_remainder: bool,
    pub layout: Layout,
    pub frame: FrameSize,
    pub blur_sigma: f64,
    pub caption_style: CaptionStyle,
    /// Clip appended to every composed segment before captioning
    pub ending_clip: Option<PathBuf>,
    pub whisper_model: String,
    pub max_filler_fetches: usize,
    pub keep_intermediates: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_segment_duration: 60.0,
            output_dir: PathBuf::from("output"),
            download_dir: PathBuf::from("downloads"),
            include_remainder: false,
            layout: Layout::default(),
            frame: FrameSize::default(),
            blur_sigma: 20.0,
            caption_style: CaptionStyle::default(),
            ending_clip: None,
            whisper_model: "base".to_string(),
            max_filler_fetches: 10,
            keep_intermediates: false,
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(text: &str) -> ClipResult<Self> {
        let config: PipelineConfig =
            toml::from_str(text).map_err(|e| ConfigError::new(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> ClipResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("cannot read config {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> ClipResult<()> {
        if !(self.min_segment_duration.is_finite() && self.min_segment_duration > 0.0) {
            return Err(ConfigError::new(format!(
                "min_segment_duration must be positive, got {}",
                self.min_segment_duration
            ))
            .into());
        }
        if self.frame.width == 0 || self.frame.height == 0 {
            return Err(ConfigError::new("frame width and height must be non-zero").into());
        }
        if self.whisper_model.trim().is_empty() {
            return Err(ConfigError::new("whisper_model must not be empty").into());
        }
        if self.blur_sigma < 0.0 {
            return Err(ConfigError::new("blur_sigma must not be negative").into());
        }
        if matches!(&self.layout, Layout::FillerStack { .. }) && self.max_filler_fetches == 0 {
            return Err(ConfigError::new("filler_stack layout needs max_filler_fetches > 0").into());
        }
        Ok(())
    }

    pub fn script_dir(&self) -> PathBuf {
        self.output_dir.join("script")
    }

    pub fn video_dir(&self) -> PathBuf {
        self.output_dir.join("video")
    }

    pub fn captioned_dir(&self) -> PathBuf {
        self.output_dir.join("video_sub")
    }
}
