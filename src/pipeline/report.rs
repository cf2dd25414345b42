use crate::segmentation::SegmentInterval;
use crate::sources::FetchedMedia;
use std::path::PathBuf;

/// One finished clip
#[derive(Debug, Clone, PartialEq)]
pub struct ProducedClip {
    /// 1-based clip number, as used in the output file names
    pub index: usize,
    pub start: f64,
    pub end: f64,
    /// Captioned video
    pub video: PathBuf,
    pub subtitles: PathBuf,
    pub transcript: PathBuf,
}

impl ProducedClip {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn interval(&self) -> SegmentInterval {
        SegmentInterval {
            start: self.start,
            end: self.end,
        }
    }
}

/// Result of a pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct ClipReport {
    pub source: FetchedMedia,
    pub full_subtitles: PathBuf,
    pub full_transcript: PathBuf,
    pub split_points: Vec<f64>,
    /// Stanzas dropped when re-reading the persisted subtitles
    pub skipped_stanzas: usize,
    pub clips: Vec<ProducedClip>,
}

impl ClipReport {
    pub fn total_duration(&self) -> f64 {
        self.clips.iter().map(ProducedClip::duration).sum()
    }

    pub fn print_summary(&self) {
        println!("🎬 {} clip(s) from {}", self.clips.len(), self.source.path.display());
        for clip in &self.clips {
            println!(
                "  #{:<3} {:>9.2}s -> {:>9.2}s  {}",
                clip.index,
                clip.start,
                clip.end,
                clip.video.display()
            );
        }
        if self.skipped_stanzas > 0 {
            println!("⚠️  {} subtitle stanza(s) skipped", self.skipped_stanzas);
        }
    }
}
