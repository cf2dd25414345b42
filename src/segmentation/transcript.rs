use crate::cues::CueTimeline;
use crate::errors::ClipResult;
use std::path::Path;

/// Cue texts of one timeline, one line per cue in cue order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptExcerpt {
    lines: Vec<String>,
}

impl TranscriptExcerpt {
    pub fn from_timeline(timeline: &CueTimeline) -> Self {
        Self {
            lines: timeline.texts(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Newline-terminated text, no blank separators
    pub fn to_text(&self) -> String {
        self.lines
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| format!("{}\n", line.trim()))
            .collect()
    }

    pub fn parse(text: &str) -> Self {
        Self {
            lines: text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

pub fn write_transcript<P: AsRef<Path>>(path: P, excerpt: &TranscriptExcerpt) -> ClipResult<()> {
    std::fs::write(path, excerpt.to_text())?;
    Ok(())
}

pub fn read_transcript<P: AsRef<Path>>(path: P) -> ClipResult<TranscriptExcerpt> {
    let text = std::fs::read_to_string(path)?;
    Ok(TranscriptExcerpt::parse(&text))
}
