use serde::{Deserialize, Serialize};

/// Word-level timing reported by some recognizers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTimestamp {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

/// One unit of speech-recognition output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<WordTimestamp>,
}

impl RecognizedSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            words: Vec::new(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// One timed caption entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// 1-based position within its timeline
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Cue {
    pub fn new(index: usize, start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            index,
            start,
            end,
            text: text.into(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the cue text closes a sentence (`.`, `!` or `?` before trailing whitespace)
    pub fn is_sentence_final(&self) -> bool {
        self.text
            .trim_end()
            .ends_with(|c: char| matches!(c, '.' | '!' | '?'))
    }

    /// Strict overlap with `[start, end)`; touching cues do not overlap
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        self.end > start && self.start < end
    }
}

/// Ordered caption track for a whole video or for one segment of it
///
/// Timelines are values: slicing produces a new timeline and never edits one in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CueTimeline {
    cues: Vec<Cue>,
}

impl CueTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a timeline from cue texts and times, numbering from 1 in the given order
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64, S)>,
        S: Into<String>,
    {
        let cues = (1..)
            .zip(entries)
            .map(|(index, (start, end, text))| Cue::new(index, start, end, text))
            .collect();
        Self { cues }
    }

    pub(crate) fn from_cues(cues: Vec<Cue>) -> Self {
        Self { cues }
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cue> {
        self.cues.iter()
    }

    /// End of the last cue, or 0 for an empty timeline
    pub fn end_time(&self) -> f64 {
        self.cues.iter().map(|cue| cue.end).fold(0.0, f64::max)
    }

    /// Cue texts in timeline order
    pub fn texts(&self) -> Vec<String> {
        self.cues.iter().map(|cue| cue.text.clone()).collect()
    }

    pub fn into_cues(self) -> Vec<Cue> {
        self.cues
    }
}

impl<'a> IntoIterator for &'a CueTimeline {
    type Item = &'a Cue;
    type IntoIter = std::slice::Iter<'a, Cue>;

    fn into_iter(self) -> Self::IntoIter {
        self.cues.iter()
    }
}

/// Stanza dropped while parsing a timeline
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    /// 1-based position of the stanza in the source text
    pub ordinal: usize,
    pub reason: String,
}

/// Parse outcome: the recovered timeline plus every stanza that was skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTimeline {
    pub timeline: CueTimeline,
    pub skipped: Vec<SkippedEntry>,
}

impl ParsedTimeline {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}
