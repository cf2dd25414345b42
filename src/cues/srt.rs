use super::types::{Cue, CueTimeline, ParsedTimeline, SkippedEntry};
use crate::errors::ClipResult;
use crate::timecode::{decode, encode};
use log::{debug, warn};
use std::fmt::Write as _;
use std::path::Path;

const TIME_SEPARATOR: &str = "-->";

/// Render a timeline as SRT text
///
/// Each cue becomes an index line, a `start --> end` line, the text line and a
/// blank separator line.
pub fn serialize(timeline: &CueTimeline) -> String {
    let mut out = String::new();
    for cue in timeline {
        // writing into a String cannot fail
        let _ = write!(
            out,
            "{}\n{} {} {}\n{}\n\n",
            cue.index,
            encode(cue.start),
            TIME_SEPARATOR,
            encode(cue.end),
            cue.text
        );
    }
    out
}

/// Parse SRT text leniently
///
/// Stanzas are separated by blank lines. A stanza with fewer than three lines,
/// without `-->` on its second line, with an undecodable timestamp, or ending
/// before it starts is skipped and reported in [`ParsedTimeline::skipped`].
/// Text lines are joined with single spaces and cues are renumbered from 1.
pub fn parse(text: &str) -> ParsedTimeline {
    let mut cues = Vec::new();
    let mut skipped = Vec::new();

    for (ordinal, stanza) in (1..).zip(stanzas(text)) {
        match parse_stanza(&stanza) {
            Ok((start, end, text)) => {
                cues.push(Cue::new(cues.len() + 1, start, end, text));
            }
            Err(reason) => {
                debug!("Skipping SRT stanza #{}: {}", ordinal, reason);
                skipped.push(SkippedEntry { ordinal, reason });
            }
        }
    }

    ParsedTimeline {
        timeline: CueTimeline::from_cues(cues),
        skipped,
    }
}

/// Group non-blank lines into stanzas, splitting on blank lines
fn stanzas(text: &str) -> Vec<Vec<&str>> {
    let mut groups = Vec::new();
    let mut current = Vec::new();

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        groups.push(current);
    }

    groups
}

fn parse_stanza(lines: &[&str]) -> Result<(f64, f64, String), String> {
    if lines.len() < 3 {
        return Err(format!("expected at least 3 lines, found {}", lines.len()));
    }

    let (start_raw, end_raw) = lines[1]
        .split_once(TIME_SEPARATOR)
        .ok_or_else(|| format!("time line '{}' has no '{}'", lines[1], TIME_SEPARATOR))?;

    let start = decode(start_raw).map_err(|e| e.message)?;
    let end = decode(end_raw).map_err(|e| e.message)?;
    if end < start {
        return Err(format!("cue ends ({}) before it starts ({})", end, start));
    }

    let text = lines[2..]
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join(" ");

    Ok((start, end, text))
}

/// Read and parse an SRT file, logging every skipped stanza
pub fn read_timeline<P: AsRef<Path>>(path: P) -> ClipResult<ParsedTimeline> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let parsed = parse(&text);

    for entry in &parsed.skipped {
        warn!(
            "{}: skipped malformed stanza #{}: {}",
            path.display(),
            entry.ordinal,
            entry.reason
        );
    }

    debug!(
        "Read {} cues from {} ({} skipped)",
        parsed.timeline.len(),
        path.display(),
        parsed.skipped.len()
    );
    Ok(parsed)
}

/// Serialize a timeline to an SRT file
pub fn write_timeline<P: AsRef<Path>>(path: P, timeline: &CueTimeline) -> ClipResult<()> {
    std::fs::write(path, serialize(timeline))?;
    Ok(())
}
