use crate::cues::{
    build_segment_cues, build_timeline, chunk_text, parse, read_timeline, serialize,
    write_timeline, Cue, CueTimeline, RecognizedSegment,
};
use proptest::prelude::*;

#[cfg(test)]
mod test_helpers {
    pub const SAMPLE_SRT: &str = "1\n00:00:00,000 --> 00:00:02,000\nthe quick\n\n\
2\n00:00:02,000 --> 00:00:04,000\nfox\n\n\
3\n00:00:04,000 --> 00:00:06,000\njumps.\n\n";

    pub fn word_strategy() -> impl proptest::strategy::Strategy<Value = String> {
        proptest::prop_oneof![
            proptest::sample::select(vec!["the", "The", "of", "and", "two", "my", "a"])
                .prop_map(str::to_string),
            "[a-zA-Z']{1,8}[,.!?;:]?",
        ]
    }

    use proptest::strategy::Strategy;
}

#[test]
fn test_chunk_groups_function_words_with_next_word() {
    assert_eq!(
        chunk_text("the quick fox jumps"),
        vec!["the quick", "fox", "jumps"]
    );
    assert_eq!(
        chunk_text("The cat sat on the mat"),
        vec!["The cat", "sat", "on the", "mat"]
    );
}

#[test]
fn test_chunk_trailing_function_word_stands_alone() {
    assert_eq!(chunk_text("where are you going to"), vec![
        "where", "are", "you", "going", "to"
    ]);
}

#[test]
fn test_chunk_does_not_group_across_punctuation() {
    // "and," closes its clause, so it cannot swallow "then"
    assert_eq!(
        chunk_text("salt and, then the pepper."),
        vec!["salt", "and,", "then", "the pepper."]
    );
    assert_eq!(
        chunk_text("I said no. Two more."),
        vec!["I", "said", "no.", "Two more."]
    );
}

#[test]
fn test_chunk_normalizes_whitespace_and_handles_empty() {
    assert_eq!(chunk_text("  hello \t  world \n"), vec!["hello", "world"]);
    assert!(chunk_text("").is_empty());
    assert!(chunk_text("   \n\t ").is_empty());
}

#[test]
fn test_segment_cues_partition_segment() {
    let segment = RecognizedSegment::new(10.0, 16.0, "the quick fox jumps");
    let (cues, next) = build_segment_cues(&segment, 1);

    assert_eq!(next, 4);
    assert_eq!(cues.len(), 3);
    assert_eq!(cues[0].start, 10.0);
    for pair in cues.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
        assert!(pair[0].start < pair[0].end);
    }
    assert_eq!(cues.last().unwrap().end, 16.0);
    assert_eq!(cues[0].text, "the quick");
    assert_eq!(cues[1].index, 2);
}

#[test]
fn test_segment_without_words_keeps_index() {
    let segment = RecognizedSegment::new(0.0, 1.0, "   ");
    let (cues, next) = build_segment_cues(&segment, 7);
    assert!(cues.is_empty());
    assert_eq!(next, 7);
}

#[test]
fn test_timeline_index_continues_across_segments() {
    let segments = vec![
        RecognizedSegment::new(0.0, 2.0, " Hello world. "),
        RecognizedSegment::new(2.0, 3.0, ""),
        RecognizedSegment::new(3.0, 6.0, "And then the end!"),
    ];
    let timeline = build_timeline(&segments);

    let indices: Vec<usize> = timeline.iter().map(|cue| cue.index).collect();
    assert_eq!(indices, vec![1, 2, 3, 4]);
    assert_eq!(
        timeline.texts(),
        vec!["Hello", "world.", "And then", "the end!"]
    );
    assert_eq!(timeline.cues()[2].start, 3.0);
    assert_eq!(timeline.end_time(), 6.0);
}

#[test]
fn test_serialize_writes_four_line_stanzas() {
    let timeline = CueTimeline::from_entries(vec![(0.0, 2.0, "the quick"), (2.0, 4.0, "fox")]);
    let text = serialize(&timeline);
    assert_eq!(
        text,
        "1\n00:00:00,000 --> 00:00:02,000\nthe quick\n\n2\n00:00:02,000 --> 00:00:04,000\nfox\n\n"
    );

    let stanza = regex::Regex::new(r"^\d+\n\d{2,}:\d{2}:\d{2},\d{3} --> \d{2,}:\d{2}:\d{2},\d{3}\n")
        .unwrap();
    assert!(stanza.is_match(&text));
}

#[test]
fn test_parse_sample() {
    let parsed = parse(test_helpers::SAMPLE_SRT);
    assert!(parsed.is_clean());
    assert_eq!(parsed.timeline.len(), 3);
    assert_eq!(parsed.timeline.cues()[2], Cue::new(3, 4.0, 6.0, "jumps."));
}

#[test]
fn test_parse_skips_malformed_stanzas_and_renumbers() {
    let text = "7\n00:00:01,000 --> 00:00:02,000\nfirst\n\n\
9\n00:00:02,000 00:00:03,000\nno arrow\n\n\
only two\nlines\n\n\
11\n00:00:03,000 --> 00:00:0x,000\nbad time\n\n\
12\n00:00:05,000 --> 00:00:04,000\nbackwards\n\n\
42\r\n00:00:04,000 --> 00:00:05,500\r\nmulti\r\n  line text\r\n\r\n\n\n";
    let parsed = parse(text);

    assert_eq!(parsed.timeline.len(), 2);
    assert_eq!(parsed.timeline.cues()[0].index, 1);
    assert_eq!(parsed.timeline.cues()[1], Cue::new(2, 4.0, 5.5, "multi line text"));

    let ordinals: Vec<usize> = parsed.skipped.iter().map(|s| s.ordinal).collect();
    assert_eq!(ordinals, vec![2, 3, 4, 5]);
    assert!(parsed.skipped[0].reason.contains("-->"));
}

#[test]
fn test_parse_skips_stanza_with_oversized_hours() {
    let text = "1\n00:00:01,000 --> 00:00:02,000\nok\n\n\
2\n99999999999999999:00:00,000 --> 99999999999999999:00:01,000\nhand edited\n\n";
    let parsed = parse(text);

    assert_eq!(parsed.timeline.len(), 1);
    assert_eq!(parsed.timeline.cues()[0], Cue::new(1, 1.0, 2.0, "ok"));
    assert_eq!(parsed.skipped.len(), 1);
    assert_eq!(parsed.skipped[0].ordinal, 2);
    assert!(parsed.skipped[0].reason.contains("out of range"));
}

#[test]
fn test_parse_empty_input() {
    let parsed = parse("\n\n  \n");
    assert!(parsed.timeline.is_empty());
    assert!(parsed.is_clean());
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("full_subtitles.srt");
    let timeline = build_timeline(&[RecognizedSegment::new(
        0.0,
        3.0,
        "Every story needs an ending.",
    )]);

    write_timeline(&path, &timeline).unwrap();
    let parsed = read_timeline(&path).unwrap();
    assert!(parsed.is_clean());
    assert_eq!(parsed.timeline.texts(), timeline.texts());
}

#[test]
fn test_read_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_timeline(dir.path().join("missing.srt")).unwrap_err();
    assert!(matches!(err, crate::ClipError::Io(_)));
}

proptest! {
    #[test]
    fn prop_chunks_preserve_words(words in proptest::collection::vec(test_helpers::word_strategy(), 1..40)) {
        let text = words.join(" ");
        let chunks = chunk_text(&text);
        prop_assert!(chunks.iter().all(|c| !c.is_empty()));
        prop_assert_eq!(chunks.join(" "), text);
    }

    #[test]
    fn prop_segment_cues_cover_segment(
        start in 0.0f64..10_000.0,
        length in 0.01f64..120.0,
        words in proptest::collection::vec(test_helpers::word_strategy(), 1..30),
    ) {
        let segment = RecognizedSegment::new(start, start + length, words.join(" "));
        let (cues, next) = build_segment_cues(&segment, 1);

        prop_assert_eq!(next, cues.len() + 1);
        prop_assert_eq!(cues[0].start, segment.start);
        prop_assert_eq!(cues.last().unwrap().end, segment.end);
        for pair in cues.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn prop_parse_inverts_serialize(
        entries in proptest::collection::vec((0u64..5_000_000, 1u64..60_000, "[a-zA-Z][a-zA-Z .!?]{0,20}"), 0..30)
    ) {
        let timeline = CueTimeline::from_entries(entries.iter().map(|(start, length, text)| {
            let start = *start as f64 / 1000.0;
            (start, start + *length as f64 / 1000.0, text.trim().to_string())
        }));
        let parsed = parse(&serialize(&timeline));

        prop_assert!(parsed.is_clean());
        prop_assert_eq!(parsed.timeline.len(), timeline.len());
        for (a, b) in parsed.timeline.iter().zip(timeline.iter()) {
            prop_assert!((a.start - b.start).abs() < 0.001);
            prop_assert!((a.end - b.end).abs() < 0.001);
            prop_assert_eq!(&a.text, &b.text);
        }
    }
}
