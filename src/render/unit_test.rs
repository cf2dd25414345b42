use crate::process::{CommandOutput, MockCommandRunner};
use crate::render::style::{escape_filter_value, filter_arg};
use crate::render::{CaptionStyle, FfmpegCompositor, FrameSize};
use crate::ClipError;
use std::path::{Path, PathBuf};

fn compositor_with(runner: MockCommandRunner) -> FfmpegCompositor<MockCommandRunner> {
    FfmpegCompositor::new(runner, FrameSize::default(), 20.0)
}

#[test]
fn test_default_caption_style() {
    let style = CaptionStyle::default();
    assert_eq!(
        style.force_style(),
        "Fontsize=20,MarginV=70,OutlineColour=&H00000000,BorderStyle=0,PrimaryColour=&H0000FFFF,FontName=Arial,Alignment=5"
    );
}

#[test]
fn test_escape_filter_value() {
    assert_eq!(escape_filter_value("out/subs_1.srt"), "out/subs_1.srt");
    assert_eq!(
        escape_filter_value("C:\\clips\\it's.srt"),
        "C\\:\\\\clips\\\\it\\'s.srt"
    );
    assert_eq!(escape_filter_value("a,b;[c]"), "a,b;[c]");
}

#[test]
fn test_filter_arg_quotes_for_graph() {
    assert_eq!(filter_arg("out/subs_1.srt"), "'out/subs_1.srt'");
    assert_eq!(filter_arg("C:/it's"), "'C\\:/it\\'\\''s'");
}

/// Split on `sep` the way ffmpeg tokenizes: a backslash escapes the next character
/// outside quotes, `'...'` is taken literally
fn split_unescaped(text: &str, sep: char) -> Vec<String> {
    let mut tokens = vec![String::new()];
    let mut quoted = false;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\'' => quoted = !quoted,
            '\\' if !quoted => {
                if let Some(next) = chars.next() {
                    tokens.last_mut().unwrap().push(next);
                }
            }
            c if c == sep && !quoted => tokens.push(String::new()),
            c => tokens.last_mut().unwrap().push(c),
        }
    }
    tokens
}

#[test]
fn test_burn_filter_survives_both_parsing_levels() {
    let compositor = compositor_with(MockCommandRunner::new());
    let style = CaptionStyle {
        font_name: "Bob's, Font".to_string(),
        ..CaptionStyle::default()
    };
    let subtitles = "/media/C:/clips/it's, [here];.srt";
    let inv = compositor.burn_invocation(
        Path::new("clip.mp4"),
        Path::new(subtitles),
        Path::new("out.mp4"),
        &style,
    );

    let graph = split_unescaped(inv.value_of("-vf").unwrap(), ';');
    assert_eq!(graph.len(), 1);
    let options = split_unescaped(graph[0].strip_prefix("subtitles=").unwrap(), ':');

    assert_eq!(options.len(), 2);
    assert_eq!(options[0], subtitles);
    assert_eq!(options[1], format!("force_style={}", style.force_style()));
    assert!(options[1].contains("FontName=Bob's Font,"));
}

#[test]
fn test_cut_invocation() {
    let compositor = compositor_with(MockCommandRunner::new());
    let inv = compositor.cut_invocation(Path::new("in.mp4"), Path::new("seg.mp4"), 61.0, 125.5);

    assert_eq!(inv.program, "ffmpeg");
    assert!(inv.has_arg("-y"));
    assert_eq!(inv.value_of("-ss"), Some("61.000"));
    assert_eq!(inv.value_of("-t"), Some("64.500"));
    assert_eq!(inv.value_of("-i"), Some("in.mp4"));
    assert_eq!(inv.args.last().map(String::as_str), Some("seg.mp4"));
}

#[test]
fn test_stack_invocation_uses_half_frames() {
    let compositor = compositor_with(MockCommandRunner::new());
    let inv = compositor.stack_invocation(
        Path::new("main.mp4"),
        Path::new("filler.mp4"),
        Path::new("out.mp4"),
        60.0,
    );
    let graph = inv.value_of("-filter_complex").unwrap();

    assert!(graph.contains("scale=1080:960"));
    assert!(graph.contains("vstack=inputs=2[v]"));
    assert_eq!(inv.value_of("-t"), Some("60.000"));
}

#[test]
fn test_blur_invocation() {
    let compositor = FfmpegCompositor::new(
        MockCommandRunner::new(),
        FrameSize {
            width: 720,
            height: 1280,
        },
        12.5,
    );
    let inv = compositor.blur_invocation(Path::new("in.mp4"), Path::new("out.mp4"), 30.0);
    let graph = inv.value_of("-filter_complex").unwrap();

    assert!(graph.contains("gblur=sigma=12.5"));
    assert!(graph.contains("crop=720:1280[bg]"));
    assert!(graph.contains("scale=720:720"));
    assert!(graph.contains("overlay=(W-w)/2:(H-h)/2[v]"));
}

#[test]
fn test_concat_invocation() {
    let compositor = compositor_with(MockCommandRunner::new());
    let inputs = vec![PathBuf::from("a.mp4"), PathBuf::from("b.mp4")];

    let with_audio = compositor.concat_invocation(&inputs, Path::new("ab.mp4"), true);
    let graph = with_audio.value_of("-filter_complex").unwrap();
    assert!(graph.ends_with("[v0][0:a][v1][1:a]concat=n=2:v=1:a=1[v][a]"));
    assert!(with_audio.has_arg("[a]"));

    let silent = compositor.concat_invocation(&inputs, Path::new("ab.mp4"), false);
    let graph = silent.value_of("-filter_complex").unwrap();
    assert!(graph.ends_with("[v0][v1]concat=n=2:v=1:a=0[v]"));
    assert!(!silent.has_arg("[a]"));
}

#[test]
fn test_burn_invocation() {
    let compositor = compositor_with(MockCommandRunner::new());
    let inv = compositor.burn_invocation(
        Path::new("clip.mp4"),
        Path::new("script/subtitles_1.srt"),
        Path::new("clip_subs.mp4"),
        &CaptionStyle::default(),
    );

    let filter = inv.value_of("-vf").unwrap();
    let pattern =
        regex::Regex::new(r"^subtitles='script/subtitles_1\.srt':force_style='Fontsize=20,MarginV=70,.*Alignment=5'$")
            .unwrap();
    assert!(pattern.is_match(filter), "unexpected filter: {}", filter);
    assert_eq!(inv.value_of("-c:a"), Some("copy"));
}

#[tokio::test]
async fn test_failed_render_carries_exit_status() {
    let mut runner = MockCommandRunner::new();
    runner.expect_run().times(1).returning(|_| {
        Ok(CommandOutput {
            status: Some(183),
            stdout: String::new(),
            stderr: "Unable to open subtitles".to_string(),
        })
    });

    let err = compositor_with(runner)
        .burn_captions(
            Path::new("clip.mp4"),
            Path::new("subs.srt"),
            Path::new("out.mp4"),
            &CaptionStyle::default(),
        )
        .await
        .unwrap_err();

    match err {
        ClipError::Render(e) => {
            assert_eq!(e.status, Some(183));
            assert!(e.message.contains("burn_captions"));
            assert_eq!(e.stderr.as_deref(), Some("Unable to open subtitles"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_successful_render_returns_output() {
    let mut runner = MockCommandRunner::new();
    runner
        .expect_run()
        .withf(|inv| inv.program == "ffmpeg" && inv.value_of("-filter_complex").is_some())
        .times(1)
        .returning(|_| Ok(CommandOutput::success("")));

    let out = compositor_with(runner)
        .blur_background(Path::new("in.mp4"), Path::new("out.mp4"), 10.0)
        .await
        .unwrap();
    assert_eq!(out, PathBuf::from("out.mp4"));
}

#[tokio::test]
async fn test_concat_without_inputs_fails() {
    let err = compositor_with(MockCommandRunner::new())
        .concat(&[], Path::new("out.mp4"), true)
        .await
        .unwrap_err();
    assert!(matches!(err, ClipError::Render(_)));
}
