use super::style::{filter_arg, CaptionStyle, FrameSize};
use crate::errors::{ClipResult, RenderError};
use crate::process::{CommandRunner, Invocation};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Builds and runs the ffmpeg calls that turn a source segment into a clip
pub struct FfmpegCompositor<R: CommandRunner> {
    runner: R,
    program: String,
    frame: FrameSize,
    blur_sigma: f64,
}

impl<R: CommandRunner> FfmpegCompositor<R> {
    pub fn new(runner: R, frame: FrameSize, blur_sigma: f64) -> Self {
        Self {
            runner,
            program: "ffmpeg".to_string(),
            frame,
            blur_sigma,
        }
    }

    /// Use a different executable name or path
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn frame(&self) -> FrameSize {
        self.frame
    }

    fn base(&self) -> Invocation {
        Invocation::new(self.program.clone()).args(["-y", "-hide_banner", "-loglevel", "error"])
    }

    /// Copy `[start, end)` of `input` into its own file
    pub fn cut_invocation(&self, input: &Path, output: &Path, start: f64, end: f64) -> Invocation {
        self.base()
            .args(["-ss".to_string(), format!("{:.3}", start)])
            .arg("-i")
            .path_arg(input)
            .args(["-t".to_string(), format!("{:.3}", end - start)])
            .args(["-map", "0:v:0", "-map", "0:a?"])
            .path_arg(output)
    }

    /// Main clip on the top half of the frame, filler on the bottom half
    pub fn stack_invocation(
        &self,
        main: &Path,
        filler: &Path,
        output: &Path,
        duration: f64,
    ) -> Invocation {
        let FrameSize { width, height } = self.frame;
        let half = height / 2;
        let graph = format!(
            "[0:v]scale={w}:{h}:force_original_aspect_ratio=increase,crop={w}:{h},setsar=1[top];\
             [1:v]scale={w}:{h}:force_original_aspect_ratio=increase,crop={w}:{h},setsar=1[bottom];\
             [top][bottom]vstack=inputs=2[v]",
            w = width,
            h = half
        );

        self.base()
            .arg("-i")
            .path_arg(main)
            .arg("-i")
            .path_arg(filler)
            .args(["-filter_complex".to_string(), graph])
            .args(["-map", "[v]", "-map", "0:a?"])
            .args(["-t".to_string(), format!("{:.3}", duration)])
            .path_arg(output)
    }

    /// Blurred full-frame background with a centred square crop of the source on top
    pub fn blur_invocation(&self, input: &Path, output: &Path, duration: f64) -> Invocation {
        let FrameSize { width, height } = self.frame;
        let graph = format!(
            "[0:v]split=2[bgsrc][fgsrc];\
             [bgsrc]gblur=sigma={sigma},scale={w}:{h}:force_original_aspect_ratio=increase,crop={w}:{h}[bg];\
             [fgsrc]crop=w=min(iw\\,ih):h=min(iw\\,ih),scale={w}:{w},setsar=1[fg];\
             [bg][fg]overlay=(W-w)/2:(H-h)/2[v]",
            sigma = self.blur_sigma,
            w = width,
            h = height
        );

        self.base()
            .arg("-i")
            .path_arg(input)
            .args(["-filter_complex".to_string(), graph])
            .args(["-map", "[v]", "-map", "0:a?"])
            .args(["-t".to_string(), format!("{:.3}", duration)])
            .path_arg(output)
    }

    /// Join clips end to end, letterboxing each into the frame first
    pub fn concat_invocation(&self, inputs: &[PathBuf], output: &Path, with_audio: bool) -> Invocation {
        let FrameSize { width, height } = self.frame;
        let mut graph = String::new();
        let mut streams = String::new();

        for (i, _) in inputs.iter().enumerate() {
            graph.push_str(&format!(
                "[{i}:v]scale={w}:{h}:force_original_aspect_ratio=decrease,\
                 pad={w}:{h}:(ow-iw)/2:(oh-ih)/2,setsar=1[v{i}];",
                i = i,
                w = width,
                h = height
            ));
            streams.push_str(&format!("[v{}]", i));
            if with_audio {
                streams.push_str(&format!("[{}:a]", i));
            }
        }
        graph.push_str(&format!(
            "{}concat=n={}:v=1:a={}[v]{}",
            streams,
            inputs.len(),
            u8::from(with_audio),
            if with_audio { "[a]" } else { "" }
        ));

        let mut invocation = self.base();
        for input in inputs {
            invocation = invocation.arg("-i").path_arg(input);
        }
        invocation = invocation
            .args(["-filter_complex".to_string(), graph])
            .args(["-map", "[v]"]);
        if with_audio {
            invocation = invocation.args(["-map", "[a]"]);
        }
        invocation.path_arg(output)
    }

    /// Render the cues of `subtitles` onto the video
    pub fn burn_invocation(
        &self,
        input: &Path,
        subtitles: &Path,
        output: &Path,
        style: &CaptionStyle,
    ) -> Invocation {
        let filter = format!(
            "subtitles={}:force_style={}",
            filter_arg(&subtitles.to_string_lossy()),
            filter_arg(&style.force_style())
        );

        self.base()
            .arg("-i")
            .path_arg(input)
            .args(["-vf".to_string(), filter])
            .args(["-c:a", "copy"])
            .path_arg(output)
    }

    pub async fn cut(&self, input: &Path, output: &Path, start: f64, end: f64) -> ClipResult<PathBuf> {
        info!(
            "✂️ Cutting {} [{:.2}s, {:.2}s)",
            input.display(),
            start,
            end
        );
        self.execute("cut", self.cut_invocation(input, output, start, end), output)
            .await
    }

    pub async fn stack_with_filler(
        &self,
        main: &Path,
        filler: &Path,
        output: &Path,
        duration: f64,
    ) -> ClipResult<PathBuf> {
        self.execute(
            "stack_with_filler",
            self.stack_invocation(main, filler, output, duration),
            output,
        )
        .await
    }

    pub async fn blur_background(
        &self,
        input: &Path,
        output: &Path,
        duration: f64,
    ) -> ClipResult<PathBuf> {
        self.execute(
            "blur_background",
            self.blur_invocation(input, output, duration),
            output,
        )
        .await
    }

    pub async fn concat(
        &self,
        inputs: &[PathBuf],
        output: &Path,
        with_audio: bool,
    ) -> ClipResult<PathBuf> {
        if inputs.is_empty() {
            return Err(RenderError::new("concat needs at least one input", None).into());
        }
        self.execute(
            "concat",
            self.concat_invocation(inputs, output, with_audio),
            output,
        )
        .await
    }

    pub async fn burn_captions(
        &self,
        input: &Path,
        subtitles: &Path,
        output: &Path,
        style: &CaptionStyle,
    ) -> ClipResult<PathBuf> {
        info!("Burning captions from {}", subtitles.display());
        self.execute(
            "burn_captions",
            self.burn_invocation(input, subtitles, output, style),
            output,
        )
        .await
    }

    async fn execute(
        &self,
        operation: &str,
        invocation: Invocation,
        output: &Path,
    ) -> ClipResult<PathBuf> {
        debug!("{}: {}", operation, invocation.command_line());

        let result = self.runner.run(invocation).await.map_err(|e| {
            RenderError::new(format!("failed to start {} for {}: {}", self.program, operation, e), None)
        })?;

        if !result.is_success() {
            return Err(RenderError::new(
                format!("{} {} failed", self.program, operation),
                result.status,
            )
            .with_stderr(result.stderr_tail(5))
            .into());
        }

        Ok(output.to_path_buf())
    }
}
