use super::report::{ClipReport, ProducedClip};
use crate::config::{Layout, PipelineConfig};
use crate::cues::{read_timeline, write_timeline, CueTimeline};
use crate::generate_subtitles;
use crate::errors::{ClipResult, SourceError};
use crate::process::CommandRunner;
use crate::recognizer::Recognizer;
use crate::render::FfmpegCompositor;
use crate::segmentation::{
    plan_segments, require_split_points, slice_timeline, write_transcript, SegmentInterval,
};
use crate::sources::{FetchedMedia, MediaSource};
use log::{debug, error, info, warn};
use std::io;
use std::path::{Path, PathBuf};

/// Turns one long video into captioned vertical clips
///
/// The run is strictly sequential: fetch, transcribe, persist the full
/// subtitles, select split points, then render every planned interval.
pub struct ClipPipeline<S, Rec, R>
where
    S: MediaSource,
    Rec: Recognizer,
    R: CommandRunner,
{
    config: PipelineConfig,
    source: S,
    filler_source: Option<Box<dyn MediaSource>>,
    recognizer: Rec,
    compositor: FfmpegCompositor<R>,
}

impl<S, Rec, R> ClipPipeline<S, Rec, R>
where
    S: MediaSource,
    Rec: Recognizer,
    R: CommandRunner,
{
    pub fn new(config: PipelineConfig, source: S, recognizer: Rec, runner: R) -> ClipResult<Self> {
        config.validate()?;
        let compositor = FfmpegCompositor::new(runner, config.frame, config.blur_sigma);
        Ok(Self {
            config,
            source,
            filler_source: None,
            recognizer,
            compositor,
        })
    }

    /// Fetch filler footage from a different source than the main video
    pub fn with_filler_source(mut self, source: Box<dyn MediaSource>) -> Self {
        self.filler_source = Some(source);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn full_subtitles_path(&self) -> PathBuf {
        self.config.script_dir().join("full_subtitles.srt")
    }

    pub fn full_transcript_path(&self) -> PathBuf {
        self.config.script_dir().join("full_transcript.txt")
    }

    pub fn segment_subtitles_path(&self, n: usize) -> PathBuf {
        self.config.script_dir().join(format!("subtitles_{}.srt", n))
    }

    pub fn segment_transcript_path(&self, n: usize) -> PathBuf {
        self.config.script_dir().join(format!("transcript_{}.txt", n))
    }

    pub fn captioned_clip_path(&self, n: usize) -> PathBuf {
        self.config
            .captioned_dir()
            .join(format!("final_video_{}_with_subs.mp4", n))
    }

    pub async fn run(&self, query: &str) -> ClipResult<ClipReport> {
        info!("▶ Fetching main video for {:?}", query);
        let main = in_stage("fetch", self.source.fetch(query).await)?;
        info!(
            "Main video {} ({:.2}s)",
            main.path.display(),
            main.duration
        );

        let filler = match &self.config.layout {
            Layout::FillerStack { query } => {
                Some(in_stage("filler", self.gather_filler(query, main.duration).await)?)
            }
            Layout::BlurredBackground => None,
        };

        for dir in [
            self.config.script_dir(),
            self.config.video_dir(),
            self.config.captioned_dir(),
        ] {
            std::fs::create_dir_all(&dir)?;
        }

        info!("📝 Transcribing {}", main.path.display());
        let full_subtitles = self.full_subtitles_path();
        let full_transcript = self.full_transcript_path();
        let timeline = in_stage(
            "transcribe",
            generate_subtitles(
                &self.recognizer,
                &main.path,
                &full_subtitles,
                &full_transcript,
            )
            .await,
        )?;
        info!(
            "Wrote {} cues to {}",
            timeline.len(),
            full_subtitles.display()
        );

        // Segmentation works on what was persisted, not on the in-memory timeline
        let parsed = read_timeline(&full_subtitles)?;
        let split_points = in_stage(
            "split",
            require_split_points(&parsed.timeline, self.config.min_segment_duration),
        )?;
        info!("📌 Split points: {:?}", rounded(&split_points));

        let intervals = plan_segments(
            &split_points,
            Some(main.duration),
            self.config.include_remainder,
        );

        let mut clips = Vec::with_capacity(intervals.len());
        for (i, interval) in intervals.iter().enumerate() {
            let clip = self
                .render_segment(i + 1, *interval, &main, filler.as_deref(), &parsed.timeline)
                .await?;
            clips.push(clip);
        }

        if let Some(merged) = &filler {
            if !self.config.keep_intermediates {
                remove_intermediate(merged);
            }
        }

        info!("✅ Produced {} clip(s)", clips.len());
        Ok(ClipReport {
            source: main,
            full_subtitles,
            full_transcript,
            split_points,
            skipped_stanzas: parsed.skipped.len(),
            clips,
        })
    }

    async fn render_segment(
        &self,
        n: usize,
        interval: SegmentInterval,
        main: &FetchedMedia,
        filler: Option<&Path>,
        timeline: &CueTimeline,
    ) -> ClipResult<ProducedClip> {
        let SegmentInterval { start, end } = interval;
        let duration = interval.duration();
        info!("✂️ Clip {}: {:.2}s -> {:.2}s", n, start, end);

        let sliced = in_stage("slice", slice_timeline(timeline, start, end))?;
        let subtitles = self.segment_subtitles_path(n);
        let transcript = self.segment_transcript_path(n);
        write_timeline(&subtitles, &sliced.timeline)?;
        write_transcript(&transcript, &sliced.transcript)?;

        let video_dir = self.config.video_dir();
        let main_segment = video_dir.join(format!("main_segment_{}.mp4", n));
        let composed = video_dir.join(format!("final_video_{}.mp4", n));
        let mut intermediates = vec![main_segment.clone(), composed.clone()];

        in_stage(
            "cut",
            self.compositor.cut(&main.path, &main_segment, start, end).await,
        )?;

        match filler {
            Some(filler) => {
                let filler_segment = video_dir.join(format!("filler_segment_{}.mp4", n));
                intermediates.push(filler_segment.clone());
                in_stage(
                    "cut",
                    self.compositor.cut(filler, &filler_segment, start, end).await,
                )?;
                in_stage(
                    "compose",
                    self.compositor
                        .stack_with_filler(&main_segment, &filler_segment, &composed, duration)
                        .await,
                )?;
            }
            None => {
                in_stage(
                    "compose",
                    self.compositor
                        .blur_background(&main_segment, &composed, duration)
                        .await,
                )?;
            }
        }

        let mut captioning_input = composed;
        if let Some(ending) = &self.config.ending_clip {
            let with_ending = video_dir.join(format!("final_video_{}_with_ending.mp4", n));
            intermediates.push(with_ending.clone());
            in_stage(
                "ending",
                self.compositor
                    .concat(&[captioning_input, ending.clone()], &with_ending, true)
                    .await,
            )?;
            captioning_input = with_ending;
        }

        let video = self.captioned_clip_path(n);
        in_stage(
            "captions",
            self.compositor
                .burn_captions(&captioning_input, &subtitles, &video, &self.config.caption_style)
                .await,
        )?;

        if !self.config.keep_intermediates {
            for path in &intermediates {
                remove_intermediate(path);
            }
        }

        Ok(ProducedClip {
            index: n,
            start,
            end,
            video,
            subtitles,
            transcript,
        })
    }

    /// Fetch filler clips until they cover `target` seconds, then merge them
    async fn gather_filler(&self, query: &str, target: f64) -> ClipResult<PathBuf> {
        let source: &dyn MediaSource = match &self.filler_source {
            Some(source) => source.as_ref(),
            None => &self.source,
        };

        let mut fetched: Vec<PathBuf> = Vec::new();
        let mut total = 0.0;
        let mut attempts = 0;

        while total < target && attempts < self.config.max_filler_fetches {
            attempts += 1;
            match source.fetch(query).await {
                Ok(media) => {
                    total += media.duration;
                    info!(
                        "Added filler {} ({:.2}s), total = {:.2}s",
                        media.path.display(),
                        media.duration,
                        total
                    );
                    fetched.push(media.path);
                }
                Err(e) => warn!("Filler fetch {} failed: {}", attempts, e),
            }
        }

        if fetched.is_empty() {
            return Err(SourceError::new(format!(
                "no filler media for {:?} after {} attempt(s)",
                query, attempts
            ))
            .into());
        }
        if total < target {
            warn!(
                "Filler covers {:.2}s of {:.2}s after {} fetch(es)",
                total, target, attempts
            );
        }

        std::fs::create_dir_all(&self.config.download_dir)?;
        let merged = self.config.download_dir.join("merged_filler.mp4");
        self.compositor.concat(&fetched, &merged, false).await?;

        if !self.config.keep_intermediates {
            for path in &fetched {
                remove_intermediate(path);
            }
        }
        Ok(merged)
    }
}

/// Log a failed stage before passing its error on
fn in_stage<T>(stage: &str, result: ClipResult<T>) -> ClipResult<T> {
    if let Err(e) = &result {
        error!("❌ Stage '{}' failed: {}", stage, e);
    }
    result
}

fn remove_intermediate(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!("Removed {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("Could not remove {}: {}", path.display(), e),
    }
}

fn rounded(points: &[f64]) -> Vec<f64> {
    points.iter().map(|p| (p * 100.0).round() / 100.0).collect()
}
