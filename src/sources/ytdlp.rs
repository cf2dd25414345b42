use super::probe::probe_duration;
use super::types::{FetchedMedia, MediaSource};
use crate::errors::{ClipResult, SourceError};
use crate::process::{CommandRunner, Invocation};
use async_trait::async_trait;
use log::info;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fetches videos through the `yt-dlp` command line tool
///
/// URLs are downloaded directly. Anything else is a search phrase; the n-th
/// search made by this source downloads the n-th hit, so repeated searches
/// for filler footage yield different videos.
pub struct YtDlpSource<R: CommandRunner> {
    runner: R,
    download_dir: PathBuf,
    searches: AtomicUsize,
}

impl<R: CommandRunner> YtDlpSource<R> {
    pub fn new(runner: R, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            download_dir: download_dir.into(),
            searches: AtomicUsize::new(0),
        }
    }

    /// Command for `query`; `hit` selects the 1-based search result
    pub fn invocation(&self, query: &str, hit: usize) -> Invocation {
        let template = self.download_dir.join("%(title).50s.%(ext)s");
        let invocation = Invocation::new("yt-dlp")
            .args(["-f", "mp4"])
            .args(["--print", "after_move:filepath"])
            .arg("-o")
            .path_arg(&template);

        if is_url(query) {
            invocation.arg("--no-playlist").arg(query)
        } else {
            let hit = hit.max(1);
            invocation
                .args(["--playlist-items".to_string(), hit.to_string()])
                .arg(format!("ytsearch{}:{}", hit, query))
        }
    }
}

fn is_url(query: &str) -> bool {
    query.starts_with("http://") || query.starts_with("https://")
}

#[async_trait]
impl<R: CommandRunner> MediaSource for YtDlpSource<R> {
    async fn fetch(&self, query: &str) -> ClipResult<FetchedMedia> {
        tokio::fs::create_dir_all(&self.download_dir).await?;
        info!("Fetching '{}' with yt-dlp", query);

        let hit = if is_url(query) {
            1
        } else {
            self.searches.fetch_add(1, Ordering::Relaxed) + 1
        };

        let output = self
            .runner
            .run(self.invocation(query, hit))
            .await
            .map_err(|e| SourceError::new(format!("failed to start yt-dlp: {}", e)))?;

        if !output.is_success() {
            return Err(SourceError::new(format!(
                "yt-dlp failed for '{}' (status {:?}): {}",
                query,
                output.status,
                output.stderr_tail(3)
            ))
            .into());
        }

        let path = output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .last()
            .map(PathBuf::from)
            .ok_or_else(|| SourceError::new(format!("yt-dlp returned no file for '{}'", query)))?;

        let duration = probe_duration(&self.runner, &path).await?;
        info!("Fetched {} ({:.2}s)", path.display(), duration);
        Ok(FetchedMedia { path, duration })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{CommandOutput, MockCommandRunner};
    use crate::ClipError;

    #[test]
    fn test_url_invocation() {
        let source = YtDlpSource::new(MockCommandRunner::new(), "downloads/video");
        let inv = source.invocation("https://www.youtube.com/watch?v=abc123", 1);

        assert_eq!(inv.program, "yt-dlp");
        assert_eq!(inv.value_of("-f"), Some("mp4"));
        assert_eq!(inv.value_of("-o"), Some("downloads/video/%(title).50s.%(ext)s"));
        assert!(inv.has_arg("--no-playlist"));
        assert_eq!(
            inv.args.last().map(String::as_str),
            Some("https://www.youtube.com/watch?v=abc123")
        );
    }

    #[test]
    fn test_search_invocation_picks_nth_hit() {
        let source = YtDlpSource::new(MockCommandRunner::new(), "downloads");
        let inv = source.invocation("satisfying kinetic sand", 3);

        assert_eq!(inv.value_of("--playlist-items"), Some("3"));
        assert_eq!(
            inv.args.last().map(String::as_str),
            Some("ytsearch3:satisfying kinetic sand")
        );
        assert!(!inv.has_arg("--no-playlist"));
    }

    #[tokio::test]
    async fn test_repeated_searches_advance() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = MockCommandRunner::new();
        let mut seq = mockall::Sequence::new();

        for hit in ["ytsearch1:sand", "ytsearch2:sand"] {
            runner
                .expect_run()
                .withf(move |inv| inv.program == "yt-dlp" && inv.has_arg(hit))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(CommandOutput::success("[info] done\n/tmp/sand.mp4\n")));
            runner
                .expect_run()
                .withf(|inv| inv.program == "ffprobe")
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(CommandOutput::success("42.0\n")));
        }

        let source = YtDlpSource::new(runner, dir.path());
        for _ in 0..2 {
            let media = source.fetch("sand").await.unwrap();
            assert_eq!(media.path, PathBuf::from("/tmp/sand.mp4"));
            assert_eq!(media.duration, 42.0);
        }
    }

    #[tokio::test]
    async fn test_failed_download_is_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(1).returning(|_| {
            Ok(CommandOutput {
                status: Some(1),
                stdout: String::new(),
                stderr: "ERROR: Video unavailable".to_string(),
            })
        });

        let err = YtDlpSource::new(runner, dir.path())
            .fetch("https://www.youtube.com/watch?v=gone")
            .await
            .unwrap_err();
        match err {
            ClipError::Source(e) => assert!(e.message.contains("Video unavailable")),
            other => panic!("unexpected error: {}", other),
        }
    }
}
