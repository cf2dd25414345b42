use crate::errors::{ClipResult, SourceError};
use crate::process::{CommandRunner, Invocation};
use log::debug;
use std::path::Path;

/// ffprobe call printing only the container duration in seconds
pub fn duration_invocation(path: &Path) -> Invocation {
    Invocation::new("ffprobe")
        .args(["-v", "error"])
        .args(["-show_entries", "format=duration"])
        .args(["-of", "default=noprint_wrappers=1:nokey=1"])
        .path_arg(path)
}

/// Read the duration of a local media file with ffprobe
pub async fn probe_duration<R: CommandRunner + ?Sized>(runner: &R, path: &Path) -> ClipResult<f64> {
    let output = runner
        .run(duration_invocation(path))
        .await
        .map_err(|e| SourceError::new(format!("failed to start ffprobe: {}", e)))?;

    if !output.is_success() {
        return Err(SourceError::new(format!(
            "ffprobe failed on {} (status {:?}): {}",
            path.display(),
            output.status,
            output.stderr_tail(3)
        ))
        .into());
    }

    let duration = parse_duration(&output.stdout).ok_or_else(|| {
        SourceError::new(format!(
            "ffprobe reported no usable duration for {}: '{}'",
            path.display(),
            output.stdout.trim()
        ))
    })?;

    debug!("{} lasts {:.2}s", path.display(), duration);
    Ok(duration)
}

fn parse_duration(stdout: &str) -> Option<f64> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .and_then(|line| line.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d > 0.0)
}
