use crate::errors::ClipResult;
use async_trait::async_trait;
use log::debug;
use std::path::Path;
use std::process::Stdio;

/// One external program call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy().into_owned())
    }

    /// Whether any argument equals `value`
    pub fn has_arg(&self, value: &str) -> bool {
        self.args.iter().any(|a| a == value)
    }

    /// The argument following the first occurrence of `flag`
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Some(0)
    }

    /// Last few stderr lines, for error messages
    pub fn stderr_tail(&self, lines: usize) -> String {
        let all: Vec<&str> = self.stderr.lines().collect();
        all[all.len().saturating_sub(lines)..].join("\n")
    }
}

/// Runs external tools (ffmpeg, ffprobe, whisper, yt-dlp)
///
/// Failing to start the program is an error; a non-zero exit is reported in
/// [`CommandOutput::status`] for the caller to interpret.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, invocation: Invocation) -> ClipResult<CommandOutput>;
}

#[async_trait]
impl<T: CommandRunner + ?Sized> CommandRunner for std::sync::Arc<T> {
    async fn run(&self, invocation: Invocation) -> ClipResult<CommandOutput> {
        (**self).run(invocation).await
    }
}

/// [`CommandRunner`] backed by `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandRunner;

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(&self, invocation: Invocation) -> ClipResult<CommandOutput> {
        debug!("Running: {}", invocation.command_line());

        let output = tokio::process::Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_builder() {
        let invocation = Invocation::new("ffmpeg")
            .args(["-y", "-i"])
            .path_arg(Path::new("in put.mp4"))
            .arg("out.mp4");

        assert_eq!(invocation.args, vec!["-y", "-i", "in put.mp4", "out.mp4"]);
        assert_eq!(invocation.value_of("-i"), Some("in put.mp4"));
        assert!(invocation.has_arg("-y"));
        assert_eq!(invocation.value_of("-vf"), None);
        assert_eq!(invocation.command_line(), "ffmpeg -y -i in put.mp4 out.mp4");
    }

    #[test]
    fn test_stderr_tail() {
        let output = CommandOutput {
            status: Some(1),
            stdout: String::new(),
            stderr: "a\nb\nc\nd".to_string(),
        };
        assert!(!output.is_success());
        assert_eq!(output.stderr_tail(2), "c\nd");
        assert_eq!(output.stderr_tail(10), "a\nb\nc\nd");
    }

    #[tokio::test]
    async fn test_tokio_runner_reports_spawn_failure() {
        let result = TokioCommandRunner
            .run(Invocation::new("definitely-not-an-installed-tool-7f3a"))
            .await;
        assert!(matches!(result, Err(crate::ClipError::Io(_))));
    }
}
