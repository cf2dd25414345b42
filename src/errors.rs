use std::error::Error;
use std::fmt;
use std::io;

/// Enumeration of all possible errors that can occur while producing clips
#[derive(Debug)]
pub enum ClipError {
    Format(FormatError),
    Segmentation(SegmentationError),
    Transcription(TranscriptionError),
    Source(SourceError),
    Render(RenderError),
    Config(ConfigError),
    Io(io::Error),
}

/// Malformed `HH:MM:SS,mmm` timestamp text
#[derive(Debug)]
pub struct FormatError {
    pub message: String,
}

impl FormatError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors raised while cutting a timeline into segments
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentationError {
    /// No sentence-final cue satisfied the minimum segment duration
    NoSplitPoints { min_duration: f64 },
    /// A slice was requested for an empty, reversed or non-finite interval
    InvalidInterval { start: f64, end: f64 },
}

/// Speech recognizer failures
#[derive(Debug)]
pub struct TranscriptionError {
    pub message: String,
}

impl TranscriptionError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Media source failures (no result, quota or auth failure, download error)
#[derive(Debug)]
pub struct SourceError {
    pub message: String,
}

impl SourceError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// External compositor failure, with the tool's exit status when it exited normally
#[derive(Debug)]
pub struct RenderError {
    pub message: String,
    pub status: Option<i32>,
    pub stderr: Option<String>,
}

impl RenderError {
    /// Create a new error with the given message and exit status.
    pub fn new(message: impl Into<String>, status: Option<i32>) -> Self {
        Self {
            message: message.into(),
            status,
            stderr: None,
        }
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = Some(stderr.into());
        self
    }
}

#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ClipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipError::Io(err) => write!(f, "I/O error: {}", err),
            ClipError::Format(err) => write!(f, "Format error: {}", err),
            ClipError::Segmentation(err) => write!(f, "Segmentation error: {}", err),
            ClipError::Transcription(err) => write!(f, "Transcription error: {}", err),
            ClipError::Source(err) => write!(f, "Source unavailable: {}", err),
            ClipError::Render(err) => write!(f, "Render error: {}", err),
            ClipError::Config(err) => write!(f, "Config error: {}", err),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for SegmentationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentationError::NoSplitPoints { min_duration } => write!(
                f,
                "no sentence boundary leaves a segment of at least {:.2}s",
                min_duration
            ),
            SegmentationError::InvalidInterval { start, end } => {
                write!(f, "invalid interval [{}, {})", start, end)
            }
        }
    }
}

impl fmt::Display for TranscriptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(code) => write!(f, "{} (exit status {})", self.message, code)?,
            None => write!(f, "{} (no exit status)", self.message)?,
        }
        if let Some(stderr) = &self.stderr {
            write!(f, ": {}", stderr)?;
        }
        Ok(())
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ClipError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ClipError::Io(err) => Some(err),
            _ => None,
        }
    }
}
impl Error for FormatError {}
impl Error for SegmentationError {}
impl Error for TranscriptionError {}
impl Error for SourceError {}
impl Error for RenderError {}
impl Error for ConfigError {}

// Conversion implementations
impl From<io::Error> for ClipError {
    fn from(err: io::Error) -> Self {
        ClipError::Io(err)
    }
}

impl From<FormatError> for ClipError {
    fn from(err: FormatError) -> Self {
        ClipError::Format(err)
    }
}

impl From<SegmentationError> for ClipError {
    fn from(err: SegmentationError) -> Self {
        ClipError::Segmentation(err)
    }
}

impl From<TranscriptionError> for ClipError {
    fn from(err: TranscriptionError) -> Self {
        ClipError::Transcription(err)
    }
}

impl From<SourceError> for ClipError {
    fn from(err: SourceError) -> Self {
        ClipError::Source(err)
    }
}

impl From<RenderError> for ClipError {
    fn from(err: RenderError) -> Self {
        ClipError::Render(err)
    }
}

impl From<ConfigError> for ClipError {
    fn from(err: ConfigError) -> Self {
        ClipError::Config(err)
    }
}

// Conversion to io::Error for callers that only speak io::Result
impl From<ClipError> for io::Error {
    fn from(err: ClipError) -> Self {
        match err {
            ClipError::Io(inner) => inner,
            other => io::Error::other(other),
        }
    }
}

impl From<FormatError> for io::Error {
    fn from(err: FormatError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

// Type alias for Result with ClipError
pub type ClipResult<T> = Result<T, ClipError>;
