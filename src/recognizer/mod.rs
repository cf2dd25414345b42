mod types;
mod whisper;

pub use types::{Recognizer, Transcription};
pub use whisper::{parse_whisper_json, WhisperCliRecognizer};
