use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::persist::PersistError;

pub type Ticket = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFormat {
    Video,
    Audio,
}

impl MediaFormat {
    /// Extension used when the artifact reference does not carry one.
    pub fn default_extension(self) -> &'static str {
        match self {
            MediaFormat::Video => "mp4",
            MediaFormat::Audio => "m4a",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaMetadata {
    pub title: String,
    pub thumbnail_url: String,
    pub duration: String,
    pub channel: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRequest {
    pub url: String,
    pub format: MediaFormat,
    /// Ignored for audio.
    pub include_source_audio: bool,
    pub quality: String,
}

/// A byte-servable result: streamable URL or local path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub artifact_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub artifact_ref: String,
    pub suggested_name: String,
    pub format: MediaFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    MetadataReady {
        ticket: Ticket,
        result: Result<MediaMetadata, LookupError>,
    },
    ProcessingFinished {
        ticket: Ticket,
        result: Result<Artifact, ProcessError>,
    },
    ClipboardText(Result<String, ClipboardError>),
    SaveFinished(Result<PathBuf, String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    NotFound,
    InvalidUrl,
    Unreachable,
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct LookupError {
    pub kind: LookupErrorKind,
    pub message: String,
}

impl LookupError {
    pub fn new(kind: LookupErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessErrorKind {
    Unsupported,
    Failed,
    Unreachable,
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ProcessError {
    pub kind: ProcessErrorKind,
    pub message: String,
}

impl ProcessError {
    pub fn new(kind: ProcessErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard not supported on this platform")]
    Unsupported,
    #[error("clipboard access denied")]
    Denied,
    #[error("clipboard is empty")]
    Empty,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("download failed: {0}")]
    Download(String),
    #[error("unsupported artifact reference: {0}")]
    UnsupportedRef(String),
}

impl fmt::Display for LookupErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupErrorKind::NotFound => write!(f, "not found"),
            LookupErrorKind::InvalidUrl => write!(f, "invalid url"),
            LookupErrorKind::Unreachable => write!(f, "unreachable"),
            LookupErrorKind::TimedOut => write!(f, "timed out"),
        }
    }
}

impl fmt::Display for ProcessErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessErrorKind::Unsupported => write!(f, "unsupported"),
            ProcessErrorKind::Failed => write!(f, "failed"),
            ProcessErrorKind::Unreachable => write!(f, "unreachable"),
            ProcessErrorKind::TimedOut => write!(f, "timed out"),
        }
    }
}
