use thiserror::Error;

/// Why a metadata lookup did not produce media info.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupFailure {
    NotFound,
    InvalidUrl,
    Unreachable,
    TimedOut,
}

/// Why processing did not produce an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessFailure {
    Unsupported,
    Failed,
    Unreachable,
    TimedOut,
}

/// Why the clipboard could not supply a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardFailure {
    Unsupported,
    Denied,
    Empty,
}

/// Every rejection or failure the wizard can report to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("enter a video URL first")]
    EmptyOrWhitespaceUrl,
    #[error("please wait for the current request to finish")]
    Busy,
    #[error("that action is not available on this step")]
    WrongStep,
    #[error("media info has not been loaded")]
    MissingMediaInfo,
    #[error("could not load video info: {0}")]
    MetadataLookupFailed(LookupFailure),
    #[error("quality {key:?} is not available for this format")]
    InvalidQualitySelection { key: String },
    #[error("processing failed: {0}")]
    ProcessingFailed(ProcessFailure),
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(ClipboardFailure),
    #[error("nothing to download yet")]
    MissingArtifact,
    #[error("saving failed: {0}")]
    SaveFailed(String),
}

impl std::fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupFailure::NotFound => write!(f, "video not found"),
            LookupFailure::InvalidUrl => write!(f, "not a recognised video URL"),
            LookupFailure::Unreachable => write!(f, "service unreachable"),
            LookupFailure::TimedOut => write!(f, "timed out"),
        }
    }
}

impl std::fmt::Display for ProcessFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessFailure::Unsupported => write!(f, "unsupported format or quality"),
            ProcessFailure::Failed => write!(f, "processing error"),
            ProcessFailure::Unreachable => write!(f, "service unreachable"),
            ProcessFailure::TimedOut => write!(f, "timed out"),
        }
    }
}

impl std::fmt::Display for ClipboardFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardFailure::Unsupported => write!(f, "not supported on this platform"),
            ClipboardFailure::Denied => write!(f, "permission denied"),
            ClipboardFailure::Empty => write!(f, "clipboard is empty"),
        }
    }
}
