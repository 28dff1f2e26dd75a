use crate::{Format, Ticket};

/// Side effects requested by `update`; executed outside the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ReadClipboard,
    LookupMedia { ticket: Ticket, url: String },
    ProcessMedia { ticket: Ticket, request: ProcessRequest },
    /// Abort whatever lookup/processing is still running; its result will be ignored.
    CancelPending,
    SaveArtifact {
        artifact_url: String,
        suggested_name: String,
        format: Format,
    },
}

/// Everything the processing collaborator needs to produce an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRequest {
    pub url: String,
    pub format: Format,
    pub include_source_audio: bool,
    pub quality: String,
}
