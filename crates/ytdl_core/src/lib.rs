//! Downloader core: pure wizard state machine and view-model helpers.
mod effect;
mod error;
mod msg;
mod quality;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, ProcessRequest};
pub use error::{ClipboardFailure, LookupFailure, ProcessFailure, WizardError};
pub use msg::Msg;
pub use quality::{
    Format, QualityOption, AUDIO_QUALITIES, DEFAULT_QUALITY, VIDEO_QUALITIES,
};
pub use state::{AppState, MediaInfo, Notice, Operation, Step, Ticket, WizardState};
pub use update::{update, validate, FALLBACK_FILENAME};
pub use view_model::{AppViewModel, PreviewKind, QualityMark};
