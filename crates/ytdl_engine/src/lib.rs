//! Downloader engine: collaborator implementations and effect execution.
mod clipboard;
mod engine;
mod filename;
mod lookup;
mod persist;
mod process;
mod retry;
mod save;
mod types;
mod youtube;

pub use clipboard::{ClipboardSource, NoClipboard};
#[cfg(feature = "clipboard")]
pub use clipboard::SystemClipboard;
pub use engine::{Collaborators, EngineHandle, EngineSettings};
pub use filename::{
    artifact_filename, candidate_filenames, extension_from_ref, hashed_artifact_filename,
};
pub use lookup::{LookupSettings, MetadataLookup, OEmbedLookup, SimulatedLookup};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use process::{MediaProcessor, SimulatedProcessor};
pub use retry::{run_with_retry, RetryPolicy, Retryable};
pub use save::{ArtifactSaver, DownloadDirSaver, SaveSettings};
pub use types::{
    Artifact, ClipboardError, EngineEvent, LookupError, LookupErrorKind, MediaFormat,
    MediaMetadata, ProcessError, ProcessErrorKind, ProcessRequest, SaveError, SaveRequest, Ticket,
};
pub use youtube::{video_id, watch_url};
