use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use ytdl_logging::{ytdl_debug, ytdl_info, ytdl_warn};

use crate::clipboard::{read_url_text, ClipboardSource};
use crate::lookup::MetadataLookup;
use crate::process::MediaProcessor;
use crate::retry::{run_with_retry, RetryPolicy};
use crate::save::ArtifactSaver;
use crate::{EngineEvent, ProcessRequest, SaveRequest, Ticket};

/// The external systems the engine talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub lookup: Arc<dyn MetadataLookup>,
    pub processor: Arc<dyn MediaProcessor>,
    pub clipboard: Arc<dyn ClipboardSource>,
    pub saver: Arc<dyn ArtifactSaver>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub lookup_policy: RetryPolicy,
    pub process_policy: RetryPolicy,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            lookup_policy: RetryPolicy::lookup_default(),
            process_policy: RetryPolicy::processing_default(),
        }
    }
}

enum EngineCommand {
    Lookup { ticket: Ticket, url: String },
    Process { ticket: Ticket, request: ProcessRequest },
    ReadClipboard,
    Save(SaveRequest),
    CancelPending,
}

struct Context {
    collaborators: Collaborators,
    settings: EngineSettings,
}

/// Runs collaborator calls on a background tokio runtime.
///
/// Commands go in through the handle; results come back as `EngineEvent`s.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(collaborators: Collaborators, settings: EngineSettings) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("ytdl-engine")
            .enable_all()
            .build()?;
        let context = Arc::new(Context {
            collaborators,
            settings,
        });

        thread::Builder::new()
            .name("ytdl-engine-dispatch".to_string())
            .spawn(move || {
                let mut cancel = CancellationToken::new();
                while let Ok(command) = cmd_rx.recv() {
                    if let EngineCommand::CancelPending = command {
                        ytdl_debug!("Cancelling pending engine work");
                        cancel.cancel();
                        cancel = CancellationToken::new();
                        continue;
                    }
                    let context = context.clone();
                    let event_tx = event_tx.clone();
                    let token = cancel.child_token();
                    runtime.spawn(async move {
                        handle_command(&context, command, token, event_tx).await;
                    });
                }
                ytdl_debug!("Engine command channel closed; shutting down");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn lookup(&self, ticket: Ticket, url: impl Into<String>) {
        self.send(EngineCommand::Lookup {
            ticket,
            url: url.into(),
        });
    }

    pub fn process(&self, ticket: Ticket, request: ProcessRequest) {
        self.send(EngineCommand::Process { ticket, request });
    }

    pub fn read_clipboard(&self) {
        self.send(EngineCommand::ReadClipboard);
    }

    pub fn save(&self, request: SaveRequest) {
        self.send(EngineCommand::Save(request));
    }

    /// Abandons in-flight lookups and processing; they report nothing.
    pub fn cancel_pending(&self) {
        self.send(EngineCommand::CancelPending);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            ytdl_warn!("Engine is not running; command dropped");
        }
    }
}

async fn handle_command(
    context: &Context,
    command: EngineCommand,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let collaborators = &context.collaborators;
    let event = match command {
        EngineCommand::Lookup { ticket, url } => {
            let lookup = &collaborators.lookup;
            let work = run_with_retry(&context.settings.lookup_policy, "lookup", || {
                lookup.fetch_info(&url)
            });
            tokio::select! {
                _ = token.cancelled() => {
                    ytdl_debug!("Lookup ticket={} cancelled", ticket);
                    return;
                }
                result = work => {
                    match &result {
                        Ok(metadata) => ytdl_info!("Lookup ticket={} found {:?}", ticket, metadata.title),
                        Err(err) => ytdl_warn!("Lookup ticket={} failed: {}", ticket, err),
                    }
                    EngineEvent::MetadataReady { ticket, result }
                }
            }
        }
        EngineCommand::Process { ticket, request } => {
            let processor = &collaborators.processor;
            let work = run_with_retry(&context.settings.process_policy, "processing", || {
                processor.process(&request)
            });
            tokio::select! {
                _ = token.cancelled() => {
                    ytdl_debug!("Processing ticket={} cancelled", ticket);
                    return;
                }
                result = work => {
                    match &result {
                        Ok(artifact) => ytdl_info!("Processing ticket={} produced {}", ticket, artifact.artifact_ref),
                        Err(err) => ytdl_warn!("Processing ticket={} failed: {}", ticket, err),
                    }
                    EngineEvent::ProcessingFinished { ticket, result }
                }
            }
        }
        EngineCommand::ReadClipboard => {
            let result = read_url_text(collaborators.clipboard.as_ref()).await;
            if let Err(err) = &result {
                ytdl_warn!("Clipboard read failed: {}", err);
            }
            EngineEvent::ClipboardText(result)
        }
        EngineCommand::Save(request) => {
            let result = collaborators.saver.save(&request).await;
            if let Err(err) = &result {
                ytdl_warn!("Saving {} failed: {}", request.artifact_ref, err);
            }
            EngineEvent::SaveFinished(result.map_err(|err| err.to_string()))
        }
        EngineCommand::CancelPending => return,
    };
    let _ = event_tx.send(event);
}
