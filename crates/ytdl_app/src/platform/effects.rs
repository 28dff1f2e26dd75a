use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use ytdl_core::{
    ClipboardFailure, Effect, Format, LookupFailure, MediaInfo, Msg, ProcessFailure,
    ProcessRequest,
};
use ytdl_engine::{
    ClipboardError, ClipboardSource, Collaborators, DownloadDirSaver, EngineEvent, EngineHandle,
    EngineSettings, LookupErrorKind, LookupSettings, MediaFormat, MediaMetadata, MetadataLookup,
    OEmbedLookup, ProcessErrorKind, SaveRequest, SaveSettings, SimulatedLookup, SimulatedProcessor,
};
use ytdl_logging::ytdl_info;

use super::settings::{AppSettings, Backend};
use super::ui::commands::Command;

/// Executes core effects on the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: &AppSettings, cmd_tx: mpsc::Sender<Command>) -> anyhow::Result<Self> {
        let engine = EngineHandle::new(
            build_collaborators(settings)?,
            EngineSettings {
                lookup_policy: settings.lookup.to_policy(),
                process_policy: settings.process.to_policy(),
            },
        )
        .context("failed to start the engine runtime")?;
        let runner = Self { engine };
        runner.spawn_event_loop(cmd_tx);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ReadClipboard => {
                    ytdl_info!("ReadClipboard");
                    self.engine.read_clipboard();
                }
                Effect::LookupMedia { ticket, url } => {
                    ytdl_info!("LookupMedia ticket={} url={}", ticket, url);
                    self.engine.lookup(ticket, url);
                }
                Effect::ProcessMedia { ticket, request } => {
                    ytdl_info!(
                        "ProcessMedia ticket={} format={} quality={} include_audio={}",
                        ticket,
                        request.format,
                        request.quality,
                        request.include_source_audio
                    );
                    self.engine.process(ticket, map_request(request));
                }
                Effect::CancelPending => {
                    ytdl_info!("CancelPending");
                    self.engine.cancel_pending();
                }
                Effect::SaveArtifact {
                    artifact_url,
                    suggested_name,
                    format,
                } => {
                    ytdl_info!("SaveArtifact name={:?} from {}", suggested_name, artifact_url);
                    self.engine.save(SaveRequest {
                        artifact_ref: artifact_url,
                        suggested_name,
                        format: map_format(format),
                    });
                }
            }
        }
    }

    fn spawn_event_loop(&self, cmd_tx: mpsc::Sender<Command>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(Duration::from_millis(100)) else {
                continue;
            };
            if cmd_tx.send(Command::Msg(map_event(event))).is_err() {
                break;
            }
        });
    }
}

fn build_collaborators(settings: &AppSettings) -> anyhow::Result<Collaborators> {
    let lookup: Arc<dyn MetadataLookup> = match settings.backend {
        Backend::Simulated => Arc::new(SimulatedLookup {
            delay: Duration::from_millis(settings.simulated_lookup_delay_ms),
            ..SimulatedLookup::default()
        }),
        Backend::Oembed => Arc::new(
            OEmbedLookup::new(LookupSettings {
                endpoint: settings.oembed_endpoint.clone(),
                ..LookupSettings::default()
            })
            .context("failed to build the oEmbed client")?,
        ),
    };
    let saver = DownloadDirSaver::new(settings.output_dir.clone(), SaveSettings::default())
        .context("failed to build the download client")?;

    Ok(Collaborators {
        lookup,
        processor: Arc::new(SimulatedProcessor {
            delay: Duration::from_millis(settings.simulated_process_delay_ms),
            ..SimulatedProcessor::default()
        }),
        clipboard: clipboard_source(),
        saver: Arc::new(saver),
    })
}

#[cfg(feature = "clipboard")]
fn clipboard_source() -> Arc<dyn ClipboardSource> {
    Arc::new(ytdl_engine::SystemClipboard)
}

#[cfg(not(feature = "clipboard"))]
fn clipboard_source() -> Arc<dyn ClipboardSource> {
    Arc::new(ytdl_engine::NoClipboard)
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::MetadataReady { ticket, result } => Msg::InfoFetched {
            ticket,
            result: result
                .map(map_metadata)
                .map_err(|err| map_lookup_kind(err.kind)),
        },
        EngineEvent::ProcessingFinished { ticket, result } => Msg::Processed {
            ticket,
            result: result
                .map(|artifact| artifact.artifact_ref)
                .map_err(|err| map_process_kind(err.kind)),
        },
        EngineEvent::ClipboardText(result) => Msg::ClipboardRead(result.map_err(map_clipboard)),
        EngineEvent::SaveFinished(result) => {
            Msg::SaveFinished(result.map(|path| path.display().to_string()))
        }
    }
}

fn map_request(request: ProcessRequest) -> ytdl_engine::ProcessRequest {
    ytdl_engine::ProcessRequest {
        url: request.url,
        format: map_format(request.format),
        include_source_audio: request.include_source_audio,
        quality: request.quality,
    }
}

fn map_format(format: Format) -> MediaFormat {
    match format {
        Format::Video => MediaFormat::Video,
        Format::Audio => MediaFormat::Audio,
    }
}

fn map_metadata(metadata: MediaMetadata) -> MediaInfo {
    MediaInfo {
        title: metadata.title,
        thumbnail: metadata.thumbnail_url,
        duration: metadata.duration,
        channel: metadata.channel,
    }
}

fn map_lookup_kind(kind: LookupErrorKind) -> LookupFailure {
    match kind {
        LookupErrorKind::NotFound => LookupFailure::NotFound,
        LookupErrorKind::InvalidUrl => LookupFailure::InvalidUrl,
        LookupErrorKind::Unreachable => LookupFailure::Unreachable,
        LookupErrorKind::TimedOut => LookupFailure::TimedOut,
    }
}

fn map_process_kind(kind: ProcessErrorKind) -> ProcessFailure {
    match kind {
        ProcessErrorKind::Unsupported => ProcessFailure::Unsupported,
        ProcessErrorKind::Failed => ProcessFailure::Failed,
        ProcessErrorKind::Unreachable => ProcessFailure::Unreachable,
        ProcessErrorKind::TimedOut => ProcessFailure::TimedOut,
    }
}

fn map_clipboard(err: ClipboardError) -> ClipboardFailure {
    match err {
        ClipboardError::Unsupported => ClipboardFailure::Unsupported,
        ClipboardError::Denied => ClipboardFailure::Denied,
        ClipboardError::Empty => ClipboardFailure::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use ytdl_engine::{Artifact, LookupError, ProcessError};

    #[test]
    fn lookup_events_keep_ticket_and_failure_kind() {
        let msg = map_event(EngineEvent::MetadataReady {
            ticket: 7,
            result: Err(LookupError::new(LookupErrorKind::NotFound, "404")),
        });
        assert_eq!(
            msg,
            Msg::InfoFetched {
                ticket: 7,
                result: Err(LookupFailure::NotFound)
            }
        );
    }

    #[test]
    fn metadata_fields_are_carried_over() {
        let msg = map_event(EngineEvent::MetadataReady {
            ticket: 1,
            result: Ok(MediaMetadata {
                title: "Sample Video".to_string(),
                thumbnail_url: "thumb".to_string(),
                duration: "15:30".to_string(),
                channel: "Tech Channel".to_string(),
            }),
        });
        let Msg::InfoFetched { result: Ok(info), .. } = msg else {
            panic!("unexpected {msg:?}");
        };
        assert_eq!(info.thumbnail, "thumb");
        assert_eq!(info.channel, "Tech Channel");
    }

    #[test]
    fn processing_and_save_events_map_to_messages() {
        assert_eq!(
            map_event(EngineEvent::ProcessingFinished {
                ticket: 3,
                result: Ok(Artifact {
                    artifact_ref: "clip.mp4".to_string()
                }),
            }),
            Msg::Processed {
                ticket: 3,
                result: Ok("clip.mp4".to_string())
            }
        );
        assert_eq!(
            map_event(EngineEvent::ProcessingFinished {
                ticket: 4,
                result: Err(ProcessError::new(ProcessErrorKind::TimedOut, "slow")),
            }),
            Msg::Processed {
                ticket: 4,
                result: Err(ProcessFailure::TimedOut)
            }
        );
        assert_eq!(
            map_event(EngineEvent::SaveFinished(Ok(PathBuf::from("out/clip.mp4")))),
            Msg::SaveFinished(Ok(PathBuf::from("out/clip.mp4").display().to_string()))
        );
        assert_eq!(
            map_event(EngineEvent::ClipboardText(Err(ClipboardError::Denied))),
            Msg::ClipboardRead(Err(ClipboardFailure::Denied))
        );
    }

    #[test]
    fn requests_keep_format_and_options() {
        let request = map_request(ProcessRequest {
            url: "https://youtu.be/abc123".to_string(),
            format: Format::Audio,
            include_source_audio: false,
            quality: "high".to_string(),
        });
        assert_eq!(request.format, MediaFormat::Audio);
        assert!(!request.include_source_audio);
        assert_eq!(request.quality, "high");
    }
}
