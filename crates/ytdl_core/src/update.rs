use crate::state::Operation;
use crate::{AppState, Effect, Msg, Notice, ProcessRequest, Step, WizardError};

/// Suggested filename when the media has no title.
pub const FALLBACK_FILENAME: &str = "download";

/// Checks the synchronous preconditions of `msg` against `state` without applying it.
///
/// Messages that are simply ignored in the current state (a stale completion, going
/// back from the first step) pass validation; `update` turns them into no-ops.
pub fn validate(state: &AppState, msg: &Msg) -> Result<(), WizardError> {
    let wizard = state.wizard();
    match msg {
        Msg::PasteClicked => {
            ensure_idle(state)?;
            ensure_step(wizard.step, Step::InputUrl)
        }
        Msg::FetchInfoClicked => {
            ensure_idle(state)?;
            ensure_step(wizard.step, Step::InputUrl)?;
            if wizard.source_url.trim().is_empty() {
                return Err(WizardError::EmptyOrWhitespaceUrl);
            }
            Ok(())
        }
        Msg::FormatSelected(_) | Msg::IncludeAudioToggled(_) => ensure_options_editable(state),
        Msg::QualitySelected(key) => {
            ensure_options_editable(state)?;
            if wizard.format.is_valid_quality(key) {
                Ok(())
            } else {
                Err(WizardError::InvalidQualitySelection { key: key.clone() })
            }
        }
        Msg::QualityPositionSelected(position) => {
            ensure_options_editable(state)?;
            match wizard.format.key_at(*position) {
                Some(_) => Ok(()),
                None => Err(WizardError::InvalidQualitySelection {
                    key: format!("#{position}"),
                }),
            }
        }
        Msg::ProcessClicked => {
            ensure_idle(state)?;
            ensure_step(wizard.step, Step::SelectOptions)?;
            if wizard.media_info.is_none() {
                return Err(WizardError::MissingMediaInfo);
            }
            Ok(())
        }
        Msg::BackClicked => {
            if wizard.step == Step::InputUrl {
                return Ok(());
            }
            ensure_idle(state)
        }
        Msg::DownloadClicked => {
            if wizard.artifact_url.is_none() {
                return Err(WizardError::MissingArtifact);
            }
            Ok(())
        }
        Msg::UrlChanged(_)
        | Msg::ClipboardRead(_)
        | Msg::InfoFetched { .. }
        | Msg::Processed { .. }
        | Msg::ResetClicked
        | Msg::SaveFinished(_)
        | Msg::NoticeDismissed => Ok(()),
    }
}

/// Pure update function: applies a message to state and returns any effects.
///
/// A message that fails `validate` leaves the wizard untouched and becomes the notice.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if let Err(err) = validate(&state, &msg) {
        state.set_notice(Notice::Error(err));
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::UrlChanged(text) => {
            // The URL box only exists on the first step and is locked during lookup.
            if state.wizard().step == Step::InputUrl
                && !state.is_busy()
                && state.wizard().source_url != text
            {
                state.wizard_mut().source_url = text;
            }
            Vec::new()
        }
        Msg::PasteClicked => vec![Effect::ReadClipboard],
        Msg::ClipboardRead(result) => {
            match result {
                Ok(text) => {
                    if state.wizard().step == Step::InputUrl && !state.is_busy() {
                        state.wizard_mut().source_url = text;
                        state.clear_notice();
                    }
                }
                Err(failure) => {
                    state.set_notice(Notice::Error(WizardError::ClipboardUnavailable(failure)));
                }
            }
            Vec::new()
        }
        Msg::FetchInfoClicked => {
            state.clear_notice();
            let url = state.wizard().source_url.trim().to_string();
            let ticket = state.begin(Operation::Lookup);
            vec![Effect::LookupMedia { ticket, url }]
        }
        Msg::InfoFetched { ticket, result } => {
            if state.settle(ticket, Operation::Lookup) {
                match result {
                    Ok(info) => {
                        state.wizard_mut().media_info = Some(info);
                        state.step_by(1);
                    }
                    Err(failure) => {
                        state.set_notice(Notice::Error(WizardError::MetadataLookupFailed(failure)));
                    }
                }
            }
            Vec::new()
        }
        Msg::FormatSelected(format) => {
            let wizard = state.wizard_mut();
            wizard.format = format;
            // A key from the other ladder must never survive a format switch.
            wizard.quality = format.default_quality().to_string();
            Vec::new()
        }
        Msg::IncludeAudioToggled(include) => {
            if state.wizard().include_source_audio != include {
                state.wizard_mut().include_source_audio = include;
            }
            Vec::new()
        }
        Msg::QualitySelected(key) => {
            state.wizard_mut().quality = key;
            Vec::new()
        }
        Msg::QualityPositionSelected(position) => {
            if let Some(key) = state.wizard().format.key_at(position) {
                state.wizard_mut().quality = key.to_string();
            }
            Vec::new()
        }
        Msg::ProcessClicked => {
            state.clear_notice();
            let wizard = state.wizard();
            let request = ProcessRequest {
                url: wizard.source_url.trim().to_string(),
                format: wizard.format,
                include_source_audio: wizard.include_source_audio,
                quality: wizard.quality.clone(),
            };
            let ticket = state.begin(Operation::Processing);
            vec![Effect::ProcessMedia { ticket, request }]
        }
        Msg::Processed { ticket, result } => {
            if state.settle(ticket, Operation::Processing) {
                match result {
                    Ok(artifact_url) => {
                        state.wizard_mut().artifact_url = Some(artifact_url);
                        state.step_by(1);
                    }
                    Err(failure) => {
                        state.set_notice(Notice::Error(WizardError::ProcessingFailed(failure)));
                    }
                }
            }
            Vec::new()
        }
        Msg::BackClicked => {
            if state.step_by(-1) {
                state.clear_notice();
            }
            Vec::new()
        }
        Msg::ResetClicked => {
            if state.reset() {
                vec![Effect::CancelPending]
            } else {
                Vec::new()
            }
        }
        Msg::DownloadClicked => {
            let wizard = state.wizard();
            match wizard.artifact_url.clone() {
                Some(artifact_url) => {
                    let suggested_name = wizard
                        .media_info
                        .as_ref()
                        .map(|info| info.title.trim())
                        .filter(|title| !title.is_empty())
                        .unwrap_or(FALLBACK_FILENAME)
                        .to_string();
                    vec![Effect::SaveArtifact {
                        artifact_url,
                        suggested_name,
                        format: wizard.format,
                    }]
                }
                None => Vec::new(),
            }
        }
        Msg::SaveFinished(result) => {
            let notice = match result {
                Ok(location) => Notice::Info(format!("Saved to {location}")),
                Err(reason) => Notice::Error(WizardError::SaveFailed(reason)),
            };
            state.set_notice(notice);
            Vec::new()
        }
        Msg::NoticeDismissed => {
            state.clear_notice();
            Vec::new()
        }
    };

    (state, effects)
}

fn ensure_idle(state: &AppState) -> Result<(), WizardError> {
    if state.is_busy() {
        Err(WizardError::Busy)
    } else {
        Ok(())
    }
}

/// Options feed the next processing request, so they are frozen once it starts
/// and while its artifact is on show.
fn ensure_options_editable(state: &AppState) -> Result<(), WizardError> {
    ensure_idle(state)?;
    ensure_step(state.wizard().step, Step::SelectOptions)
}

fn ensure_step(current: Step, expected: Step) -> Result<(), WizardError> {
    if current == expected {
        Ok(())
    } else {
        Err(WizardError::WrongStep)
    }
}
