mod common;

use common::{at_select_options, init_logging, lookup_ticket, process_ticket, sample_info};
use ytdl_core::{
    update, AppState, ClipboardFailure, Effect, LookupFailure, Msg, Notice, ProcessFailure, Step,
    WizardError, WizardState,
};

fn with_url(url: &str) -> AppState {
    update(AppState::new(), Msg::UrlChanged(url.to_string())).0
}

#[test]
fn lookup_failure_clears_busy_and_stays() {
    init_logging();
    let (state, effects) = update(with_url("https://youtu.be/missing"), Msg::FetchInfoClicked);
    let ticket = lookup_ticket(&effects);

    let (state, effects) = update(
        state,
        Msg::InfoFetched {
            ticket,
            result: Err(LookupFailure::NotFound),
        },
    );

    assert!(effects.is_empty());
    assert!(!state.is_busy());
    assert_eq!(state.wizard().step, Step::InputUrl);
    assert_eq!(state.wizard().media_info, None);
    assert_eq!(
        state.notice(),
        Some(&Notice::Error(WizardError::MetadataLookupFailed(
            LookupFailure::NotFound
        )))
    );
    assert!(state.pending_ticket().is_none());
}

#[test]
fn lookup_never_leaves_busy_after_settling() {
    init_logging();
    let outcomes = [
        Ok(sample_info()),
        Err(LookupFailure::NotFound),
        Err(LookupFailure::InvalidUrl),
        Err(LookupFailure::Unreachable),
        Err(LookupFailure::TimedOut),
    ];

    for result in outcomes {
        let (state, effects) = update(with_url("https://youtu.be/abc123"), Msg::FetchInfoClicked);
        assert!(state.is_busy());
        let ticket = lookup_ticket(&effects);
        let (state, _) = update(state, Msg::InfoFetched { ticket, result });
        assert!(!state.is_busy());
        assert!(!state.wizard().is_busy);
    }
}

#[test]
fn second_lookup_is_refused_while_first_is_pending() {
    init_logging();
    let (state, effects) = update(with_url("https://youtu.be/abc123"), Msg::FetchInfoClicked);
    assert_eq!(effects.len(), 1);

    let (state, effects) = update(state, Msg::FetchInfoClicked);

    assert!(effects.is_empty());
    assert_eq!(state.pending_ticket(), Some(1));
    assert_eq!(state.notice(), Some(&Notice::Error(WizardError::Busy)));
}

#[test]
fn url_is_locked_while_lookup_is_pending() {
    init_logging();
    let (state, _) = update(with_url("https://youtu.be/abc123"), Msg::FetchInfoClicked);
    let (state, _) = update(state, Msg::UrlChanged("https://elsewhere".to_string()));

    assert_eq!(state.wizard().source_url, "https://youtu.be/abc123");
}

#[test]
fn lookup_result_after_reset_is_discarded() {
    init_logging();
    let (state, effects) = update(with_url("https://youtu.be/abc123"), Msg::FetchInfoClicked);
    let ticket = lookup_ticket(&effects);

    let (state, effects) = update(state, Msg::ResetClicked);
    assert_eq!(effects, vec![Effect::CancelPending]);
    let after_reset = state.clone();

    let (state, effects) = update(
        state,
        Msg::InfoFetched {
            ticket,
            result: Ok(sample_info()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state, after_reset);
    assert_eq!(state.wizard(), &WizardState::default());
}

#[test]
fn stale_lookup_does_not_satisfy_a_newer_request() {
    init_logging();
    let (state, effects) = update(with_url("https://youtu.be/first"), Msg::FetchInfoClicked);
    let stale = lookup_ticket(&effects);
    let (state, _) = update(state, Msg::ResetClicked);

    let (state, _) = update(state, Msg::UrlChanged("https://youtu.be/second".to_string()));
    let (state, effects) = update(state, Msg::FetchInfoClicked);
    let fresh = lookup_ticket(&effects);
    assert_ne!(stale, fresh);

    let (state, _) = update(
        state,
        Msg::InfoFetched {
            ticket: stale,
            result: Ok(sample_info()),
        },
    );
    assert!(state.is_busy());
    assert_eq!(state.wizard().step, Step::InputUrl);

    let (state, _) = update(
        state,
        Msg::InfoFetched {
            ticket: fresh,
            result: Ok(sample_info()),
        },
    );
    assert!(!state.is_busy());
    assert_eq!(state.wizard().step, Step::SelectOptions);
}

#[test]
fn processing_result_after_reset_is_discarded() {
    init_logging();
    let (state, effects) = update(at_select_options(), Msg::ProcessClicked);
    let ticket = process_ticket(&effects);
    let (state, _) = update(state, Msg::ResetClicked);
    let after_reset = state.clone();

    let (state, _) = update(
        state,
        Msg::Processed {
            ticket,
            result: Ok("https://cdn.example.com/out.mp4".to_string()),
        },
    );

    assert_eq!(state, after_reset);
}

#[test]
fn lookup_ticket_cannot_complete_processing() {
    init_logging();
    let (state, effects) = update(at_select_options(), Msg::ProcessClicked);
    let ticket = process_ticket(&effects);

    let (state, _) = update(
        state,
        Msg::InfoFetched {
            ticket,
            result: Ok(sample_info()),
        },
    );

    assert!(state.is_busy());
    assert_eq!(state.pending_ticket(), Some(ticket));
}

#[test]
fn processing_failure_stays_on_options() {
    init_logging();
    let (state, effects) = update(at_select_options(), Msg::ProcessClicked);
    let ticket = process_ticket(&effects);

    let (state, _) = update(
        state,
        Msg::Processed {
            ticket,
            result: Err(ProcessFailure::Failed),
        },
    );

    assert!(!state.is_busy());
    assert_eq!(state.wizard().step, Step::SelectOptions);
    assert_eq!(state.wizard().artifact_url, None);
    assert_eq!(
        state.notice(),
        Some(&Notice::Error(WizardError::ProcessingFailed(
            ProcessFailure::Failed
        )))
    );

    // Retrying is allowed and gets a new ticket.
    let (state, effects) = update(state, Msg::ProcessClicked);
    assert!(state.is_busy());
    assert_ne!(process_ticket(&effects), ticket);
    assert!(state.notice().is_none());
}

#[test]
fn reset_while_idle_emits_no_cancel() {
    init_logging();
    let (_, effects) = update(at_select_options(), Msg::ResetClicked);
    assert!(effects.is_empty());
}

#[test]
fn paste_requests_clipboard_and_applies_text() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::PasteClicked);
    assert_eq!(effects, vec![Effect::ReadClipboard]);

    let (state, _) = update(
        state,
        Msg::ClipboardRead(Ok("https://youtu.be/pasted".to_string())),
    );
    assert_eq!(state.wizard().source_url, "https://youtu.be/pasted");
}

#[test]
fn clipboard_failure_keeps_url() {
    init_logging();
    let state = with_url("https://youtu.be/typed");
    let (state, _) = update(state, Msg::ClipboardRead(Err(ClipboardFailure::Denied)));

    assert_eq!(state.wizard().source_url, "https://youtu.be/typed");
    assert_eq!(
        state.notice(),
        Some(&Notice::Error(WizardError::ClipboardUnavailable(
            ClipboardFailure::Denied
        )))
    );
}

#[test]
fn late_clipboard_text_is_ignored_after_first_step() {
    init_logging();
    let state = at_select_options();
    let (state, _) = update(state, Msg::ClipboardRead(Ok("https://late".to_string())));

    assert_eq!(state.wizard().source_url, "https://youtu.be/abc123");
}

#[test]
fn paste_is_refused_while_busy() {
    init_logging();
    let (state, _) = update(with_url("https://youtu.be/abc123"), Msg::FetchInfoClicked);
    let (state, effects) = update(state, Msg::PasteClicked);

    assert!(effects.is_empty());
    assert_eq!(state.notice(), Some(&Notice::Error(WizardError::Busy)));
}
