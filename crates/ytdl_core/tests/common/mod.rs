#![allow(dead_code)]

use std::sync::Once;

use ytdl_core::{update, AppState, Effect, MediaInfo, Msg, Step, Ticket};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(ytdl_logging::initialize_for_tests);
}

pub fn sample_info() -> MediaInfo {
    MediaInfo {
        title: "Never Gonna Give You Up".to_string(),
        thumbnail: "https://i.ytimg.com/vi/dQw4w9WgXcQ/maxresdefault.jpg".to_string(),
        duration: "3:33".to_string(),
        channel: "Rick Astley".to_string(),
    }
}

pub fn apply(state: AppState, msgs: impl IntoIterator<Item = Msg>) -> AppState {
    msgs.into_iter().fold(state, |state, msg| update(state, msg).0)
}

pub fn lookup_ticket(effects: &[Effect]) -> Ticket {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::LookupMedia { ticket, .. } => Some(*ticket),
            _ => None,
        })
        .expect("lookup effect")
}

pub fn process_ticket(effects: &[Effect]) -> Ticket {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ProcessMedia { ticket, .. } => Some(*ticket),
            _ => None,
        })
        .expect("process effect")
}

/// Drives a fresh wizard to `SelectOptions` with `sample_info`.
pub fn at_select_options() -> AppState {
    let state = apply(
        AppState::new(),
        [Msg::UrlChanged("https://youtu.be/abc123".to_string())],
    );
    let (state, effects) = update(state, Msg::FetchInfoClicked);
    let ticket = lookup_ticket(&effects);
    let (state, _) = update(
        state,
        Msg::InfoFetched {
            ticket,
            result: Ok(sample_info()),
        },
    );
    assert_eq!(state.wizard().step, Step::SelectOptions);
    state
}

/// Drives a fresh wizard to `Preview` with the given artifact.
pub fn at_preview(artifact: &str) -> AppState {
    let (state, effects) = update(at_select_options(), Msg::ProcessClicked);
    let ticket = process_ticket(&effects);
    let (state, _) = update(
        state,
        Msg::Processed {
            ticket,
            result: Ok(artifact.to_string()),
        },
    );
    assert_eq!(state.wizard().step, Step::Preview);
    state
}
