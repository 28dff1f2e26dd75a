use crate::{ClipboardFailure, Format, LookupFailure, MediaInfo, ProcessFailure, Ticket};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    UrlChanged(String),
    /// User asked to paste the URL from the clipboard.
    PasteClicked,
    /// Clipboard read finished.
    ClipboardRead(Result<String, ClipboardFailure>),
    /// User submitted the URL for lookup.
    FetchInfoClicked,
    /// Metadata lookup finished.
    InfoFetched {
        ticket: Ticket,
        result: Result<MediaInfo, LookupFailure>,
    },
    FormatSelected(Format),
    IncludeAudioToggled(bool),
    /// User picked a quality by key.
    QualitySelected(String),
    /// User moved the quality slider to a position.
    QualityPositionSelected(usize),
    /// User started processing with the current options.
    ProcessClicked,
    /// Processing finished; `Ok` carries the artifact reference.
    Processed {
        ticket: Ticket,
        result: Result<String, ProcessFailure>,
    },
    BackClicked,
    ResetClicked,
    DownloadClicked,
    /// Save-to-disk finished; `Ok` carries where the file landed.
    SaveFinished(Result<String, String>),
    NoticeDismissed,
}
