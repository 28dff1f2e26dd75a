use crate::view_model::{AppViewModel, PreviewKind, QualityMark};
use crate::{Format, WizardError, DEFAULT_QUALITY};

/// Identifies one lookup or processing request so late results can be matched or dropped.
pub type Ticket = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub enum Step {
    #[default]
    InputUrl,
    SelectOptions,
    Preview,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::InputUrl, Step::SelectOptions, Step::Preview];

    /// Zero-based position in the wizard.
    pub fn index(self) -> usize {
        match self {
            Step::InputUrl => 0,
            Step::SelectOptions => 1,
            Step::Preview => 2,
        }
    }

    /// The step `delta` positions away, if it exists.
    pub fn offset(self, delta: i8) -> Option<Step> {
        let target = self.index() as i64 + i64::from(delta);
        usize::try_from(target)
            .ok()
            .and_then(|index| Step::ALL.get(index).copied())
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::InputUrl => "Enter a YouTube video URL",
            Step::SelectOptions => "Choose format and quality",
            Step::Preview => "Ready to download",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaInfo {
    pub title: String,
    pub thumbnail: String,
    /// Display string such as `15:30`.
    pub duration: String,
    pub channel: String,
}

/// The wizard record. Replaced wholesale by `update`; never mutated from outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    pub step: Step,
    /// Direction of the last step change; only drives transition animation.
    pub direction: i8,
    pub source_url: String,
    pub media_info: Option<MediaInfo>,
    pub format: Format,
    pub include_source_audio: bool,
    pub quality: String,
    pub artifact_url: Option<String>,
    pub is_busy: bool,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: Step::InputUrl,
            direction: 0,
            source_url: String::new(),
            media_info: None,
            format: Format::Video,
            include_source_audio: true,
            quality: DEFAULT_QUALITY.to_string(),
            artifact_url: None,
            is_busy: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Lookup,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    ticket: Ticket,
    operation: Operation,
}

/// User-visible status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(WizardError),
    Info(String),
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Error(err) => write!(f, "{err}"),
            Notice::Info(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    wizard: WizardState,
    in_flight: Option<InFlight>,
    // Survives reset so a ticket is never reused within a session.
    last_ticket: Ticket,
    notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wizard(&self) -> &WizardState {
        &self.wizard
    }

    pub fn is_busy(&self) -> bool {
        self.wizard.is_busy
    }

    /// Ticket of the request whose result would currently be applied.
    pub fn pending_ticket(&self) -> Option<Ticket> {
        self.in_flight.map(|in_flight| in_flight.ticket)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let wizard = &self.wizard;
        let format = wizard.format;
        let qualities = format.qualities();
        let quality_position = format
            .position_of(&wizard.quality)
            .unwrap_or(qualities.len() - 1);
        let busy_label = match self.in_flight.map(|in_flight| in_flight.operation) {
            Some(Operation::Lookup) => Some("Checking..."),
            Some(Operation::Processing) => Some("Processing..."),
            None => None,
        };

        AppViewModel {
            step: wizard.step,
            step_number: wizard.step.index() + 1,
            step_title: wizard.step.title(),
            direction: wizard.direction,
            can_go_back: wizard.step != Step::InputUrl && !wizard.is_busy,
            busy: wizard.is_busy,
            busy_label,
            source_url: wizard.source_url.clone(),
            can_fetch: wizard.step == Step::InputUrl
                && !wizard.is_busy
                && !wizard.source_url.trim().is_empty(),
            media_info: wizard.media_info.clone(),
            format,
            include_source_audio: (format == Format::Video).then_some(wizard.include_source_audio),
            qualities: qualities
                .iter()
                .enumerate()
                .map(|(position, option)| QualityMark {
                    position,
                    key: option.key,
                    label: option.label,
                    selected: position == quality_position,
                })
                .collect(),
            quality_position,
            quality_label: qualities[quality_position].label,
            artifact_url: wizard.artifact_url.clone(),
            preview: wizard.artifact_url.as_ref().map(|_| match format {
                Format::Video => PreviewKind::Video,
                Format::Audio => PreviewKind::Audio,
            }),
            can_download: wizard.step == Step::Preview && wizard.artifact_url.is_some(),
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    pub(crate) fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn wizard_mut(&mut self) -> &mut WizardState {
        self.mark_dirty();
        &mut self.wizard
    }

    /// Marks the wizard busy and returns the ticket for the new request.
    pub(crate) fn begin(&mut self, operation: Operation) -> Ticket {
        self.last_ticket += 1;
        let ticket = self.last_ticket;
        self.in_flight = Some(InFlight { ticket, operation });
        self.wizard_mut().is_busy = true;
        ticket
    }

    /// Accepts a completion only if it belongs to the request still in flight.
    pub(crate) fn settle(&mut self, ticket: Ticket, operation: Operation) -> bool {
        match self.in_flight {
            Some(in_flight) if in_flight.ticket == ticket && in_flight.operation == operation => {
                self.in_flight = None;
                self.wizard_mut().is_busy = false;
                true
            }
            _ => false,
        }
    }

    /// Moves one step; a move past either end leaves the step unchanged.
    pub(crate) fn step_by(&mut self, delta: i8) -> bool {
        let Some(target) = self.wizard.step.offset(delta) else {
            return false;
        };
        let wizard = self.wizard_mut();
        wizard.step = target;
        wizard.direction = delta.signum();
        // Data belonging to later steps must not outlive a move back.
        if target < Step::Preview {
            wizard.artifact_url = None;
        }
        if target == Step::InputUrl {
            wizard.media_info = None;
        }
        true
    }

    /// Back to a fresh wizard; returns whether a request was abandoned.
    pub(crate) fn reset(&mut self) -> bool {
        let abandoned = self.in_flight.take().is_some();
        self.wizard = WizardState::default();
        self.notice = None;
        self.mark_dirty();
        abandoned
    }
}
