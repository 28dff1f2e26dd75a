use crate::{Format, MediaInfo, Notice, Step};

/// Which player element the preview step should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Video,
    Audio,
}

/// One tick on the quality slider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityMark {
    pub position: usize,
    pub key: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub step: Step,
    /// One-based, for display.
    pub step_number: usize,
    pub step_title: &'static str,
    pub direction: i8,
    pub can_go_back: bool,
    pub busy: bool,
    pub busy_label: Option<&'static str>,
    pub source_url: String,
    pub can_fetch: bool,
    pub media_info: Option<MediaInfo>,
    pub format: Format,
    /// Only offered for video.
    pub include_source_audio: Option<bool>,
    pub qualities: Vec<QualityMark>,
    pub quality_position: usize,
    pub quality_label: &'static str,
    pub artifact_url: Option<String>,
    pub preview: Option<PreviewKind>,
    pub can_download: bool,
    pub notice: Option<Notice>,
    pub dirty: bool,
}
