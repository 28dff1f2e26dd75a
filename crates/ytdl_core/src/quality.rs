/// Output kind the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Format {
    #[default]
    Video,
    Audio,
}

/// One entry of a format's quality ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityOption {
    pub key: &'static str,
    pub label: &'static str,
}

/// Key every format starts from. Names the top entry of each ladder.
pub const DEFAULT_QUALITY: &str = "best";

/// Ascending; slider position is the index into this list.
pub const VIDEO_QUALITIES: &[QualityOption] = &[
    QualityOption { key: "480", label: "480p" },
    QualityOption { key: "720", label: "720p" },
    QualityOption { key: "1080", label: "1080p" },
    QualityOption { key: "1440", label: "1440p" },
    QualityOption { key: "2160", label: "2160p" },
];

/// Ascending; slider position is the index into this list.
pub const AUDIO_QUALITIES: &[QualityOption] = &[
    QualityOption { key: "low", label: "64 kbps" },
    QualityOption { key: "medium", label: "128 kbps" },
    QualityOption { key: "high", label: "192 kbps" },
    QualityOption { key: "best", label: "320 kbps" },
];

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Video => "video",
            Format::Audio => "audio",
        }
    }

    /// Accepts `video`/`audio` in any case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "video" => Some(Format::Video),
            "audio" => Some(Format::Audio),
            _ => None,
        }
    }

    pub fn qualities(self) -> &'static [QualityOption] {
        match self {
            Format::Video => VIDEO_QUALITIES,
            Format::Audio => AUDIO_QUALITIES,
        }
    }

    pub fn default_quality(self) -> &'static str {
        DEFAULT_QUALITY
    }

    /// Slider position for `key`. `"best"` resolves to the top of every ladder.
    pub fn position_of(self, key: &str) -> Option<usize> {
        let qualities = self.qualities();
        qualities
            .iter()
            .position(|option| option.key == key)
            .or_else(|| (key == DEFAULT_QUALITY).then_some(qualities.len() - 1))
    }

    pub fn key_at(self, position: usize) -> Option<&'static str> {
        self.qualities().get(position).map(|option| option.key)
    }

    pub fn is_valid_quality(self, key: &str) -> bool {
        self.position_of(key).is_some()
    }

    /// Display label for `key`; unknown keys show the top entry like the slider does.
    pub fn label_for(self, key: &str) -> &'static str {
        let qualities = self.qualities();
        let position = self.position_of(key).unwrap_or(qualities.len() - 1);
        qualities[position].label
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
