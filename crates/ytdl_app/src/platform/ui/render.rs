use std::fmt::Write;

use ytdl_core::{AppViewModel, Format, Notice, PreviewKind, Step};

const RULE: &str = "------------------------------------------------------------";

/// Draws the whole screen for `view` as plain text.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "Step {}/{}: {}",
        view.step_number,
        Step::ALL.len(),
        view.step_title
    );
    let _ = writeln!(out, "{RULE}");

    match view.step {
        Step::InputUrl => render_input(&mut out, view),
        Step::SelectOptions => render_options(&mut out, view),
        Step::Preview => render_preview(&mut out, view),
    }

    if let Some(label) = view.busy_label {
        let _ = writeln!(out, "\n  {label}");
    }
    match &view.notice {
        Some(Notice::Error(err)) => {
            let _ = writeln!(out, "\n  ! {err}");
        }
        Some(Notice::Info(text)) => {
            let _ = writeln!(out, "\n  > {text}");
        }
        None => {}
    }
    let _ = writeln!(out, "\n{}", hints(view));
    out
}

fn render_input(out: &mut String, view: &AppViewModel) {
    let url = if view.source_url.is_empty() {
        "(none)"
    } else {
        view.source_url.as_str()
    };
    let _ = writeln!(out, "  URL: {url}");
}

fn render_options(out: &mut String, view: &AppViewModel) {
    if let Some(info) = &view.media_info {
        let _ = writeln!(out, "  {}", info.title);
        let _ = writeln!(out, "  {} | {}", info.channel, info.duration);
        let _ = writeln!(out, "  Thumbnail: {}", info.thumbnail);
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  Format:  {}  {}",
        radio("Video", view.format == Format::Video),
        radio("Audio", view.format == Format::Audio)
    );
    if let Some(include) = view.include_source_audio {
        let _ = writeln!(
            out,
            "  Include source audio: {}",
            if include { "on" } else { "off" }
        );
    }
    let _ = write!(out, "  Quality:");
    for mark in &view.qualities {
        if mark.selected {
            let _ = write!(out, " [{}:{}]", mark.position + 1, mark.label);
        } else {
            let _ = write!(out, "  {}:{} ", mark.position + 1, mark.label);
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "  Selected: {}", view.quality_label);
}

fn render_preview(out: &mut String, view: &AppViewModel) {
    if let Some(info) = &view.media_info {
        let _ = writeln!(out, "  {}", info.title);
    }
    let player = match view.preview {
        Some(PreviewKind::Video) => "Video",
        Some(PreviewKind::Audio) => "Audio",
        None => "Nothing",
    };
    let _ = writeln!(
        out,
        "  {player} ready: {}",
        view.artifact_url.as_deref().unwrap_or("-")
    );
    let _ = writeln!(out, "  {} {}", view.format, view.quality_label);
}

fn radio(label: &str, selected: bool) -> String {
    if selected {
        format!("(*) {label}")
    } else {
        format!("( ) {label}")
    }
}

fn hints(view: &AppViewModel) -> String {
    let mut hints: Vec<&str> = Vec::new();
    if !view.busy {
        match view.step {
            Step::InputUrl => {
                hints.push("url <link>");
                hints.push("paste");
                if view.can_fetch {
                    hints.push("fetch");
                }
            }
            Step::SelectOptions => {
                hints.extend(["format video|audio", "quality <key>", "slider <n>"]);
                if view.include_source_audio.is_some() {
                    hints.push("audio on|off");
                }
                hints.push("process");
            }
            Step::Preview => {
                if view.can_download {
                    hints.push("download");
                }
            }
        }
        if view.can_go_back {
            hints.push("back");
        }
    }
    hints.push("reset");
    if view.notice.is_some() {
        hints.push("dismiss");
    }
    hints.extend(["help", "quit"]);
    format!("> {}", hints.join(" | "))
}
