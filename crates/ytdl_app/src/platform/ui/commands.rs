//! Typed terminal commands → wizard messages.

use ytdl_core::{Format, Msg};

/// What one input line asks the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Msg(Msg),
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  url <link>          set the video URL (a bare http(s) link works too)
  paste               read the URL from the clipboard
  fetch               look up the video
  format video|audio  choose the output format
  audio on|off        keep the source audio track (video only)
  quality <key>       choose a quality by key, e.g. 1080 or high
  slider <n>          choose a quality by slider position, starting at 1
  process             produce the download
  back                go to the previous step
  reset               start over
  download            save the result into the output directory
  dismiss             clear the current message
  help                show this list
  quit                leave";

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let msg = match word.to_ascii_lowercase().as_str() {
        "url" => Msg::UrlChanged(rest.to_string()),
        _ if word.starts_with("http://") || word.starts_with("https://") => {
            Msg::UrlChanged(line.to_string())
        }
        "paste" => Msg::PasteClicked,
        "fetch" => Msg::FetchInfoClicked,
        "format" => {
            let format = Format::from_name(rest)
                .ok_or_else(|| format!("unknown format {rest:?}; use video or audio"))?;
            Msg::FormatSelected(format)
        }
        "audio" => match rest.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" => Msg::IncludeAudioToggled(true),
            "off" | "no" | "false" => Msg::IncludeAudioToggled(false),
            _ => return Err("use `audio on` or `audio off`".to_string()),
        },
        "quality" if !rest.is_empty() => Msg::QualitySelected(rest.to_string()),
        "quality" => return Err("which quality? e.g. `quality 1080`".to_string()),
        "slider" => {
            let position: usize = rest
                .parse()
                .map_err(|_| format!("{rest:?} is not a slider position"))?;
            let position = position
                .checked_sub(1)
                .ok_or_else(|| "slider positions start at 1".to_string())?;
            Msg::QualityPositionSelected(position)
        }
        "process" => Msg::ProcessClicked,
        "back" => Msg::BackClicked,
        "reset" => Msg::ResetClicked,
        "download" | "save" => Msg::DownloadClicked,
        "dismiss" | "ok" => Msg::NoticeDismissed,
        "help" | "?" => return Ok(Some(Command::Help)),
        "quit" | "exit" | "q" => return Ok(Some(Command::Quit)),
        _ => return Err(format!("unknown command {word:?}; type `help`")),
    };
    Ok(Some(Command::Msg(msg)))
}
