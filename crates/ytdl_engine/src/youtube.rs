use url::Url;

/// Extracts the video id from the usual YouTube URL shapes.
///
/// Recognises `youtu.be/<id>`, `youtube.com/watch?v=<id>` and the
/// `/shorts/`, `/embed/`, `/live/` and `/v/` paths on the `www.`, `m.` and
/// `music.` hosts. Anything else yields `None`.
pub fn video_id(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw.trim()).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let host = parsed.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    let candidate = match host {
        "youtu.be" => segments.first().map(|id| id.to_string()),
        "youtube.com" | "m.youtube.com" | "music.youtube.com" => match segments.as_slice() {
            ["watch"] => parsed
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            ["shorts" | "embed" | "live" | "v", id, ..] => Some(id.to_string()),
            _ => None,
        },
        _ => None,
    }?;

    is_plausible_id(&candidate).then_some(candidate)
}

/// Canonical watch URL for an id.
pub fn watch_url(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={id}")
}

pub(crate) fn default_thumbnail(id: &str) -> String {
    format!("https://i.ytimg.com/vi/{id}/maxresdefault.jpg")
}

fn is_plausible_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 64
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_common_shapes() {
        assert_eq!(video_id("https://youtu.be/abc123").as_deref(), Some("abc123"));
        assert_eq!(
            video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            video_id("https://m.youtube.com/shorts/Zx_9-aa").as_deref(),
            Some("Zx_9-aa")
        );
        assert_eq!(
            video_id("  https://music.youtube.com/watch?v=abc  ").as_deref(),
            Some("abc")
        );
        assert_eq!(
            video_id("http://youtube.com/embed/xyz/extra").as_deref(),
            Some("xyz")
        );
    }

    #[test]
    fn rejects_other_hosts_and_shapes() {
        assert_eq!(video_id("https://vimeo.com/12345"), None);
        assert_eq!(video_id("https://www.youtube.com/feed/trending"), None);
        assert_eq!(video_id("https://www.youtube.com/watch?list=PL1"), None);
        assert_eq!(video_id("ftp://youtu.be/abc"), None);
        assert_eq!(video_id("not a url"), None);
        assert_eq!(video_id("https://youtu.be/"), None);
        assert_eq!(video_id("https://youtu.be/has%20space"), None);
    }
}
