use sha2::{Digest, Sha256};
use url::Url;

const FALLBACK_STEM: &str = "download";

/// Windows-safe filename from a suggested title: `{sanitized_title}.{ext}`.
pub fn artifact_filename(suggested: &str, extension: &str) -> String {
    format!("{}.{extension}", sanitize_title(suggested))
}

/// Collision variant: `{sanitized_title}--{short_hash(artifact_ref)}.{ext}`.
pub fn hashed_artifact_filename(suggested: &str, artifact_ref: &str, extension: &str) -> String {
    let hash = short_hash(artifact_ref);
    format!("{}--{hash}.{extension}", sanitize_title(suggested))
}

/// Highest counter tried after the plain and hashed names are taken.
const MAX_NUMBERED: u32 = 999;

/// Names to try in order: plain, hashed, then `{title}--{hash}-{n}.{ext}` from 2 up.
pub fn candidate_filenames<'a>(
    suggested: &'a str,
    artifact_ref: &'a str,
    extension: &'a str,
) -> impl Iterator<Item = String> + 'a {
    let plain = artifact_filename(suggested, extension);
    let hashed = hashed_artifact_filename(suggested, artifact_ref, extension);
    let stem = sanitize_title(suggested);
    let hash = short_hash(artifact_ref);
    std::iter::once(plain)
        .chain(std::iter::once(hashed))
        .chain((2..=MAX_NUMBERED).map(move |n| format!("{stem}--{hash}-{n}.{extension}")))
}

/// Extension of the last path segment of a URL or path, lowercased.
pub fn extension_from_ref(artifact_ref: &str) -> Option<String> {
    let path = match Url::parse(artifact_ref) {
        Ok(url) => url.path().to_string(),
        Err(_) => artifact_ref.to_string(),
    };
    let last = path.rsplit(['/', '\\']).next()?;
    let (stem, ext) = last.rsplit_once('.')?;
    let plausible = !stem.is_empty()
        && (1..=5).contains(&ext.len())
        && ext.chars().all(|c| c.is_ascii_alphanumeric());
    plausible.then(|| ext.to_ascii_lowercase())
}

fn sanitize_title(input: &str) -> String {
    let mut cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]).to_string();
    if cleaned.is_empty() {
        cleaned = FALLBACK_STEM.to_string();
    }
    // Collapse multiple underscores
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }
    let mut final_name = truncate_on_char_boundary(compacted, 120);
    if is_reserved_windows_name(&final_name) {
        final_name.push('_');
    }
    final_name
}

// Titles are often non-ASCII; `String::truncate` would panic mid-character.
fn truncate_on_char_boundary(mut text: String, max_bytes: usize) -> String {
    if text.len() > max_bytes {
        let mut cut = max_bytes;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
    }
    text
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
