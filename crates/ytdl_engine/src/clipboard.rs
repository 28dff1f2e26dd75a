use crate::ClipboardError;

/// Host clipboard access. Implementations must report failure, never panic.
#[async_trait::async_trait]
pub trait ClipboardSource: Send + Sync {
    async fn read_text(&self) -> Result<String, ClipboardError>;
}

/// Used when the build has no clipboard support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

#[async_trait::async_trait]
impl ClipboardSource for NoClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        Err(ClipboardError::Unsupported)
    }
}

/// Reads the system clipboard on a blocking thread.
#[cfg(feature = "clipboard")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

#[cfg(feature = "clipboard")]
#[async_trait::async_trait]
impl ClipboardSource for SystemClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        tokio::task::spawn_blocking(|| {
            let mut clipboard = arboard::Clipboard::new().map_err(map_arboard_error)?;
            clipboard.get_text().map_err(map_arboard_error)
        })
        .await
        .map_err(|_| ClipboardError::Unsupported)?
    }
}

#[cfg(feature = "clipboard")]
fn map_arboard_error(err: arboard::Error) -> ClipboardError {
    match err {
        arboard::Error::ContentNotAvailable => ClipboardError::Empty,
        arboard::Error::ClipboardOccupied => ClipboardError::Denied,
        _ => ClipboardError::Unsupported,
    }
}

/// Reads from `source`, treating blank text as an empty clipboard.
pub(crate) async fn read_url_text(source: &dyn ClipboardSource) -> Result<String, ClipboardError> {
    let text = source.read_text().await?;
    if text.trim().is_empty() {
        return Err(ClipboardError::Empty);
    }
    Ok(text)
}
