use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;
use ytdl_logging::ytdl_debug;

use crate::youtube::{default_thumbnail, video_id, watch_url};
use crate::{LookupError, LookupErrorKind, MediaMetadata};

/// oEmbed does not report a duration.
const UNKNOWN_DURATION: &str = "--:--";

#[async_trait::async_trait]
pub trait MetadataLookup: Send + Sync {
    async fn fetch_info(&self, url: &str) -> Result<MediaMetadata, LookupError>;
}

#[derive(Debug, Clone)]
pub struct LookupSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://www.youtube.com/oembed".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: String,
    author_name: String,
    #[serde(default)]
    thumbnail_url: Option<String>,
}

/// Looks up title, channel and thumbnail through YouTube's oEmbed endpoint.
#[derive(Debug, Clone)]
pub struct OEmbedLookup {
    settings: LookupSettings,
    client: reqwest::Client,
}

impl OEmbedLookup {
    pub fn new(settings: LookupSettings) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| LookupError::new(LookupErrorKind::Unreachable, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn request_url(&self, id: &str) -> Result<Url, LookupError> {
        let mut endpoint = Url::parse(&self.settings.endpoint)
            .map_err(|err| LookupError::new(LookupErrorKind::Unreachable, err.to_string()))?;
        endpoint
            .query_pairs_mut()
            .append_pair("url", &watch_url(id))
            .append_pair("format", "json");
        Ok(endpoint)
    }
}

#[async_trait::async_trait]
impl MetadataLookup for OEmbedLookup {
    async fn fetch_info(&self, url: &str) -> Result<MediaMetadata, LookupError> {
        let id = video_id(url).ok_or_else(|| {
            LookupError::new(LookupErrorKind::InvalidUrl, "not a YouTube video URL")
        })?;
        let request_url = self.request_url(&id)?;
        ytdl_debug!("oEmbed lookup id={} endpoint={}", id, self.settings.endpoint);

        let response = self
            .client
            .get(request_url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let kind = match status {
                StatusCode::NOT_FOUND => LookupErrorKind::NotFound,
                StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    LookupErrorKind::InvalidUrl
                }
                _ => LookupErrorKind::Unreachable,
            };
            return Err(LookupError::new(kind, status.to_string()));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let parsed: OEmbedResponse = serde_json::from_slice(&body).map_err(|err| {
            LookupError::new(
                LookupErrorKind::Unreachable,
                format!("malformed oEmbed response: {err}"),
            )
        })?;

        Ok(MediaMetadata {
            title: parsed.title,
            thumbnail_url: parsed
                .thumbnail_url
                .filter(|thumb| !thumb.is_empty())
                .unwrap_or_else(|| default_thumbnail(&id)),
            duration: UNKNOWN_DURATION.to_string(),
            channel: parsed.author_name,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> LookupError {
    if err.is_timeout() {
        return LookupError::new(LookupErrorKind::TimedOut, err.to_string());
    }
    LookupError::new(LookupErrorKind::Unreachable, err.to_string())
}

/// Answers every lookup with fixed metadata after a delay.
#[derive(Debug, Clone)]
pub struct SimulatedLookup {
    pub delay: Duration,
    pub metadata: MediaMetadata,
}

impl Default for SimulatedLookup {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1500),
            metadata: MediaMetadata {
                title: "Sample Video".to_string(),
                thumbnail_url: default_thumbnail("dQw4w9WgXcQ"),
                duration: "15:30".to_string(),
                channel: "Tech Channel".to_string(),
            },
        }
    }
}

#[async_trait::async_trait]
impl MetadataLookup for SimulatedLookup {
    async fn fetch_info(&self, url: &str) -> Result<MediaMetadata, LookupError> {
        if url.trim().is_empty() {
            return Err(LookupError::new(LookupErrorKind::InvalidUrl, "empty url"));
        }
        tokio::time::sleep(self.delay).await;
        Ok(self.metadata.clone())
    }
}
