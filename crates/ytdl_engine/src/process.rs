use std::time::Duration;

use crate::{Artifact, MediaFormat, ProcessError, ProcessErrorKind, ProcessRequest};

#[async_trait::async_trait]
pub trait MediaProcessor: Send + Sync {
    async fn process(&self, request: &ProcessRequest) -> Result<Artifact, ProcessError>;
}

/// Pretends to process media: waits, then returns a fixed artifact per format.
#[derive(Debug, Clone)]
pub struct SimulatedProcessor {
    pub delay: Duration,
    pub video_artifact: String,
    pub audio_artifact: String,
}

impl Default for SimulatedProcessor {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(2000),
            video_artifact: "https://www.example.com/processed-video.mp4".to_string(),
            audio_artifact: "https://www.example.com/processed-audio.m4a".to_string(),
        }
    }
}

#[async_trait::async_trait]
impl MediaProcessor for SimulatedProcessor {
    async fn process(&self, request: &ProcessRequest) -> Result<Artifact, ProcessError> {
        if request.quality.trim().is_empty() {
            return Err(ProcessError::new(
                ProcessErrorKind::Unsupported,
                "no quality selected",
            ));
        }
        tokio::time::sleep(self.delay).await;
        let artifact_ref = match request.format {
            MediaFormat::Video => self.video_artifact.clone(),
            MediaFormat::Audio => self.audio_artifact.clone(),
        };
        Ok(Artifact { artifact_ref })
    }
}
