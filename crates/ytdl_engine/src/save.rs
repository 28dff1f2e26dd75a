use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use url::Url;
use ytdl_logging::{ytdl_debug, ytdl_info};

use crate::filename::{candidate_filenames, extension_from_ref};
use crate::persist::{AtomicFileWriter, PersistError};
use crate::{SaveError, SaveRequest};

/// Puts a finished artifact somewhere the user can find it.
#[async_trait::async_trait]
pub trait ArtifactSaver: Send + Sync {
    async fn save(&self, request: &SaveRequest) -> Result<PathBuf, SaveError>;
}

/// Client timeouts for remote artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveSettings {
    pub connect_timeout: Duration,
    /// Longest wait for the next bytes; a stalled stream fails instead of hanging.
    pub read_timeout: Duration,
}

impl Default for SaveSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
        }
    }
}

/// Saves artifacts into a download directory.
///
/// `http(s)` references are streamed with reqwest; `file://` URLs and plain
/// paths are copied on the blocking pool.
#[derive(Debug, Clone)]
pub struct DownloadDirSaver {
    output_dir: PathBuf,
    client: reqwest::Client,
}

enum Source {
    Remote(Url),
    Local(PathBuf),
}

impl DownloadDirSaver {
    pub fn new(output_dir: PathBuf, settings: SaveSettings) -> Result<Self, SaveError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .read_timeout(settings.read_timeout)
            .build()
            .map_err(|err| SaveError::Download(err.to_string()))?;
        Ok(Self { output_dir, client })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    async fn download(&self, url: Url, writer: &mut AtomicFileWriter) -> Result<(), SaveError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| SaveError::Download(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SaveError::Download(status.to_string()));
        }
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| SaveError::Download(err.to_string()))?;
            writer.write_chunk(&chunk)?;
        }
        Ok(())
    }
}

fn classify(artifact_ref: &str) -> Result<Source, SaveError> {
    match Url::parse(artifact_ref) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Source::Remote(url)),
        Ok(url) if url.scheme() == "file" => url
            .to_file_path()
            .map(Source::Local)
            .map_err(|_| SaveError::UnsupportedRef(artifact_ref.to_string())),
        // Windows drive letters parse as a one-letter scheme.
        Ok(url) if url.scheme().len() > 1 => Err(SaveError::UnsupportedRef(artifact_ref.to_string())),
        _ if !artifact_ref.trim().is_empty() => Ok(Source::Local(PathBuf::from(artifact_ref))),
        _ => Err(SaveError::UnsupportedRef(artifact_ref.to_string())),
    }
}

fn copy_local(path: &Path, mut writer: AtomicFileWriter) -> Result<AtomicFileWriter, SaveError> {
    let mut file = File::open(path).map_err(PersistError::from)?;
    let mut buffer = [0u8; 64 * 1024];
    loop {
        let read = file.read(&mut buffer).map_err(PersistError::from)?;
        if read == 0 {
            return Ok(writer);
        }
        writer.write_chunk(&buffer[..read])?;
    }
}

/// Runs filesystem work off the async workers.
async fn blocking<T, F>(work: F) -> Result<T, SaveError>
where
    F: FnOnce() -> Result<T, SaveError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| SaveError::Persist(PersistError::Io(io::Error::other(err))))?
}

#[async_trait::async_trait]
impl ArtifactSaver for DownloadDirSaver {
    async fn save(&self, request: &SaveRequest) -> Result<PathBuf, SaveError> {
        let source = classify(&request.artifact_ref)?;
        let output_dir = self.output_dir.clone();
        let mut writer =
            blocking(move || AtomicFileWriter::create(&output_dir).map_err(SaveError::from)).await?;

        match source {
            Source::Remote(url) => {
                ytdl_debug!("Downloading artifact from {}", url);
                self.download(url, &mut writer).await?;
            }
            Source::Local(path) => {
                ytdl_debug!("Copying artifact from {:?}", path);
                writer = blocking(move || copy_local(&path, writer)).await?;
            }
        }

        let bytes = writer.bytes_written();
        let extension = extension_from_ref(&request.artifact_ref)
            .unwrap_or_else(|| request.format.default_extension().to_string());
        let suggested = request.suggested_name.clone();
        let artifact_ref = request.artifact_ref.clone();
        let target = blocking(move || {
            writer
                .commit_unique(candidate_filenames(&suggested, &artifact_ref, &extension))
                .map_err(SaveError::from)
        })
        .await?;
        ytdl_info!("Saved {} bytes to {:?}", bytes, target);
        Ok(target)
    }
}
