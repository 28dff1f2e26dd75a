use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use serde::Deserialize;
use ytdl_engine::RetryPolicy;

use super::logging::LogDestination;

/// Where metadata comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Canned metadata after a short delay; no network.
    #[default]
    Simulated,
    /// YouTube's public oEmbed endpoint.
    Oembed,
}

/// Retry policy as written in the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub attempts: u32,
    pub timeout_ms: u64,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl RetrySettings {
    fn from_policy(policy: RetryPolicy) -> Self {
        Self {
            attempts: policy.attempts,
            timeout_ms: millis(policy.timeout),
            base_delay_ms: millis(policy.base_delay),
            max_delay_ms: millis(policy.max_delay),
        }
    }

    pub fn to_policy(self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.attempts,
            timeout: Duration::from_millis(self.timeout_ms),
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self::from_policy(RetryPolicy::lookup_default())
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Contents of `ytdl.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub output_dir: PathBuf,
    pub backend: Backend,
    pub oembed_endpoint: String,
    pub log_destination: LogDestination,
    pub log_level: String,
    pub lookup: RetrySettings,
    pub process: RetrySettings,
    pub simulated_lookup_delay_ms: u64,
    pub simulated_process_delay_ms: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./downloads"),
            backend: Backend::default(),
            oembed_endpoint: "https://www.youtube.com/oembed".to_string(),
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
            lookup: RetrySettings::from_policy(RetryPolicy::lookup_default()),
            process: RetrySettings::from_policy(RetryPolicy::processing_default()),
            simulated_lookup_delay_ms: 1500,
            simulated_process_delay_ms: 2000,
        }
    }
}

/// Command-line values that win over the settings file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output_dir: Option<PathBuf>,
    pub backend: Option<Backend>,
    pub log_destination: Option<LogDestination>,
    pub log_level: Option<String>,
}

impl AppSettings {
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(dir) = overrides.output_dir {
            self.output_dir = dir;
        }
        if let Some(backend) = overrides.backend {
            self.backend = backend;
        }
        if let Some(destination) = overrides.log_destination {
            self.log_destination = destination;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        self
    }
}

/// Reads settings from `path`. A missing file means defaults.
pub(crate) fn load_settings(path: &Path) -> anyhow::Result<AppSettings> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppSettings::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read settings from {path:?}"))
        }
    };
    ron::from_str(&content).with_context(|| format!("failed to parse settings from {path:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = load_settings(&temp.path().join("ytdl.ron")).unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ytdl.ron");
        fs::write(
            &path,
            r#"(
                output_dir: "media",
                backend: oembed,
                log_destination: both,
                lookup: (attempts: 5, timeout_ms: 1000),
            )"#,
        )
        .unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("media"));
        assert_eq!(settings.backend, Backend::Oembed);
        assert_eq!(settings.log_destination, LogDestination::Both);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.lookup.attempts, 5);
        assert_eq!(
            settings.lookup.to_policy().timeout,
            Duration::from_millis(1000)
        );
        assert_eq!(settings.lookup.base_delay_ms, 250);
        assert_eq!(
            settings.process.to_policy(),
            RetryPolicy::processing_default()
        );
        assert_eq!(settings.simulated_lookup_delay_ms, 1500);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ytdl.ron");
        fs::write(&path, "(backend: carrier_pigeon)").unwrap();

        let err = load_settings(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse settings"), "{err}");
    }

    #[test]
    fn command_line_overrides_file_values() {
        let file = AppSettings {
            backend: Backend::Oembed,
            log_level: "debug".to_string(),
            ..AppSettings::default()
        };

        let merged = file.with_overrides(Overrides {
            output_dir: Some(PathBuf::from("/tmp/out")),
            backend: Some(Backend::Simulated),
            log_destination: None,
            log_level: None,
        });

        assert_eq!(merged.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(merged.backend, Backend::Simulated);
        assert_eq!(merged.log_destination, LogDestination::File);
        assert_eq!(merged.log_level, "debug");
    }
}
