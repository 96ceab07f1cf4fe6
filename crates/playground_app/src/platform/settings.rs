use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use playground_engine::FetchSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const SETTINGS_FILENAME: &str = "playground.ron";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Contents of `playground.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundSettings {
    pub log_destination: LogDestination,
    pub optimizer_program: PathBuf,
    pub download_dir: PathBuf,
    pub fetch: FetchFileSettings,
}

impl Default for PlaygroundSettings {
    fn default() -> Self {
        Self {
            log_destination: LogDestination::File,
            optimizer_program: PathBuf::from(playground_core::CLI_NAME),
            download_dir: PathBuf::from("downloads"),
            fetch: FetchFileSettings::default(),
        }
    }
}

/// Serializable mirror of [`FetchSettings`], with durations in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchFileSettings {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchFileSettings {
    fn default() -> Self {
        let defaults = FetchSettings::default();
        Self {
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
            request_timeout_secs: defaults.request_timeout.as_secs(),
            redirect_limit: defaults.redirect_limit,
            max_bytes: defaults.max_bytes,
            allowed_content_types: defaults.allowed_content_types,
        }
    }
}

impl From<&FetchFileSettings> for FetchSettings {
    fn from(settings: &FetchFileSettings) -> Self {
        FetchSettings {
            connect_timeout: Duration::from_secs(settings.connect_timeout_secs),
            request_timeout: Duration::from_secs(settings.request_timeout_secs),
            redirect_limit: settings.redirect_limit,
            max_bytes: settings.max_bytes,
            allowed_content_types: settings.allowed_content_types.clone(),
        }
    }
}

/// Read `{dir}/playground.ron`. A missing file is `Ok(None)`.
pub fn read_settings(dir: &Path) -> Result<Option<PlaygroundSettings>, SettingsError> {
    let path = dir.join(SETTINGS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(SettingsError::Read { path, source }),
    };
    ron::from_str(&content)
        .map(Some)
        .map_err(|source| SettingsError::Parse { path, source })
}

/// Settings from `{dir}/playground.ron`, or defaults plus the reason the
/// file could not be used. Runs before logging exists, so the caller reports.
pub fn load_settings(dir: &Path) -> (PlaygroundSettings, Option<SettingsError>) {
    match read_settings(dir) {
        Ok(settings) => (settings.unwrap_or_default(), None),
        Err(err) => (PlaygroundSettings::default(), Some(err)),
    }
}
