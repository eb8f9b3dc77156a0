use anyhow::{Context, anyhow};
use contractor_core::domain::profile::{EditorSettings, ReferenceNoticePolicy};
use contractor_core::domain::profile::image::DEFAULT_IMAGE_PREFIX;
use contractor_core::ports::presentation::DEFAULT_NOTICE_DURATION;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

use crate::error::ConfigLoadError;

pub const CONFIG_PATH_VAR: &str = "CONTRACTOR_CONFIG_PATH";
pub const CONFIG_JSON_VAR: &str = "CONTRACTOR_CONFIG_JSON";

const CANDIDATES: &[&str] = &[
    "contractor.toml",
    "contractor.json",
    "config/contractor.toml",
    "config/contractor.json",
];

/// Source that produced the editor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// Where profiles, reference lists and images live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Root directory for the filesystem adapters.
    pub data_dir: PathBuf,
    /// URL the image directory is served under. Public image URLs are
    /// built by joining the storage path onto it.
    pub public_base_url: String,
    /// Folder profile images are written to, relative to `data_dir`.
    pub image_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            public_base_url: "http://localhost:8080/storage/".to_string(),
            image_prefix: DEFAULT_IMAGE_PREFIX.to_string(),
        }
    }
}

/// Toast behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NoticeConfig {
    /// How long a notice stays on screen, in milliseconds.
    pub duration_ms: u64,
    /// Which reference-list failures raise a notice.
    pub reference_failures: ReferenceNoticePolicy,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_NOTICE_DURATION.as_millis() as u64,
            reference_failures: ReferenceNoticePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EditorConfig {
    pub storage: StorageConfig,
    pub notices: NoticeConfig,
}

impl EditorConfig {
    /// Load the configuration using environment variables.
    /// Evaluation order:
    /// 1) `$CONTRACTOR_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$CONTRACTOR_CONFIG_JSON` (inline JSON),
    /// 3) the first existing well-known file in the working directory,
    /// 4) defaults.
    pub fn load_from_env() -> anyhow::Result<(Self, ConfigSource)> {
        Self::load_with(|key| env::var(key).ok(), Path::new("."))
    }

    /// Same lookup as [`Self::load_from_env`] with an explicit variable
    /// source and base directory for the well-known files.
    pub fn load_with(
        var: impl Fn(&str) -> Option<String>,
        base_dir: &Path,
    ) -> anyhow::Result<(Self, ConfigSource)> {
        if let Some(path_str) = var(CONFIG_PATH_VAR)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Some(raw) = var(CONFIG_JSON_VAR)
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse_json(&raw)
                .with_context(|| format!("failed to parse {CONFIG_JSON_VAR}"))?;
            return Ok((parsed, ConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file(base_dir) {
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((Self::default(), ConfigSource::Default))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read editor config from {}", path.display())
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents).with_context(|| {
                format!("invalid editor config {}", path.display())
            }),
            Some("toml") => toml::from_str(&contents).map_err(|err| {
                anyhow!("invalid editor config {}: {}", path.display(), err)
            }),
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    pub fn parse_from_str(
        contents: &str,
        origin: &str,
    ) -> anyhow::Result<Self> {
        // TOML first, JSON as a fallback.
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse editor config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw)
            .map_err(|err| anyhow!("invalid editor config json: {err}"))
    }

    fn find_default_file(base_dir: &Path) -> Option<PathBuf> {
        CANDIDATES
            .iter()
            .map(|candidate| base_dir.join(candidate))
            .find(|path| path.is_file())
    }

    pub fn public_base_url(&self) -> Result<Url, ConfigLoadError> {
        Url::parse(&self.storage.public_base_url).map_err(|source| {
            ConfigLoadError::InvalidPublicBaseUrl {
                value: self.storage.public_base_url.clone(),
                source,
            }
        })
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notices.duration_ms)
    }

    /// Editor tunables derived from this configuration.
    pub fn editor_settings(&self) -> EditorSettings {
        EditorSettings {
            image_prefix: self.storage.image_prefix.clone(),
            notice_duration: self.notice_duration(),
            reference_notices: self.notices.reference_failures,
        }
    }
}
