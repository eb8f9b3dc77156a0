use std::path::Path;

use tracing::{info, warn};
use url::Url;

use crate::error::ConfigLoadError;
use crate::models::{ConfigSource, EditorConfig};
use crate::validation::{ConfigWarnings, apply_guard_rails};

/// A validated configuration and where it came from.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: EditorConfig,
    pub source: ConfigSource,
    pub public_base_url: Url,
    pub warnings: ConfigWarnings,
}

/// Resolves, parses and validates [`EditorConfig`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn new() -> Self {
        Self
    }

    /// Resolve from the process environment and working directory.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let (config, source) =
            EditorConfig::load_from_env().map_err(ConfigLoadError::Editor)?;
        self.finish(config, source)
    }

    /// Load a specific file, bypassing the environment lookup.
    pub fn load_file(&self, path: &Path) -> Result<ConfigLoad, ConfigLoadError> {
        let config =
            EditorConfig::load_from_file(path).map_err(ConfigLoadError::Editor)?;
        self.finish(config, ConfigSource::File(path.to_path_buf()))
    }

    /// Validate an already parsed configuration.
    pub fn finish(
        &self,
        config: EditorConfig,
        source: ConfigSource,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let public_base_url = config.public_base_url()?;
        let warnings = apply_guard_rails(&config)?;

        for warning in &warnings.items {
            match &warning.hint {
                Some(hint) => warn!(hint = %hint, "{}", warning.message),
                None => warn!("{}", warning.message),
            }
        }
        info!(source = ?source, data_dir = %config.storage.data_dir.display(), "editor configuration loaded");

        Ok(ConfigLoad {
            config,
            source,
            public_base_url,
            warnings,
        })
    }
}
