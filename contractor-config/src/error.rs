use thiserror::Error;

use crate::validation::ConfigGuardRailError;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to load editor configuration: {0}")]
    Editor(#[source] anyhow::Error),
    #[error("invalid public storage URL '{value}'")]
    InvalidPublicBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
}
