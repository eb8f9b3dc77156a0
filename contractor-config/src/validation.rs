use thiserror::Error;

use super::models::EditorConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigGuardRailError {
    #[error("storage.image_prefix must not be empty")]
    EmptyImagePrefix,
    #[error(
        "storage.image_prefix '{prefix}' must not start or end with '/'"
    )]
    MalformedImagePrefix { prefix: String },
    #[error("storage.public_base_url '{url}' cannot be used as a base URL")]
    UnusableBaseUrl { url: String },
    #[error("notices.duration_ms must be greater than zero")]
    ZeroNoticeDuration,
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Reject settings the editor cannot work with and collect warnings for
/// ones that merely look suspicious.
pub fn apply_guard_rails(
    config: &EditorConfig,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();
    let storage = &config.storage;

    let prefix = storage.image_prefix.as_str();
    if prefix.trim().is_empty() {
        return Err(ConfigGuardRailError::EmptyImagePrefix);
    }
    if prefix.starts_with('/') || prefix.ends_with('/') {
        return Err(ConfigGuardRailError::MalformedImagePrefix {
            prefix: prefix.to_string(),
        });
    }

    // Unparseable URLs are reported by the loader with the parse error.
    if let Ok(url) = url::Url::parse(&storage.public_base_url) {
        if url.cannot_be_a_base() {
            return Err(ConfigGuardRailError::UnusableBaseUrl {
                url: storage.public_base_url.clone(),
            });
        }
        if !url.path().ends_with('/') {
            warnings.push_with_hint(
                format!(
                    "storage.public_base_url '{}' has no trailing slash",
                    storage.public_base_url
                ),
                "A '/' is appended so the last path segment is kept",
            );
        }
    }

    if config.notices.duration_ms == 0 {
        return Err(ConfigGuardRailError::ZeroNoticeDuration);
    }

    if !storage.data_dir.exists() {
        warnings.push(format!(
            "data directory {} does not exist yet; it is created on first write",
            storage.data_dir.display()
        ));
    }

    Ok(warnings)
}
