//! User-facing surfaces the editor reports through: transient notices, the
//! blocking confirmation modal and route changes.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default on-screen lifetime of a notice.
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_millis(2500);

/// Colour/severity of a transient notice.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Primary,
    Success,
    Warning,
    Danger,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
        }
    }
}

/// A transient message (toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
    pub duration: Duration,
}

impl Notice {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            duration: DEFAULT_NOTICE_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notice: Notice);
}

/// Two-choice blocking confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub header: String,
    pub message: String,
    pub cancel_label: String,
    pub accept_label: String,
}

#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Returns `true` only when the accept action was chosen.
    async fn confirm(&self, prompt: ConfirmPrompt) -> bool;
}

/// Destinations the editor can leave to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The read-only profile tab shown after a successful save.
    ProfileTab,
    /// The separate account deletion request flow.
    DeleteRequest,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::ProfileTab => "/tabs/profile",
            Self::DeleteRequest => "/delete",
        }
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
