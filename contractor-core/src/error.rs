use thiserror::Error;

/// Failures reported by the editor's collaborators.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid user id: {0}")]
    InvalidUserId(#[from] contractor_model::ModelError),

    #[error("{0}")]
    Store(String),

    #[error("{0}")]
    Upload(String),

    #[error("{0}")]
    Reference(String),

    #[error("{0}")]
    Reputation(String),

    #[error("{0}")]
    Session(String),
}

impl ProfileError {
    /// Message suitable for a user-facing notice, if the error carries one.
    pub fn user_message(&self) -> Option<String> {
        let message = self.to_string();
        if message.trim().is_empty() {
            None
        } else {
            Some(message)
        }
    }
}

pub type Result<T> = std::result::Result<T, ProfileError>;
