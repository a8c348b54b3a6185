use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("could not read users file {path}: {source}")]
    UsersRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in users file {path}: {source}")]
    UsersParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("GitHub request failed ({operation}): {source}")]
    GitHub {
        operation: String,
        #[source]
        source: octocrab::Error,
    },

    #[error("pull request #{0} not found")]
    PullNotFound(u64),

    #[error("failed to send webhook request: {0}")]
    Webhook(#[from] reqwest::Error),

    #[error("webhook rejected the message (status {status}): {body}")]
    WebhookStatus { status: u16, body: String },
}

impl Error {
    pub fn github(operation: impl Into<String>, source: octocrab::Error) -> Self {
        Self::GitHub {
            operation: operation.into(),
            source,
        }
    }
}
