use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;

pub const MIN_PER_PAGE: u32 = 30;
/// GitHub caps `per_page` at 100 and silently truncates larger values.
pub const MAX_PER_PAGE: u32 = 100;
pub const MIN_APPROVED: u32 = 1;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub github: GithubConfig,
    #[serde(default)]
    pub slack_webhooks: Vec<SlackWebhookConfig>,
    #[serde(default)]
    pub app: AppConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    /// Falls back to `GITHUB_TOKEN` when empty.
    #[serde(default)]
    pub access_token: String,
    pub owner: String,
    pub repo: String,
    pub minimum_approved: u32,
    pub per_page: u32,
    /// GitHub Enterprise API root, e.g. `https://github.example.com/api/v3`.
    #[serde(default)]
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlackWebhookConfig {
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub icon_emoji: String,
    pub webhook_url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Workflow {
    /// Classify against the reviewers GitHub says are requested.
    #[default]
    Reviewers,
    /// Classify against the pull request's assignees.
    Assignees,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub workflow: Workflow,
    #[serde(default)]
    pub users_path: Option<PathBuf>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workflow: Workflow::default(),
            users_path: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("prnotify").join("config.json"))
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Check required fields and bounds, and that `webhook_index` points at a webhook.
    pub fn validate(&self, webhook_index: usize) -> Result<(), Error> {
        let gh = &self.github;
        if gh.owner.trim().is_empty() {
            return Err(Error::ConfigInvalid("github.owner must be set".into()));
        }
        if gh.repo.trim().is_empty() {
            return Err(Error::ConfigInvalid("github.repo must be set".into()));
        }
        if gh.minimum_approved < MIN_APPROVED {
            return Err(Error::ConfigInvalid(format!(
                "github.minimum_approved must be at least {MIN_APPROVED}, got {}",
                gh.minimum_approved
            )));
        }
        if !(MIN_PER_PAGE..=MAX_PER_PAGE).contains(&gh.per_page) {
            return Err(Error::ConfigInvalid(format!(
                "github.per_page must be between {MIN_PER_PAGE} and {MAX_PER_PAGE}, got {}",
                gh.per_page
            )));
        }
        if self.app.request_timeout_secs == 0 {
            return Err(Error::ConfigInvalid(
                "app.request_timeout_secs must be positive".into(),
            ));
        }
        let webhook = self.webhook(webhook_index)?;
        if webhook.webhook_url.trim().is_empty() {
            return Err(Error::ConfigInvalid(format!(
                "slack_webhooks[{webhook_index}].webhook_url must be set"
            )));
        }
        Ok(())
    }

    pub fn webhook(&self, index: usize) -> Result<&SlackWebhookConfig, Error> {
        self.slack_webhooks.get(index).ok_or_else(|| {
            Error::ConfigInvalid(format!(
                "invalid webhook index {index}: {} webhook(s) configured",
                self.slack_webhooks.len()
            ))
        })
    }

    pub fn users_path(&self) -> Option<PathBuf> {
        self.app
            .users_path
            .clone()
            .or_else(crate::domain::users::UserDirectory::default_path)
    }

    pub fn repo_slug(&self) -> String {
        format!("{}/{}", self.github.owner, self.github.repo)
    }
}
