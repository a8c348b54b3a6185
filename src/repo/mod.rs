use async_trait::async_trait;

use crate::domain::pull::{PullRequest, Review};
use crate::error::Error;

pub mod github;
pub mod memory;

/// Source of open pull requests and their review history for one repository.
#[async_trait]
pub trait PullRequestProvider: Send + Sync {
    async fn list_open_pulls(&self) -> Result<Vec<PullRequest>, Error>;
    async fn list_reviews(&self, pull: &PullRequest) -> Result<Vec<Review>, Error>;
    /// Logins of users (not teams) currently asked to review `pull`.
    async fn list_requested_reviewers(&self, pull: &PullRequest) -> Result<Vec<String>, Error>;
}
