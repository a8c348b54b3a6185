pub mod auth;
pub mod model;

use std::time::Duration;

use async_trait::async_trait;
use model::{PageQuery, PullItem, RequestedReviewers, ReviewItem};
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::PullRequestProvider;
use crate::domain::pull::{PullRequest, Review};
use crate::error::Error;

pub struct GithubSettings {
    pub token: String,
    pub api_base: Option<String>,
    pub owner: String,
    pub repo: String,
    pub per_page: u32,
    pub timeout: Duration,
}

/// REST client for one repository.
pub struct GithubPulls {
    octo: Octocrab,
    owner: String,
    repo: String,
    per_page: u32,
}

impl GithubPulls {
    /// Must be called from within a Tokio runtime.
    pub fn connect(settings: GithubSettings) -> Result<Self, Error> {
        let mut builder = Octocrab::builder()
            .set_connect_timeout(Some(settings.timeout))
            .set_read_timeout(Some(settings.timeout))
            .personal_token(settings.token);
        if let Some(api) = settings.api_base {
            builder = builder.base_uri(api).map_err(|e| {
                Error::ConfigInvalid(format!("invalid github.api_base: {e}"))
            })?;
        }
        let octo = builder
            .build()
            .map_err(|e| Error::github("init client", e))?;
        Ok(Self {
            octo,
            owner: settings.owner,
            repo: settings.repo,
            per_page: settings.per_page,
        })
    }

    fn route(&self, tail: &str) -> String {
        format!("/repos/{}/{}/{tail}", self.owner, self.repo)
    }

    /// Follow `page` until a short or empty page comes back.
    async fn get_all<T: DeserializeOwned + Send>(
        &self,
        route: &str,
        state: Option<&'static str>,
        operation: &str,
    ) -> Result<Vec<T>, Error> {
        let mut out = Vec::new();
        let mut page = 1u32;
        loop {
            let query = PageQuery {
                state,
                per_page: self.per_page,
                page,
            };
            let items: Vec<T> = self
                .octo
                .get(route, Some(&query))
                .await
                .map_err(|e| Error::github(operation, e))?;
            let count = items.len();
            out.extend(items);
            if !has_next_page(count, self.per_page) {
                break;
            }
            page += 1;
        }
        debug!(route, count = out.len(), "fetched");
        Ok(out)
    }
}

/// A page filled to `per_page` may have a successor; anything shorter is the last.
/// Relies on `per_page` being within GitHub's cap, otherwise every page looks short.
fn has_next_page(count: usize, per_page: u32) -> bool {
    count > 0 && count >= per_page as usize
}

#[async_trait]
impl PullRequestProvider for GithubPulls {
    async fn list_open_pulls(&self) -> Result<Vec<PullRequest>, Error> {
        let items: Vec<PullItem> = self
            .get_all(&self.route("pulls"), Some("open"), "list pull requests")
            .await?;
        Ok(items.into_iter().map(PullRequest::from).collect())
    }

    async fn list_reviews(&self, pull: &PullRequest) -> Result<Vec<Review>, Error> {
        let route = self.route(&format!("pulls/{}/reviews", pull.number));
        let operation = format!("list reviews of #{}", pull.number);
        let items: Vec<ReviewItem> = self.get_all(&route, None, &operation).await?;
        Ok(items.into_iter().filter_map(ReviewItem::into_review).collect())
    }

    async fn list_requested_reviewers(&self, pull: &PullRequest) -> Result<Vec<String>, Error> {
        let route = self.route(&format!("pulls/{}/requested_reviewers", pull.number));
        let body: RequestedReviewers = self
            .octo
            .get(&route, None::<&()>)
            .await
            .map_err(|e| Error::github(format!("list requested reviewers of #{}", pull.number), e))?;
        Ok(body.users.into_iter().map(|u| u.login).collect())
    }
}
