use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::pull::{PullRequest, Review, ReviewState};

#[derive(Debug, Serialize)]
pub(super) struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<&'static str>,
    pub per_page: u32,
    pub page: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRef {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullItem {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    // null for deleted accounts
    pub user: Option<UserRef>,
    #[serde(default)]
    pub assignees: Vec<UserRef>,
    #[serde(default)]
    pub requested_reviewers: Vec<UserRef>,
}

impl From<PullItem> for PullRequest {
    fn from(item: PullItem) -> Self {
        PullRequest {
            number: item.number,
            title: item.title,
            author: item
                .user
                .map(|u| u.login)
                .unwrap_or_else(|| "ghost".to_string()),
            url: item.html_url,
            created_at: item.created_at,
            updated_at: item.updated_at,
            assignees: item.assignees.into_iter().map(|u| u.login).collect(),
            requested_reviewers: item
                .requested_reviewers
                .into_iter()
                .map(|u| u.login)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewItem {
    pub user: Option<UserRef>,
    pub state: String,
    #[serde(default)]
    pub body: Option<String>,
}

impl ReviewItem {
    /// Reviews by deleted accounts have no author and are dropped.
    pub fn into_review(self) -> Option<Review> {
        let author = self.user?.login;
        Some(Review {
            author,
            state: ReviewState::from_api(&self.state),
            body: self.body.unwrap_or_default(),
        })
    }
}

/// Body of `GET /repos/{owner}/{repo}/pulls/{number}/requested_reviewers`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestedReviewers {
    #[serde(default)]
    pub users: Vec<UserRef>,
}
