use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;

use super::PullRequestProvider;
use crate::domain::pull::{PullRequest, Review, ReviewState};
use crate::error::Error;

/// Provider backed by a fixed set of pull requests and reviews.
#[derive(Default)]
pub struct InMemoryPulls {
    pulls: Vec<PullRequest>,
    reviews: HashMap<u64, Vec<Review>>,
}

impl InMemoryPulls {
    pub fn with_seed(seed: impl IntoIterator<Item = (PullRequest, Vec<Review>)>) -> Self {
        let mut repo = Self::default();
        for (pull, reviews) in seed {
            repo.reviews.insert(pull.number, reviews);
            repo.pulls.push(pull);
        }
        repo
    }

    /// A small repository exercising every category of the reviewer workflow.
    pub fn demo() -> Self {
        let now = OffsetDateTime::now_utc();
        let pull = |number: u64, title: &str, author: &str, reviewers: &[&str]| PullRequest {
            number,
            title: title.to_string(),
            author: author.to_string(),
            url: format!("https://github.com/octo-org/demo/pull/{number}"),
            created_at: now,
            updated_at: now,
            assignees: Vec::new(),
            requested_reviewers: reviewers.iter().map(|r| r.to_string()).collect(),
        };
        Self::with_seed([
            (
                pull(15, "Add search endpoint", "alice", &[]),
                vec![
                    Review::new("bob", ReviewState::Approved),
                    Review::new("carol", ReviewState::Approved),
                ],
            ),
            (pull(14, "WIP: new cache layer", "bob", &["alice"]), Vec::new()),
            (
                pull(13, "Fix pagination off-by-one", "carol", &["alice", "bob"]),
                vec![Review::new("alice", ReviewState::Approved)],
            ),
            (
                pull(12, "Rename config keys", "dave", &[]),
                vec![Review::new("alice", ReviewState::ChangesRequested)],
            ),
            (pull(11, "Update README", "erin", &[]), Vec::new()),
        ])
    }

    fn find(&self, number: u64) -> Result<&PullRequest, Error> {
        self.pulls
            .iter()
            .find(|p| p.number == number)
            .ok_or(Error::PullNotFound(number))
    }
}

#[async_trait]
impl PullRequestProvider for InMemoryPulls {
    async fn list_open_pulls(&self) -> Result<Vec<PullRequest>, Error> {
        Ok(self.pulls.clone())
    }

    async fn list_reviews(&self, pull: &PullRequest) -> Result<Vec<Review>, Error> {
        self.find(pull.number)?;
        Ok(self.reviews.get(&pull.number).cloned().unwrap_or_default())
    }

    async fn list_requested_reviewers(&self, pull: &PullRequest) -> Result<Vec<String>, Error> {
        Ok(self.find(pull.number)?.requested_reviewers.clone())
    }
}
