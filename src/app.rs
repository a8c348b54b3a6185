use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, info};

use crate::domain::pull::PullRequest;
use crate::domain::users::UserDirectory;
use crate::error::Error;
use crate::notify::Notifier;
use crate::repo::PullRequestProvider;
use crate::usecase::classify::ReviewPolicy;
use crate::usecase::filter::active_pulls;
use crate::usecase::message::{Fragment, MessageBuilder};

/// Pull requests whose reviewer lookups may be in flight at once.
const MAX_IN_FLIGHT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No active pull requests; the summary alone was sent.
    NothingToReport,
    Reported { pulls: usize },
}

/// One notification run against one repository.
pub struct App<P: PullRequestProvider, N: Notifier> {
    provider: P,
    notifier: N,
    policy: Box<dyn ReviewPolicy>,
    users: UserDirectory,
    messages: MessageBuilder,
}

impl<P: PullRequestProvider, N: Notifier> App<P, N> {
    pub fn new(
        provider: P,
        notifier: N,
        policy: Box<dyn ReviewPolicy>,
        users: UserDirectory,
        messages: MessageBuilder,
    ) -> Self {
        Self {
            provider,
            notifier,
            policy,
            users,
            messages,
        }
    }

    /// Fetch, classify and deliver. Nothing is sent unless every pull request
    /// was fetched and classified.
    pub async fn run(&self) -> Result<Outcome, Error> {
        let pulls = active_pulls(self.provider.list_open_pulls().await?);
        info!(count = pulls.len(), "active pull requests");

        let summary = self.messages.summary(pulls.len());
        println!("{summary}");
        if pulls.is_empty() {
            self.notifier.post_text(&summary).await?;
            return Ok(Outcome::NothingToReport);
        }

        // buffered yields results in input order regardless of completion order.
        let fragments: Vec<Fragment> = stream::iter(pulls.iter().map(|pull| self.fragment(pull)))
            .buffered(MAX_IN_FLIGHT)
            .try_collect()
            .await?;
        for (i, f) in fragments.iter().enumerate() {
            println!(
                "{:<2} {} {:?} {}",
                i + 1,
                f.field.title,
                f.category,
                f.mentions.join(" ")
            );
        }

        let payload = self.messages.payload(summary, fragments);
        self.notifier.post_payload(&payload).await?;
        Ok(Outcome::Reported { pulls: pulls.len() })
    }

    async fn fragment(&self, pull: &PullRequest) -> Result<Fragment, Error> {
        let (reviewers, reviews) = futures::try_join!(
            self.provider.list_requested_reviewers(pull),
            self.provider.list_reviews(pull),
        )?;
        let classification = self
            .policy
            .classify(pull, &reviewers, &reviews, &self.users);
        debug!(
            number = pull.number,
            category = ?classification.category,
            mentions = ?classification.mentions,
            reviewers = ?reviewers,
            reviews = reviews.len(),
            with_comments = reviews.iter().filter(|r| !r.body.is_empty()).count(),
            created_at = %pull.created_at,
            updated_at = %pull.updated_at,
            "classified"
        );
        Ok(self.messages.fragment(pull, classification))
    }
}
