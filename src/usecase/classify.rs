use std::collections::HashSet;

use crate::config::Workflow;
use crate::domain::pull::{PullRequest, Review, ReviewState};
use crate::domain::users::UserDirectory;

/// Notification bucket. Declaration order is the order buckets appear in a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Merge,
    ReviewPending,
    ChangesRequested,
    RequestReviewers,
    RequestAssignees,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Merge,
        Category::ReviewPending,
        Category::ChangesRequested,
        Category::RequestReviewers,
        Category::RequestAssignees,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    /// Display names to address, in a stable order.
    pub mentions: Vec<String>,
}

impl Classification {
    fn author(category: Category, pull: &PullRequest, users: &UserDirectory) -> Self {
        Self {
            category,
            mentions: vec![users.resolve(&pull.author).to_string()],
        }
    }
}

/// Decides which bucket a pull request belongs to and who should act on it.
pub trait ReviewPolicy: Send + Sync {
    /// `reviewers` is the list of users currently asked to review `pull`.
    fn classify(
        &self,
        pull: &PullRequest,
        reviewers: &[String],
        reviews: &[Review],
        users: &UserDirectory,
    ) -> Classification;
}

pub fn policy_for(workflow: Workflow, minimum_approved: u32) -> Box<dyn ReviewPolicy> {
    let minimum_approved = minimum_approved as usize;
    match workflow {
        Workflow::Reviewers => Box::new(RequestedReviewersPolicy { minimum_approved }),
        Workflow::Assignees => Box::new(AssigneesPolicy { minimum_approved }),
    }
}

/// Review outcomes keyed by display name. A reviewer may sit in both sets when
/// they approved and requested changes at different times.
#[derive(Debug, Default)]
struct Outcomes {
    approved: HashSet<String>,
    changes_requested: HashSet<String>,
}

impl Outcomes {
    fn tally(
        reviews: &[Review],
        users: &UserDirectory,
        skip_change_request: impl Fn(&str) -> bool,
    ) -> Self {
        let mut out = Self::default();
        for review in reviews {
            let name = users.resolve(&review.author).to_string();
            match review.state {
                ReviewState::Approved => {
                    out.approved.insert(name);
                }
                ReviewState::ChangesRequested if !skip_change_request(review.author.as_str()) => {
                    out.changes_requested.insert(name);
                }
                _ => {}
            }
        }
        out
    }

    fn unreviewed(&self, candidates: &[String], users: &UserDirectory) -> Vec<String> {
        let mut seen = HashSet::new();
        candidates
            .iter()
            .map(|login| users.resolve(login).to_string())
            .filter(|name| !self.approved.contains(name) && !self.changes_requested.contains(name))
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }
}

/// Requested-reviewer workflow.
///
/// Order of checks: enough approvals, then standing change requests, then
/// nobody asked to review, then waiting on whoever has not reviewed yet. A
/// reviewer who requested changes and has since been re-requested does not
/// count as a standing change request.
#[derive(Debug, Clone)]
pub struct RequestedReviewersPolicy {
    pub minimum_approved: usize,
}

impl ReviewPolicy for RequestedReviewersPolicy {
    fn classify(
        &self,
        pull: &PullRequest,
        reviewers: &[String],
        reviews: &[Review],
        users: &UserDirectory,
    ) -> Classification {
        let outcomes = Outcomes::tally(reviews, users, |login| {
            reviewers.iter().any(|r| r == login)
        });

        if outcomes.approved.len() >= self.minimum_approved {
            return Classification::author(Category::Merge, pull, users);
        }
        if !outcomes.changes_requested.is_empty() {
            return Classification::author(Category::ChangesRequested, pull, users);
        }
        if reviewers.is_empty() && pull.assignees.is_empty() {
            return Classification::author(Category::RequestReviewers, pull, users);
        }

        // Assigned but unrequested: pending, with nobody to mention.
        Classification {
            category: Category::ReviewPending,
            mentions: outcomes.unreviewed(reviewers, users),
        }
    }
}

/// Assignee workflow: assignees are the reviewers and are never "re-requested".
#[derive(Debug, Clone)]
pub struct AssigneesPolicy {
    pub minimum_approved: usize,
}

impl ReviewPolicy for AssigneesPolicy {
    fn classify(
        &self,
        pull: &PullRequest,
        _reviewers: &[String],
        reviews: &[Review],
        users: &UserDirectory,
    ) -> Classification {
        let outcomes = Outcomes::tally(reviews, users, |_| false);

        if outcomes.approved.len() >= self.minimum_approved {
            return Classification::author(Category::Merge, pull, users);
        }
        if !outcomes.changes_requested.is_empty() {
            return Classification::author(Category::ChangesRequested, pull, users);
        }
        if pull.assignees.is_empty() {
            return Classification::author(Category::RequestAssignees, pull, users);
        }
        Classification {
            category: Category::ReviewPending,
            mentions: outcomes.unreviewed(&pull.assignees, users),
        }
    }
}
