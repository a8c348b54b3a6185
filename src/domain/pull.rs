use time::OffsetDateTime;

/// An open pull request as seen at fetch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub author: String,
    pub url: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub assignees: Vec<String>,
    pub requested_reviewers: Vec<String>,
}

impl PullRequest {
    /// Titles carrying a "WIP" marker in any letter case are not ready for review.
    pub fn is_wip(&self) -> bool {
        self.title.to_uppercase().contains("WIP")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Other,
}

impl ReviewState {
    pub fn from_api(raw: &str) -> Self {
        match raw {
            "APPROVED" => Self::Approved,
            "CHANGES_REQUESTED" => Self::ChangesRequested,
            "COMMENTED" => Self::Commented,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub author: String,
    pub state: ReviewState,
    pub body: String,
}

impl Review {
    pub fn new(author: impl Into<String>, state: ReviewState) -> Self {
        Self {
            author: author.into(),
            state,
            body: String::new(),
        }
    }
}
