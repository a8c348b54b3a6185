use crate::domain::pull::PullRequest;

/// Drop work-in-progress pull requests, keeping API order for the rest.
pub fn active_pulls(pulls: Vec<PullRequest>) -> Vec<PullRequest> {
    pulls.into_iter().filter(|pr| !pr.is_wip()).collect()
}
