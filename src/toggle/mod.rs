use async_trait::async_trait;

use crate::github::api::MutationError;
use crate::github::{GithubRepoName, IssueNumber, IssueSnapshot};
use crate::permissions::ClassificationError;

pub mod event;

mod decision;
mod handlers;

pub use decision::{decide, Decision, DecisionAction, DecisionReason};
pub use handlers::handle_comment_event;

/// Provides functionality for working with the issue tracker of a remote
/// repository. It is behind a trait to allow easier mocking in tests.
#[async_trait]
pub trait IssueClient {
    fn repository(&self) -> &GithubRepoName;

    /// Fetch the current state of the given issue.
    async fn get_issue(&self, number: IssueNumber) -> anyhow::Result<IssueSnapshot>;

    /// Add a label to an issue. Adding an already present label is a no-op.
    async fn add_label(&self, number: IssueNumber, label: &str) -> Result<(), MutationError>;

    /// Remove a label from an issue. Removing an absent label is a no-op.
    async fn remove_label(&self, number: IssueNumber, label: &str) -> Result<(), MutationError>;

    /// Check whether the given user is a member of the repository's
    /// organization. A confirmed non-member is `Ok(false)`, not an error.
    async fn check_org_membership(&self, username: &str) -> Result<bool, ClassificationError>;
}
