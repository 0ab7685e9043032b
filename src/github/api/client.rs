use anyhow::Context;
use async_trait::async_trait;
use http::StatusCode;
use octocrab::models::IssueState as GithubIssueState;
use octocrab::{Error, Octocrab};

use crate::github::api::MutationError;
use crate::github::{GithubRepoName, GithubUser, IssueNumber, IssueSnapshot, IssueState};
use crate::permissions::ClassificationError;
use crate::toggle::IssueClient;

/// Provides access to a single repository's issues using the GitHub API.
pub struct GithubIssueClient {
    pub client: Octocrab,
    // We store the name separately, because the API models have an optional
    // owner, but at this point we must always know the full repository name.
    pub repo_name: GithubRepoName,
}

impl GithubIssueClient {
    pub fn new(client: Octocrab, repo_name: GithubRepoName) -> Self {
        Self { client, repo_name }
    }

    pub fn name(&self) -> &GithubRepoName {
        &self.repo_name
    }

    fn format_issue(&self, number: IssueNumber) -> String {
        format!("{}#{}", self.name(), number)
    }
}

#[async_trait]
impl IssueClient for GithubIssueClient {
    fn repository(&self) -> &GithubRepoName {
        self.name()
    }

    async fn get_issue(&self, number: IssueNumber) -> anyhow::Result<IssueSnapshot> {
        let issue = self
            .client
            .issues(self.name().owner(), self.name().name())
            .get(number.0)
            .await
            .with_context(|| format!("Could not get issue {}", self.format_issue(number)))?;

        Ok(IssueSnapshot {
            number,
            state: match issue.state {
                GithubIssueState::Closed => IssueState::Closed,
                _ => IssueState::Open,
            },
            labels: issue.labels.into_iter().map(|label| label.name).collect(),
            author: GithubUser {
                id: issue.user.id.0,
                login: issue.user.login,
            },
        })
    }

    async fn add_label(&self, number: IssueNumber, label: &str) -> Result<(), MutationError> {
        // Adding a label that is already present keeps the label set
        // unchanged on GitHub's side, so no pre-check is needed.
        self.client
            .issues(self.name().owner(), self.name().name())
            .add_labels(number.0, &[label.to_string()])
            .await
            .map_err(|source| MutationError::AddFailed {
                label: label.to_string(),
                number,
                source,
            })?;
        Ok(())
    }

    async fn remove_label(&self, number: IssueNumber, label: &str) -> Result<(), MutationError> {
        let result = self
            .client
            .issues(self.name().owner(), self.name().name())
            .remove_label(number.0, label)
            .await;
        match result {
            Ok(_) => Ok(()),
            // This error is returned when the label does not exist on the
            // issue. Removal should be idempotent, so we swallow it.
            Err(Error::GitHub { source, .. })
                if source.message.contains("Label does not exist") =>
            {
                tracing::trace!(
                    "Label `{label}` was not present on issue {}",
                    self.format_issue(number)
                );
                Ok(())
            }
            Err(source) => Err(MutationError::RemoveFailed {
                label: label.to_string(),
                number,
                source,
            }),
        }
    }

    async fn check_org_membership(&self, username: &str) -> Result<bool, ClassificationError> {
        // https://docs.github.com/en/rest/orgs/members#check-organization-membership-for-a-user
        // 204 == member, 404 == not a member, 302 == requester may not ask.
        let response = self
            .client
            ._get(format!(
                "/orgs/{}/members/{username}",
                self.name().owner()
            ))
            .await?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(true),
            StatusCode::NOT_FOUND | StatusCode::FOUND => Ok(false),
            status => Err(ClassificationError::UnexpectedStatus(status)),
        }
    }
}
