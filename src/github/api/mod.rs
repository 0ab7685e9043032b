use anyhow::Context;
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};

use crate::github::IssueNumber;

mod client;

pub use client::GithubIssueClient;

/// A valid decision was computed but could not be applied to the issue.
/// Reported distinctly from computation errors.
#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    #[error("cannot add label `{label}` to issue #{number}")]
    AddFailed {
        label: String,
        number: IssueNumber,
        #[source]
        source: octocrab::Error,
    },
    #[error("cannot remove label `{label}` from issue #{number}")]
    RemoveFailed {
        label: String,
        number: IssueNumber,
        #[source]
        source: octocrab::Error,
    },
}

/// Creates an API client authenticated with the given token.
pub fn create_client(token: &SecretString) -> anyhow::Result<Octocrab> {
    Octocrab::builder()
        .personal_token(token.expose_secret().clone())
        .build()
        .context("Cannot create GitHub API client")
}
