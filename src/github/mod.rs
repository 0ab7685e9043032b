//! Contains definitions of common types (issue, user, repository name) needed
//! for working with the GitHub issue that triggered the invocation.
use std::fmt::{Display, Formatter};

pub mod api;
pub mod event;

/// Unique identifier of a GitHub repository
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct GithubRepoName {
    owner: String,
    name: String,
}

impl GithubRepoName {
    pub fn new(owner: &str, name: &str) -> Self {
        Self {
            owner: owner.to_lowercase(),
            name: name.to_lowercase(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for GithubRepoName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}/{}", self.owner, self.name))
    }
}

/// Identity of a GitHub user, as supplied by the event payload.
/// Authorship comparisons use the numeric id, exclusion lists use the login.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct GithubUser {
    pub id: u64,
    pub login: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IssueNumber(pub u64);

impl From<u64> for IssueNumber {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for IssueNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <u64 as Display>::fmt(&self.0, f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IssueState {
    Open,
    Closed,
}

/// State of the triggering issue, fetched fresh from the API for every
/// invocation. Never cached; the process lives for a single event.
#[derive(Debug, Clone)]
pub struct IssueSnapshot {
    pub number: IssueNumber,
    pub state: IssueState,
    pub labels: Vec<String>,
    pub author: GithubUser,
}

impl IssueSnapshot {
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}
