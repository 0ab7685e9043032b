use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use derive_builder::Builder;
use http::StatusCode;

use crate::config::{Inputs, InvocationConfig};
use crate::github::api::MutationError;
use crate::github::{GithubRepoName, GithubUser, IssueNumber, IssueSnapshot, IssueState};
use crate::permissions::{ClassificationError, PrivilegeResolver};
use crate::toggle::IssueClient;

pub fn issue_author() -> GithubUser {
    GithubUser {
        id: 101,
        login: "reporter".to_string(),
    }
}

pub fn maintainer() -> GithubUser {
    GithubUser {
        id: 1,
        login: "maintainer".to_string(),
    }
}

pub fn third_party() -> GithubUser {
    GithubUser {
        id: 404,
        login: "passer-by".to_string(),
    }
}

pub fn test_config(overrides: Inputs) -> InvocationConfig {
    let mut inputs = overrides;
    inputs.token.get_or_insert_with(|| "token".to_string());
    inputs.label.get_or_insert_with(|| "awaiting-reply".to_string());
    inputs.repository.get_or_insert_with(|| "foo/bar".to_string());
    InvocationConfig::try_from(inputs).unwrap()
}

#[derive(Builder, Clone)]
#[builder(pattern = "owned")]
pub struct TestIssue {
    #[builder(default = "IssueNumber(1)")]
    pub number: IssueNumber,
    #[builder(default = "IssueState::Open")]
    pub state: IssueState,
    #[builder(default, setter(custom))]
    pub labels: HashSet<String>,
    #[builder(default = "issue_author()")]
    pub author: GithubUser,
}

impl TestIssueBuilder {
    pub fn label(mut self, label: &str) -> Self {
        self.labels
            .get_or_insert_with(Default::default)
            .insert(label.to_string());
        self
    }
}

/// In-memory issue client. Labels behave as a set, mirroring the remote
/// service, and every mutation is recorded for assertions.
pub struct TestIssueClient {
    name: GithubRepoName,
    issue: Mutex<TestIssue>,
    org_members: HashSet<String>,
    issue_fetches: Mutex<u32>,
    pub mutation_log: Mutex<Vec<String>>,
}

impl TestIssueClient {
    pub fn new(issue: TestIssue) -> Self {
        Self {
            name: GithubRepoName::new("foo", "bar"),
            issue: Mutex::new(issue),
            org_members: Default::default(),
            issue_fetches: Mutex::new(0),
            mutation_log: Mutex::new(Vec::new()),
        }
    }

    pub fn with_org_members(mut self, members: &[&str]) -> Self {
        self.org_members = members.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn labels(&self) -> HashSet<String> {
        self.issue.lock().unwrap().labels.clone()
    }

    pub fn issue_fetches(&self) -> u32 {
        *self.issue_fetches.lock().unwrap()
    }

    pub fn check_mutations(&self, expected: &[&str]) {
        assert_eq!(
            *self.mutation_log.lock().unwrap(),
            expected
                .iter()
                .map(|&m| String::from(m))
                .collect::<Vec<_>>()
        );
    }
}

#[async_trait]
impl IssueClient for TestIssueClient {
    fn repository(&self) -> &GithubRepoName {
        &self.name
    }

    async fn get_issue(&self, number: IssueNumber) -> anyhow::Result<IssueSnapshot> {
        *self.issue_fetches.lock().unwrap() += 1;
        let issue = self.issue.lock().unwrap();
        assert_eq!(number, issue.number);
        Ok(IssueSnapshot {
            number: issue.number,
            state: issue.state,
            labels: issue.labels.iter().cloned().collect(),
            author: issue.author.clone(),
        })
    }

    async fn add_label(&self, _number: IssueNumber, label: &str) -> Result<(), MutationError> {
        self.mutation_log
            .lock()
            .unwrap()
            .push(format!("add {label}"));
        self.issue
            .lock()
            .unwrap()
            .labels
            .insert(label.to_string());
        Ok(())
    }

    async fn remove_label(&self, _number: IssueNumber, label: &str) -> Result<(), MutationError> {
        self.mutation_log
            .lock()
            .unwrap()
            .push(format!("remove {label}"));
        self.issue.lock().unwrap().labels.remove(label);
        Ok(())
    }

    async fn check_org_membership(&self, username: &str) -> Result<bool, ClassificationError> {
        Ok(self.org_members.contains(username))
    }
}

/// Resolver stub with a canned answer.
pub struct StubResolver(Result<bool, ()>);

impl StubResolver {
    pub fn privileged() -> Self {
        Self(Ok(true))
    }

    pub fn not_privileged() -> Self {
        Self(Ok(false))
    }

    pub fn failing() -> Self {
        Self(Err(()))
    }
}

#[async_trait]
impl PrivilegeResolver for StubResolver {
    async fn resolve(
        &self,
        _actor: &GithubUser,
        _association: Option<&str>,
    ) -> Result<bool, ClassificationError> {
        self.0.map_err(|_| {
            ClassificationError::UnexpectedStatus(StatusCode::INTERNAL_SERVER_ERROR)
        })
    }
}
