use std::collections::HashSet;

use secrecy::SecretString;

use crate::github::GithubRepoName;

/// Privileged role associations recognized when no `member-association` input
/// is provided.
pub const DEFAULT_PRIVILEGED_ROLES: &[&str] = &["OWNER", "MEMBER", "COLLABORATOR"];

/// Raw inputs of a single invocation, as delivered by the hosting runtime
/// through `INPUT_*`/`GITHUB_*` environment variables. Absent inputs arrive
/// either as `None` or as an empty string; both are treated the same.
#[derive(Debug, Default)]
pub struct Inputs {
    pub token: Option<String>,
    pub label: Option<String>,
    pub ignore_label: Option<String>,
    pub only_if_label: Option<String>,
    pub member_association: Option<String>,
    pub exclude_members: Option<String>,
    pub remove_only_if_author: Option<String>,
    pub membership_source: Option<String>,
    pub repository: Option<String>,
}

/// How the privilege of the commenting actor is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipSource {
    /// Live lookup of org membership through the GitHub API.
    OrgMembership,
    /// The `author_association` role string embedded in the comment payload.
    CommentAssociation,
}

/// Validated configuration of a single invocation.
/// Loaded once, before any network call, and immutable afterwards.
pub struct InvocationConfig {
    pub repo: GithubRepoName,
    pub token: SecretString,
    /// The single label this action adds or removes.
    pub toggle_label: String,
    /// If set, the issue must carry this label for any action to happen.
    pub gate_label: Option<String>,
    /// If set, its presence on the issue suppresses all action.
    pub ignore_label: Option<String>,
    pub privileged_roles: HashSet<String>,
    pub excluded_actors: HashSet<String>,
    pub remove_only_if_author: bool,
    pub membership_source: MembershipSource,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Toggling label is required")]
    MissingLabel,
    #[error("token is required")]
    MissingToken,
    #[error("GITHUB_REPOSITORY is not set")]
    MissingRepository,
    #[error("invalid repository `{0}`, expected `owner/name`")]
    InvalidRepository(String),
    #[error("invalid membership-source `{0}`, expected `org` or `association`")]
    InvalidMembershipSource(String),
    #[error("GITHUB_EVENT_PATH is not set")]
    MissingEventPayload,
}

impl TryFrom<Inputs> for InvocationConfig {
    type Error = ConfigError;

    fn try_from(inputs: Inputs) -> Result<Self, ConfigError> {
        let toggle_label = non_empty(inputs.label).ok_or(ConfigError::MissingLabel)?;
        let token = non_empty(inputs.token).ok_or(ConfigError::MissingToken)?;
        let repository = non_empty(inputs.repository).ok_or(ConfigError::MissingRepository)?;
        let repo = parse_repository(&repository)?;

        let privileged_roles = match non_empty(inputs.member_association) {
            Some(roles) => split_list(&roles),
            None => DEFAULT_PRIVILEGED_ROLES
                .iter()
                .map(|role| role.to_string())
                .collect(),
        };

        let membership_source = match non_empty(inputs.membership_source) {
            None => MembershipSource::CommentAssociation,
            Some(source) => match source.as_str() {
                "org" => MembershipSource::OrgMembership,
                "association" => MembershipSource::CommentAssociation,
                _ => return Err(ConfigError::InvalidMembershipSource(source)),
            },
        };

        Ok(Self {
            repo,
            token: token.into(),
            toggle_label,
            gate_label: non_empty(inputs.only_if_label),
            ignore_label: non_empty(inputs.ignore_label),
            privileged_roles,
            excluded_actors: inputs
                .exclude_members
                .map(|members| split_list(&members))
                .unwrap_or_default(),
            remove_only_if_author: parse_bool(inputs.remove_only_if_author.as_deref()),
            membership_source,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn split_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(|item| item.to_string())
        .collect()
}

fn parse_bool(raw: Option<&str>) -> bool {
    match raw {
        Some(value) => {
            let value = value.trim();
            value.eq_ignore_ascii_case("true") || value == "1"
        }
        None => false,
    }
}

fn parse_repository(repository: &str) -> Result<GithubRepoName, ConfigError> {
    match repository.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() => {
            Ok(GithubRepoName::new(owner, name))
        }
        _ => Err(ConfigError::InvalidRepository(repository.to_string())),
    }
}
