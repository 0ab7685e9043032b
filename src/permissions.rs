use std::collections::HashSet;

use async_trait::async_trait;
use http::StatusCode;

use crate::github::GithubUser;
use crate::toggle::IssueClient;

/// The privilege of an actor could not be determined. Distinct from a
/// confirmed "not privileged" answer; the caller decides how to recover.
#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("unexpected status {0} from the membership check")]
    UnexpectedStatus(StatusCode),
    #[error("membership check failed")]
    RequestFailed(#[from] octocrab::Error),
}

/// Resolves whether the commenting actor holds elevated privileges for the
/// repository. Implementations must answer the same boolean contract no
/// matter which membership source they consult.
#[async_trait]
pub trait PrivilegeResolver {
    async fn resolve(
        &self,
        actor: &GithubUser,
        association: Option<&str>,
    ) -> Result<bool, ClassificationError>;
}

/// Resolves privilege with a live org-membership lookup through the API.
pub struct OrgMembershipResolver<'a, Client: IssueClient> {
    client: &'a Client,
}

impl<'a, Client: IssueClient> OrgMembershipResolver<'a, Client> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<Client: IssueClient + Sync> PrivilegeResolver for OrgMembershipResolver<'_, Client> {
    async fn resolve(
        &self,
        actor: &GithubUser,
        _association: Option<&str>,
    ) -> Result<bool, ClassificationError> {
        self.client.check_org_membership(&actor.login).await
    }
}

/// Resolves privilege from the role association string embedded in the event
/// payload, matched case-sensitively against the configured role set. Needs
/// no network round trip.
pub struct AssociationResolver {
    privileged_roles: HashSet<String>,
}

impl AssociationResolver {
    pub fn new(privileged_roles: HashSet<String>) -> Self {
        Self { privileged_roles }
    }
}

#[async_trait]
impl PrivilegeResolver for AssociationResolver {
    async fn resolve(
        &self,
        _actor: &GithubUser,
        association: Option<&str>,
    ) -> Result<bool, ClassificationError> {
        Ok(association
            .map(|role| self.privileged_roles.contains(role))
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor() -> GithubUser {
        GithubUser {
            id: 1,
            login: "commenter".to_string(),
        }
    }

    fn resolver(roles: &[&str]) -> AssociationResolver {
        AssociationResolver::new(roles.iter().map(|r| r.to_string()).collect())
    }

    #[tokio::test]
    async fn qualifying_association_is_privileged() {
        let resolver = resolver(&["OWNER", "MEMBER"]);
        assert!(resolver.resolve(&actor(), Some("MEMBER")).await.unwrap());
    }

    #[tokio::test]
    async fn association_match_is_case_sensitive() {
        let resolver = resolver(&["MEMBER"]);
        assert!(!resolver.resolve(&actor(), Some("member")).await.unwrap());
        assert!(!resolver.resolve(&actor(), Some("NONE")).await.unwrap());
    }

    #[tokio::test]
    async fn missing_association_is_not_privileged() {
        let resolver = resolver(&["MEMBER"]);
        assert!(!resolver.resolve(&actor(), None).await.unwrap());
    }
}
