use crate::github::{GithubUser, IssueNumber};

/// A new activity on an issue comment, parsed out of the trigger payload and
/// passed explicitly into the decision engine (the engine never reads ambient
/// event context).
#[derive(Debug, Clone, PartialEq)]
pub struct CommentEvent {
    /// The sub-action of the `issue_comment` event (`created`, `edited`, ...).
    pub action: String,
    pub issue_number: IssueNumber,
    pub comment_author: GithubUser,
    /// Role association of the comment author with the repository, if the
    /// provider embedded one in the payload (e.g. `MEMBER`, `NONE`).
    pub author_association: Option<String>,
}

impl CommentEvent {
    pub fn is_created(&self) -> bool {
        self.action == "created"
    }
}
