use std::path::Path;

use anyhow::Context;

use crate::github::{GithubUser, IssueNumber};
use crate::toggle::event::CommentEvent;

/// The name of the webhook event this action reacts to.
pub const ISSUE_COMMENT_EVENT: &str = "issue_comment";

// The hosting runtime writes the full webhook document to a file; only the
// fields below are interesting to the decision.
#[derive(serde::Deserialize, Debug)]
struct CommentPayload {
    action: String,
    issue: IssuePayload,
    comment: CommentBody,
}

#[derive(serde::Deserialize, Debug)]
struct IssuePayload {
    number: u64,
}

#[derive(serde::Deserialize, Debug)]
struct CommentBody {
    user: UserPayload,
    author_association: Option<String>,
}

#[derive(serde::Deserialize, Debug)]
struct UserPayload {
    id: u64,
    login: String,
}

/// Parses a trigger event from the given webhook payload.
/// Returns `None` for events other than issue comments; comment sub-actions
/// other than `created` are kept and gated by the decision engine itself.
pub fn parse_event(event_name: &str, payload: &[u8]) -> anyhow::Result<Option<CommentEvent>> {
    if event_name != ISSUE_COMMENT_EVENT {
        return Ok(None);
    }
    let payload: CommentPayload =
        serde_json::from_slice(payload).context("Cannot parse issue comment payload")?;
    Ok(Some(CommentEvent {
        action: payload.action,
        issue_number: IssueNumber(payload.issue.number),
        comment_author: GithubUser {
            id: payload.comment.user.id,
            login: payload.comment.user.login,
        },
        author_association: payload.comment.author_association,
    }))
}

/// Loads the trigger event from the payload file the runtime points at.
pub fn load_event(event_name: &str, path: &Path) -> anyhow::Result<Option<CommentEvent>> {
    if event_name != ISSUE_COMMENT_EVENT {
        return Ok(None);
    }
    let payload = std::fs::read(path)
        .with_context(|| format!("Cannot read event payload from {}", path.display()))?;
    parse_event(event_name, &payload)
}
