use std::fmt::{Display, Formatter};

use crate::config::InvocationConfig;
use crate::github::{IssueSnapshot, IssueState};
use crate::toggle::event::CommentEvent;

/// The label mutation that should be performed in reaction to a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionAction {
    AddLabel,
    RemoveLabel,
    NoOp,
}

/// Which gate produced the decision. Every decision carries one, so that a
/// no-op run can be explained from the logs alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    NotApplicableEvent,
    GateLabelAbsent,
    IgnoreLabelPresent,
    IssueClosed,
    PrivilegedComment,
    PrivilegedButExcluded,
    AuthorComment,
    NonAuthorNonPrivileged,
    NonPrivilegedComment,
}

impl DecisionReason {
    pub fn code(&self) -> &'static str {
        match self {
            DecisionReason::NotApplicableEvent => "not-applicable-event",
            DecisionReason::GateLabelAbsent => "gate-label-absent",
            DecisionReason::IgnoreLabelPresent => "ignore-label-present",
            DecisionReason::IssueClosed => "issue-closed",
            DecisionReason::PrivilegedComment => "privileged-comment",
            DecisionReason::PrivilegedButExcluded => "privileged-but-excluded",
            DecisionReason::AuthorComment => "author-comment",
            DecisionReason::NonAuthorNonPrivileged => "non-author-non-privileged",
            DecisionReason::NonPrivilegedComment => "non-privileged-comment",
        }
    }
}

impl Display for DecisionReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Terminal outcome of one invocation. Produced exactly once and then either
/// applied through the issue client or discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub action: DecisionAction,
    pub reason: DecisionReason,
}

impl Decision {
    pub fn no_op(reason: DecisionReason) -> Self {
        Self {
            action: DecisionAction::NoOp,
            reason,
        }
    }

    fn add(reason: DecisionReason) -> Self {
        Self {
            action: DecisionAction::AddLabel,
            reason,
        }
    }

    fn remove(reason: DecisionReason) -> Self {
        Self {
            action: DecisionAction::RemoveLabel,
            reason,
        }
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let action = match self.action {
            DecisionAction::AddLabel => "add-label",
            DecisionAction::RemoveLabel => "remove-label",
            DecisionAction::NoOp => "no-op",
        };
        f.write_fmt(format_args!("{action} ({})", self.reason))
    }
}

/// Computes the label mutation for a single comment event.
///
/// Pure and synchronous; the issue snapshot and the privilege of the actor
/// have to be resolved by the caller beforehand. Gates are evaluated in a
/// fixed order and each of them short-circuits to a no-op:
///
/// 1. only newly created comments are applicable,
/// 2. a configured gate label must be present on the issue,
/// 3. a configured ignore label must be absent from the issue,
/// 4. the issue must be open,
/// 5. a privileged, non-excluded commenter adds the label; everyone else
///    removes it, optionally restricted to the issue author.
///
/// The exclusion list only applies to the privileged branch: an excluded
/// actor who is also the issue author is still evaluated as an author.
pub fn decide(
    event: &CommentEvent,
    config: &InvocationConfig,
    issue: &IssueSnapshot,
    is_privileged_actor: bool,
) -> Decision {
    if !event.is_created() {
        return Decision::no_op(DecisionReason::NotApplicableEvent);
    }

    if let Some(gate_label) = &config.gate_label {
        if !issue.has_label(gate_label) {
            return Decision::no_op(DecisionReason::GateLabelAbsent);
        }
    }

    if let Some(ignore_label) = &config.ignore_label {
        if issue.has_label(ignore_label) {
            return Decision::no_op(DecisionReason::IgnoreLabelPresent);
        }
    }

    if issue.state == IssueState::Closed {
        return Decision::no_op(DecisionReason::IssueClosed);
    }

    if is_privileged_actor {
        return if config.excluded_actors.contains(&event.comment_author.login) {
            Decision::no_op(DecisionReason::PrivilegedButExcluded)
        } else {
            Decision::add(DecisionReason::PrivilegedComment)
        };
    }

    let is_author = event.comment_author.id == issue.author.id;
    if config.remove_only_if_author {
        if is_author {
            Decision::remove(DecisionReason::AuthorComment)
        } else {
            Decision::no_op(DecisionReason::NonAuthorNonPrivileged)
        }
    } else {
        Decision::remove(DecisionReason::NonPrivilegedComment)
    }
}
