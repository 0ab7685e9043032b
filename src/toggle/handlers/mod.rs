use tracing::Instrument;

use crate::config::InvocationConfig;
use crate::permissions::PrivilegeResolver;
use crate::toggle::decision::{decide, Decision, DecisionAction, DecisionReason};
use crate::toggle::event::CommentEvent;
use crate::toggle::IssueClient;
use crate::utils::logging::LogError;

/// Executes a single comment event: fetches the issue, resolves the privilege
/// of the commenter, computes the decision and applies the resulting label
/// mutation (if any).
pub async fn handle_comment_event<Client: IssueClient>(
    client: &Client,
    resolver: &dyn PrivilegeResolver,
    config: &InvocationConfig,
    event: &CommentEvent,
) -> anyhow::Result<Decision> {
    if !event.is_created() {
        tracing::debug!(
            "Ignoring `{}` comment action, only newly created comments are handled",
            event.action
        );
        return Ok(Decision::no_op(DecisionReason::NotApplicableEvent));
    }

    let span = tracing::info_span!(
        "Comment",
        issue = format!("{}#{}", client.repository(), event.issue_number),
        author = event.comment_author.login
    );
    match evaluate_comment(client, resolver, config, event)
        .instrument(span.clone())
        .await
    {
        Ok(decision) => Ok(decision),
        Err(error) => {
            span.log_error(&error);
            Err(error)
        }
    }
}

async fn evaluate_comment<Client: IssueClient>(
    client: &Client,
    resolver: &dyn PrivilegeResolver,
    config: &InvocationConfig,
    event: &CommentEvent,
) -> anyhow::Result<Decision> {
    // The two lookups are independent, so they are issued together.
    let (issue, privilege) = futures::join!(
        client.get_issue(event.issue_number),
        resolver.resolve(&event.comment_author, event.author_association.as_deref())
    );
    let issue = issue?;

    let is_privileged_actor = match privilege {
        Ok(privileged) => privileged,
        Err(error) => {
            // A failed classification is not a confirmed negative, but the
            // actor's privilege could not be proven, so none is assumed.
            tracing::warn!(
                "Could not classify actor `{}`, assuming no privilege: {error:?}",
                event.comment_author.login
            );
            false
        }
    };

    let decision = decide(event, config, &issue, is_privileged_actor);
    match decision.action {
        DecisionAction::AddLabel => {
            tracing::info!("Adding label `{}` ({})", config.toggle_label, decision.reason);
            client.add_label(issue.number, &config.toggle_label).await?;
        }
        DecisionAction::RemoveLabel => {
            tracing::info!(
                "Removing label `{}` ({})",
                config.toggle_label,
                decision.reason
            );
            client
                .remove_label(issue.number, &config.toggle_label)
                .await?;
        }
        DecisionAction::NoOp => {
            tracing::debug!("No action taken ({})", decision.reason);
        }
    }
    Ok(decision)
}
