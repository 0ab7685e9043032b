use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use label_toggle::config::{ConfigError, Inputs, InvocationConfig, MembershipSource};
use label_toggle::github::api::{create_client, GithubIssueClient};
use label_toggle::github::event::{load_event, ISSUE_COMMENT_EVENT};
use label_toggle::permissions::{AssociationResolver, OrgMembershipResolver, PrivilegeResolver};
use label_toggle::toggle::{handle_comment_event, Decision, DecisionReason};
use label_toggle::utils::logging::setup_logging;

/// Toggles a label on an issue depending on who commented on it last.
/// All options are also read from the `INPUT_*` environment variables set by
/// the hosting runtime.
#[derive(clap::Parser)]
struct Opts {
    /// Token used to authenticate to the GitHub API.
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// The label to toggle.
    #[arg(long, env = "INPUT_LABEL")]
    label: Option<String>,

    /// Do nothing when this label is present on the issue.
    #[arg(long, env = "INPUT_IGNORE-LABEL")]
    ignore_label: Option<String>,

    /// Only act when this label is present on the issue.
    #[arg(long, env = "INPUT_ONLY-IF-LABEL")]
    only_if_label: Option<String>,

    /// Comma-separated role associations treated as privileged.
    #[arg(long, env = "INPUT_MEMBER-ASSOCIATION")]
    member_association: Option<String>,

    /// Comma-separated logins that never trigger the add branch.
    #[arg(long, env = "INPUT_EXCLUDE-MEMBERS")]
    exclude_members: Option<String>,

    /// Only remove the label when the issue author commented.
    #[arg(long, env = "INPUT_REMOVE-ONLY-IF-AUTHOR")]
    remove_only_if_author: Option<String>,

    /// Where privilege is resolved from: `org` or `association`.
    #[arg(long, env = "INPUT_MEMBERSHIP-SOURCE")]
    membership_source: Option<String>,

    /// Enable debug output.
    #[arg(long, env = "INPUT_DEBUG")]
    debug: Option<String>,

    /// `owner/name` of the repository the event belongs to.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Name of the event that triggered this invocation.
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    event_name: Option<String>,

    /// Path to the JSON payload of the triggering event.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,
}

async fn run(opts: Opts, config: InvocationConfig) -> anyhow::Result<()> {
    let event = match opts.event_name.as_deref() {
        Some(event_name) if event_name == ISSUE_COMMENT_EVENT => {
            let path = opts
                .event_path
                .as_deref()
                .ok_or(ConfigError::MissingEventPayload)?;
            load_event(event_name, path)?
        }
        _ => None,
    };

    let Some(event) = event else {
        tracing::info!(
            "Decision: {}",
            Decision::no_op(DecisionReason::NotApplicableEvent)
        );
        return Ok(());
    };

    let client = GithubIssueClient::new(create_client(&config.token)?, config.repo.clone());
    let resolver: Box<dyn PrivilegeResolver + '_> = match config.membership_source {
        MembershipSource::OrgMembership => Box::new(OrgMembershipResolver::new(&client)),
        MembershipSource::CommentAssociation => {
            Box::new(AssociationResolver::new(config.privileged_roles.clone()))
        }
    };

    let decision = handle_comment_event(&client, resolver.as_ref(), &config, &event).await?;
    tracing::info!("Decision: {decision}");
    Ok(())
}

fn try_main(opts: Opts) -> anyhow::Result<()> {
    // Configuration problems must surface before any network call is made.
    let config = InvocationConfig::try_from(Inputs {
        token: opts.token.clone(),
        label: opts.label.clone(),
        ignore_label: opts.ignore_label.clone(),
        only_if_label: opts.only_if_label.clone(),
        member_association: opts.member_association.clone(),
        exclude_members: opts.exclude_members.clone(),
        remove_only_if_author: opts.remove_only_if_author.clone(),
        membership_source: opts.membership_source.clone(),
        repository: opts.repository.clone(),
    })?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Cannot build tokio runtime")?;
    runtime.block_on(run(opts, config))
}

fn main() {
    let opts = Opts::parse();
    let debug = opts
        .debug
        .as_deref()
        .map(|value| !value.trim().is_empty() && !value.trim().eq_ignore_ascii_case("false"))
        .unwrap_or(false);
    setup_logging(debug);

    if let Err(error) = try_main(opts) {
        eprintln!("Error: {error:?}");
        std::process::exit(1);
    }
}
