use anyhow::Error;
use tracing::span::Span;
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber. The `debug` input only raises the
/// default verbosity; `RUST_LOG` still takes precedence when set.
pub fn setup_logging(debug: bool) {
    let directives = if debug {
        "label_toggle=debug"
    } else {
        "label_toggle=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives)),
        )
        .with_target(false)
        .init();
}

pub trait LogError {
    fn log_error(&self, error: &Error);
}

impl LogError for Span {
    fn log_error(&self, error: &Error) {
        self.in_scope(|| {
            tracing::error!("Error: {error:?}");
        });
    }
}
