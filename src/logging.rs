//! Diagnostic tracing setup.
//!
//! User-facing output goes through [crate::ui::Logger]; this only covers the
//! `tracing` events emitted by the repository adapter and the workflow.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::ui::Verbosity;

/// Default filter directive for a verbosity, used when `RUST_LOG` is unset
pub fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Debug => "git_semtag=debug,warn",
        Verbosity::Normal => "warn",
    }
}

/// Install the global subscriber. Call once, at startup.
///
/// `RUST_LOG` takes precedence over the verbosity derived from `--debug`.
/// Calling it again is a no-op.
pub fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
