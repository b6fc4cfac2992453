//! Diagnostic logging via `tracing`.
//!
//! Operator-facing progress lines go through [crate::ui]; this subscriber
//! carries debug detail such as the exact commands spawned.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "pkg_release=debug,info"
    } else {
        "warn"
    }
}

/// Initialize the tracing subscriber on stderr.
///
/// `RUST_LOG` takes precedence over the `verbose` default.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(verbose)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .without_time()
                .compact(),
        )
        .try_init()?;

    Ok(())
}
