//! Logging setup
//!
//! Logs go to stderr, keeping stdout for the scaffolding summary. The level
//! comes from `RUST_LOG` when set.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber
///
/// Without `RUST_LOG`, only warnings are shown, or everything from this
/// crate down to `debug` when `verbose` is set.
///
/// # Example
///
/// ```rust,no_run
/// use create_starter_lib::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init(false)?;
/// tracing::info!("starting");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("Failed to install tracing subscriber")
}

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("warn,create_starter_lib=debug")
    } else {
        EnvFilter::new("warn")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert!(default_filter(false).to_string().contains("warn"));
        assert!(default_filter(true).to_string().contains("create_starter_lib=debug"));
    }
}
