use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup console logging for the launcher.
///
/// User-facing resolution output goes to stdout directly; tracing carries
/// the diagnostic trail. `--verbose` switches the filter to debug level.
///
/// # Arguments
/// * `verbose` - If true, use debug level; otherwise use info level
pub fn setup_logging(verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    tracing::debug!("Logging initialized (verbose={})", verbose);
    Ok(())
}
