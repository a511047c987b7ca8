//! Diagnostic logging to stderr.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "backtail=info";
const VERBOSE_DIRECTIVE: &str = "backtail=debug";

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// default level; `verbose` raises this crate to `debug` either way.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    if verbose {
        filter = filter.add_directive(VERBOSE_DIRECTIVE.parse()?);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install logger: {}", err))
}
