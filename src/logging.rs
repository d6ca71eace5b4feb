use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing on stderr, leaving stdout for command output.
/// RUST_LOG overrides the default filter.
pub fn init_tracing(verbose: bool, json: bool) {
    let default = if verbose { "azadmin=debug" } else { "azadmin=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
