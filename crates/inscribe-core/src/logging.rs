//! Logging bootstrap based on `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Default filter used by [`init`].
pub const DEFAULT_FILTER: &str = "info";

/// Install a fmt subscriber with the default filter.
///
/// `RUST_LOG` takes precedence over the default when it is set.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(filter);
}

/// Install a fmt subscriber with an explicit filter directive string,
/// e.g. `"inscribe=debug,inscribe_geometry=trace"`.
///
/// Invalid directives fall back to [`DEFAULT_FILTER`].
pub fn init_with_filter(directives: &str) {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|err| {
        eprintln!("invalid log filter {directives:?}: {err}");
        EnvFilter::new(DEFAULT_FILTER)
    });
    install(filter);
}

fn install(filter: EnvFilter) {
    // A subscriber may already be installed by the host or by another test.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
