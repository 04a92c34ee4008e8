//! JSON logging for the process embedding the core.

use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the host supplies one.
pub const DEFAULT_FILTER: &str = "pharmamap_core=info,pharmamap_api=info,warn";

/// Install the subscriber with [`DEFAULT_FILTER`].
pub fn init() -> bool {
    init_with_filter(None)
}

/// Install a JSON subscriber, one event per line with fields flattened.
///
/// `RUST_LOG` takes precedence over `filter`. An unparsable `filter` falls
/// back to [`DEFAULT_FILTER`]. Returns `false` if a global subscriber was
/// already installed.
pub fn init_with_filter(filter: Option<&str>) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(resolve_filter(filter))
        .json()
        .flatten_event(true)
        .with_thread_names(true)
        .try_init()
        .is_ok()
}

fn resolve_filter(filter: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
