//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Default filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info";

/// Initialize the logging system with [`DEFAULT_FILTER`]
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over `filter` when set.
pub fn init_with_filter(filter: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .init();
}
