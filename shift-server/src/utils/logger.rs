//! Logging Infrastructure
//!
//! Structured logging setup for development (human readable) and
//! production (JSON lines).

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "shift_server=info,tower_http=info";

/// Initialize the global subscriber. `RUST_LOG` overrides [`DEFAULT_FILTER`].
pub fn init_logger(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false);

    if json {
        subscriber.json().init();
    } else {
        subscriber.with_target(false).init();
    }
}
