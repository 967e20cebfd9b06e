//! Log subscriber setup for the `seedtree` binary.
//!
//! The library only emits `tracing` events; nothing is printed unless a
//! subscriber is installed. Events go to stderr so stdout stays pure JSON.
//!
//! - `RUST_LOG` overrides the filter (default `seedtree=info`)
//! - `SEEDTREE_LOG_JSON=1` switches to JSON lines

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};

/// Env var switching log output to JSON lines.
pub const LOG_JSON_ENV: &str = "SEEDTREE_LOG_JSON";

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVE: &str = "seedtree=info";

fn json_requested(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("1") | Some("true"))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber.
///
/// Fails if another subscriber is already set; the caller decides whether
/// that matters.
pub fn init_logging() -> Result<(), TryInitError> {
    let json = json_requested(std::env::var(LOG_JSON_ENV).ok().as_deref());
    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr);

    if json {
        builder.json().finish().try_init()
    } else {
        builder.compact().finish().try_init()
    }
}
