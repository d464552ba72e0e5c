//! Logging setup for the huddle binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crate whose events are always enabled at `default_log_level`.
const SERVER_CRATE: &str = "huddle_server";

/// Build the default filter directive used when `RUST_LOG` is not set.
fn default_directive(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "{}={},{}={}",
        SERVER_CRATE,
        default_log_level,
        binary_name.replace('-', "_"),
        default_log_level
    )
}

/// Initialize the tracing subscriber.
///
/// The filter can be overridden with the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the running binary (e.g., "huddle-server")
/// * `default_log_level` - The level used when `RUST_LOG` is absent (e.g., "info")
///
/// # Examples
///
/// ```no_run
/// use huddle_shared::logger::setup_logger;
///
/// setup_logger("huddle-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    let (filter, source) = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, "RUST_LOG".to_string()),
        Err(_) => {
            let directive = default_directive(binary_name, default_log_level);
            (directive.clone().into(), directive)
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!("Logger for '{}' initialized from {}", binary_name, source);
}
