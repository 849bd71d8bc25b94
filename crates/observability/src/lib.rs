//! Process-wide tracing setup.

pub mod subscriber;

pub use subscriber::{DEFAULT_FILTER, LOG_FORMAT_VAR, LogFormat};

/// Initialize tracing for the process.
///
/// Safe to call multiple times; only the first call installs a subscriber.
pub fn init() {
    subscriber::init(LogFormat::from_env());
}
