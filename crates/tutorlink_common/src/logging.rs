//! Logging utilities shared by the Tutorlink crates.
//!
//! Every binary calls one of the `init*` functions once at startup. Library
//! crates only emit `tracing` events.

use std::str::FromStr;
use tracing::{error, info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tutorlink_config::LoggingConfig;

/// Targets that follow the configured level regardless of `RUST_LOG` defaults.
const WORKSPACE_TARGETS: [&str; 5] = [
    "tutorlink_common",
    "tutorlink_db",
    "tutorlink_scheduling",
    "tutorlink_backend",
    "tower_http",
];

/// Initialize the tracing subscriber at INFO.
///
/// ```
/// use tutorlink_common::logging;
///
/// logging::init();
/// logging::init_with_level(tracing::Level::DEBUG); // no-op, already initialised
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber from the `[logging]` configuration section.
///
/// An unknown level name falls back to INFO with a warning.
pub fn init_from_config(config: &LoggingConfig) {
    match Level::from_str(&config.level) {
        Ok(level) => init_with_level(level),
        Err(_) => {
            init_with_level(Level::INFO);
            warn!("Unknown log level '{}', using INFO", config.level);
        }
    }
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` directives are honoured; the workspace crates are raised to `level`.
/// Calling this twice keeps the first subscriber.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    for target in WORKSPACE_TARGETS {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the original result so it can be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}
