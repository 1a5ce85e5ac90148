pub mod config;

pub mod setup;
pub use setup::{setup, LoggerError, TelemetryGuard};

pub use tracing::{debug, error, event as log, info, warn};
