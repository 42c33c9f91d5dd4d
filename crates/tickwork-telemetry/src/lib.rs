//! # Tickwork Telemetry
//!
//! Logging and metrics for hosts embedding the Tickwork core.
//!
//! The core crates only emit `tracing` events; this crate installs the
//! subscriber that renders them and owns the Prometheus registry the host
//! updates.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tickwork_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_telemetry(TelemetryConfig::from_env())?;
//!     // Host main loop here
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TW_LOG_LEVEL` | `info` | Log filter (falls back to `RUST_LOG`) |
//! | `TW_JSON_LOGS` | `false` | JSON formatted logs |
//! | `TW_SERVICE_NAME` | `tickwork` | Service name in the startup log |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};
pub use metrics::{
    gather_metrics, register_metrics, MetricsHandle, DATASTREAM_CHANGES, REGISTRY,
    SCHEDULER_RUNS, SCHEDULER_SLEEP_TICKS, TIMER_FIRES,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Register metrics and install the global subscriber.
///
/// Only the first successful call installs a subscriber; later calls fail
/// with [`TelemetryError::SubscriberInit`].
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics = register_metrics()?;
    logging::init_logging(&config)?;

    tracing::info!(
        service = %config.service_name,
        filter = %config.log_level,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        service_name: config.service_name,
        _metrics: metrics,
    })
}

/// Guard that keeps telemetry active for the lifetime of the host.
#[derive(Debug)]
pub struct TelemetryGuard {
    service_name: String,
    _metrics: MetricsHandle,
}

impl TelemetryGuard {
    /// Service name the guard was created for.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry");
    }
}
