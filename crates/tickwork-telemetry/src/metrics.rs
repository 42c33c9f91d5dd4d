//! Prometheus metrics for Tickwork hosts.
//!
//! All metrics follow the naming convention: `tw_<component>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., timer_fires_total)
//! - **Gauge**: Value that can go up or down (e.g., scheduler_sleep_ticks)

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // DATASTREAM METRICS
    // =========================================================================

    /// Change notifications observed by the host
    pub static ref DATASTREAM_CHANGES: IntCounter = IntCounter::new(
        "tw_datastream_changes_total",
        "Total number of value changes published by datastream backends"
    ).expect("metric creation failed");

    // =========================================================================
    // SCHEDULER METRICS
    // =========================================================================

    /// Timer callbacks invoked
    pub static ref TIMER_FIRES: IntCounter = IntCounter::new(
        "tw_timer_fires_total",
        "Total number of timer callbacks invoked"
    ).expect("metric creation failed");

    /// Scheduler passes
    pub static ref SCHEDULER_RUNS: IntCounter = IntCounter::new(
        "tw_scheduler_runs_total",
        "Total number of timer scheduler passes"
    ).expect("metric creation failed");

    /// Sleep reported by the last pass
    pub static ref SCHEDULER_SLEEP_TICKS: IntGauge = IntGauge::new(
        "tw_scheduler_sleep_ticks",
        "Ticks until the next timer expiration, as reported by the last pass"
    ).expect("metric creation failed");
}

/// Proof that the metrics are registered.
#[derive(Debug, Clone, Copy)]
pub struct MetricsHandle {
    _private: (),
}

/// Register all metrics with the global registry.
///
/// Calling it again is harmless.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(DATASTREAM_CHANGES.clone()),
        Box::new(TIMER_FIRES.clone()),
        Box::new(SCHEDULER_RUNS.clone()),
        Box::new(SCHEDULER_SLEEP_TICKS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle { _private: () })
}

/// Encode all registered metrics in Prometheus text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
