//! # Tickwork Runtime
//!
//! Counts ticks into the database and blinks a virtual LED until
//! `TW_RUN_FOR_TICKS` elapse (or forever when unset).
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (logging + metrics)
//! 2. Load `RuntimeConfig` from the environment
//! 3. Wire the database, timers and blink machine
//! 4. Run the cooperative main loop
//! 5. Log the final metrics

use std::rc::Rc;

use anyhow::{Context, Result};
use tickwork_runtime::{Runtime, RuntimeConfig};
use tickwork_telemetry::{gather_metrics, init_telemetry, TelemetryConfig};
use tracing::info;
use tw_03_timer::MonotonicTimeSource;

fn main() -> Result<()> {
    let _telemetry =
        init_telemetry(TelemetryConfig::from_env()).context("failed to initialize telemetry")?;

    let config = RuntimeConfig::from_env().context("invalid runtime configuration")?;
    info!(?config, "Starting Tickwork runtime");

    let runtime = Runtime::new(config, Rc::new(MonotonicTimeSource::new()))
        .context("failed to build the application database")?;
    let passes = runtime.run();

    info!(
        passes,
        counter = runtime.counter(),
        toggles = runtime.toggles(),
        "Tickwork runtime stopped"
    );

    let metrics = gather_metrics().context("failed to render metrics")?;
    info!("Final metrics:\n{}", metrics);

    Ok(())
}
