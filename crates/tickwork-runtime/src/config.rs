//! # Runtime Configuration
//!
//! Intervals and loop limits for the host, read from the environment.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TW_COUNTER_INTERVAL_TICKS` | `1000` | Period of the counter timer |
//! | `TW_BLINK_INTERVAL_TICKS` | `500` | Period of the blink toggle |
//! | `TW_MAX_SLEEP_MS` | `1000` | Upper bound on the sleep between passes |
//! | `TW_RUN_FOR_TICKS` | unset | Stop the loop after this many ticks |

use shared_types::Ticks;
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but does not parse.
    #[error("{name} has invalid value {value:?}")]
    InvalidValue { name: &'static str, value: String },

    /// A period or limit is set to zero.
    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
}

/// Host loop configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Ticks between counter increments.
    pub counter_interval: Ticks,
    /// Ticks between LED toggles.
    pub blink_interval: Ticks,
    /// Longest sleep between scheduler passes, in milliseconds.
    pub max_sleep_ms: u64,
    /// Stop after this many ticks have elapsed; run forever when `None`.
    pub run_for_ticks: Option<Ticks>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            counter_interval: 1000,
            blink_interval: 500,
            max_sleep_ms: 1000,
            run_for_ticks: None,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            counter_interval: positive(&lookup, "TW_COUNTER_INTERVAL_TICKS")?
                .unwrap_or(defaults.counter_interval),
            blink_interval: positive(&lookup, "TW_BLINK_INTERVAL_TICKS")?
                .unwrap_or(defaults.blink_interval),
            max_sleep_ms: parse(&lookup, "TW_MAX_SLEEP_MS")?.unwrap_or(defaults.max_sleep_ms),
            run_for_ticks: positive(&lookup, "TW_RUN_FOR_TICKS")?,
        })
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    match value.trim().parse() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(ConfigError::InvalidValue { name, value }),
    }
}

fn positive(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<Ticks>, ConfigError> {
    match parse::<Ticks>(lookup, name)? {
        Some(0) => Err(ConfigError::Zero { name }),
        other => Ok(other),
    }
}
