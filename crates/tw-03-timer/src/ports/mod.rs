//! # Ports
//!
//! - `time_source` - Where the scheduler gets the current tick count

pub mod time_source;
