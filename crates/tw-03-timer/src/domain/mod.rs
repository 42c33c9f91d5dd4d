//! # Domain Layer
//!
//! - `entities` - Timer identifiers and per-timer scheduling state

pub mod entities;
