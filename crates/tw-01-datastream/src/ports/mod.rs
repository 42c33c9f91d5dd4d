//! # Ports
//!
//! - `datastream` - The storage capability every backend implements

pub mod datastream;
