//! # Shared Types Crate
//!
//! Data model primitives shared by the datastream, database and timer
//! subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Key`, `Ticks` and `ChangeArgs` are defined
//!   here and nowhere else.
//! - **Plain bytes at the boundary**: stores move raw byte ranges; typed access
//!   goes through the [`Scalar`] codec, which uses native byte order so that a
//!   typed write is indistinguishable from a raw copy of the value.

pub mod entities;
pub mod scalar;
pub mod ticks;

pub use entities::*;
pub use scalar::Scalar;
pub use ticks::*;
