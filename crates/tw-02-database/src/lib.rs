//! # Database (tw-02)
//!
//! The entry point application code uses to address values by key.
//!
//! Two shapes are supported and behave identically at the boundary:
//!
//! - **Streams**: an ordered list of backends resolved with the first-match
//!   rule of [`CompositeDataStream`](tw_01_datastream::CompositeDataStream).
//! - **Single store**: one layout and its storage block, held directly as a
//!   [`RamDataStream`](tw_01_datastream::RamDataStream).
//!
//! Either way the facade is itself a [`DataStream`], so the typed helpers of
//! [`DataStreamExt`] apply and a database may be nested inside a composite.
//!
//! ```ignore
//! use tw_02_database::Database;
//! use tw_01_datastream::{store_layout, DataStreamExt};
//!
//! store_layout! {
//!     pub enum Keys { Counter: u16 }
//! }
//!
//! let db = Database::from_layout(Keys::layout()?);
//! db.write_scalar(Keys::Counter.key(), 1u16);
//! ```

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod service;

pub use service::{Database, DatabaseShape};
pub use tw_01_datastream::{DataStream, DataStreamExt};
