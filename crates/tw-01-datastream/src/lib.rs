//! # Datastream (tw-01)
//!
//! Key-addressed, change-notifying storage backends.
//!
//! ## Architecture
//!
//! ```text
//!                     ┌────────────────────────┐
//!   read/write(key) → │  CompositeDataStream   │  first member that
//!                     │  [A, B, C] in order    │  contains(key) wins
//!                     └──────┬──────────┬──────┘
//!                            ↓          ↓
//!                   ┌──────────────┐  ┌─────────────────────┐
//!                   │ RamDataStream│  │ CompositeDataStream │ (nesting)
//!                   │ layout+block │  │       ...           │
//!                   └──────┬───────┘  └─────────────────────┘
//!                          │ value changed?
//!                          ↓
//!            per-key channel, then all-change channel
//! ```
//!
//! ## Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | First match wins | A key resolves to the first member backend claiming it |
//! | Change-only publish | Equal writes never publish; unequal writes publish exactly once per channel |
//! | Leaf independence | Entries never overlap, so a write to one key never touches another |
//! | Zeroed storage | Every byte of a leaf block reads as zero until written |
//! | Silent unclaimed keys | Operations on unclaimed keys are no-ops, never errors |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Layout descriptors, validation and errors
//! - `ports/` - The `DataStream` capability and typed extension trait
//! - `adapters/` - `RamDataStream`, `CompositeDataStream`, `ChangeRecorder`
//!
//! ## Usage
//!
//! ```ignore
//! use std::rc::Rc;
//! use tw_01_datastream::{on_change, store_layout, DataStream, DataStreamExt, RamDataStream};
//!
//! store_layout! {
//!     pub enum Keys {
//!         Counter: u16,
//!         Enabled: bool,
//!     }
//! }
//!
//! let store = Rc::new(RamDataStream::new(Keys::layout()?));
//! let sub = on_change(|args| println!("key {} changed", args.key));
//! store.subscribe_all(&sub);
//! store.write_scalar(Keys::Counter.key(), 7u16);
//! ```

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod adapters;
pub mod domain;
pub mod ports;

// Re-export key types for convenience
pub use adapters::{ChangeRecorder, CompositeDataStream, RamDataStream, RecordedChange};
pub use domain::errors::LayoutError;
pub use domain::layout::{EntryDescriptor, LayoutBuilder, StoreLayout};
pub use ports::datastream::{
    on_change, ChangeCallback, ChangeChannel, ChangeSubscription, DataStream, DataStreamExt,
};
pub use shared_types::{ChangeArgs, Key, Scalar};
