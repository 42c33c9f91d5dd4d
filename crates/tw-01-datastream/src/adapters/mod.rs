//! # Adapters Module
//!
//! Concrete backends and helpers built on the `DataStream` port.
//!
//! ## Modules
//!
//! - `ram`: Leaf store over a zeroed byte block
//! - `composite`: First-match multiplexer over other backends
//! - `recorder`: Subscription that logs every change it receives

pub mod composite;
pub mod ram;
pub mod recorder;

pub use composite::CompositeDataStream;
pub use ram::RamDataStream;
pub use recorder::{ChangeRecorder, RecordedChange};
