//! # Domain Errors
//!
//! Errors raised while building a layout or a leaf store.
//!
//! Reads and writes never fail; only construction does.

use shared_types::Key;
use thiserror::Error;

/// Errors that can occur while validating a storage layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// More entries than the key space can address.
    #[error("Too many entries: {count} > {max}")]
    TooManyEntries { count: usize, max: usize },

    /// `offset + size` does not fit in the address space.
    #[error("Entry {key} overflows: offset {offset} + size {size}")]
    EntryOverflow { key: Key, offset: usize, size: usize },

    /// Two non-empty entries share bytes.
    #[error("Entries {first} and {second} overlap")]
    Overlap { first: Key, second: Key },

    /// Caller-provided storage block cannot hold every entry.
    #[error("Storage too small: {provided} bytes provided, {required} required")]
    StorageTooSmall { provided: usize, required: usize },

    /// Layout table could not be parsed.
    #[error("Invalid layout table: {0}")]
    Parse(#[from] serde_json::Error),
}
