//! # Storage Layout
//!
//! Static `key -> (offset, size)` tables describing a contiguous storage block.
//!
//! A layout is built once at startup and never changes afterwards. It can be
//! produced three ways:
//!
//! - [`LayoutBuilder`]: packs fields contiguously in declaration order.
//! - [`store_layout!`](crate::store_layout): declares a key enum and its
//!   packed layout from a `Name: Type` list.
//! - [`StoreLayout::from_json`]: loads a table emitted by an external
//!   generator.
//!
//! Whatever the source, the table is validated: entries must not overlap and
//! must not overflow the address space. Zero-sized entries are allowed and
//! leave their key unclaimed.

use crate::domain::errors::LayoutError;
use serde::{Deserialize, Serialize};
use shared_types::Key;
use std::ops::Range;

/// Byte range of one key inside a storage block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryDescriptor {
    /// Offset of the first byte.
    pub offset: usize,
    /// Width in bytes. Zero leaves the key unclaimed.
    pub size: usize,
}

impl EntryDescriptor {
    /// Create a descriptor.
    #[must_use]
    pub const fn new(offset: usize, size: usize) -> Self {
        Self { offset, size }
    }

    /// One past the last byte.
    ///
    /// Only meaningful for descriptors held by a validated [`StoreLayout`].
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.size
    }

    /// Byte range inside the storage block.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Whether the entry claims no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// Validated, immutable storage layout.
///
/// Key `k` maps to `entries()[k]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<EntryDescriptor>", into = "Vec<EntryDescriptor>")]
pub struct StoreLayout {
    entries: Vec<EntryDescriptor>,
    storage_len: usize,
}

impl StoreLayout {
    /// Largest number of entries the key space can address.
    pub const MAX_ENTRIES: usize = Key::MAX as usize + 1;

    /// Validate an arbitrary descriptor table.
    pub fn from_entries(entries: Vec<EntryDescriptor>) -> Result<Self, LayoutError> {
        if entries.len() > Self::MAX_ENTRIES {
            return Err(LayoutError::TooManyEntries {
                count: entries.len(),
                max: Self::MAX_ENTRIES,
            });
        }

        let mut storage_len = 0;
        let mut occupied: Vec<(Key, EntryDescriptor)> = Vec::with_capacity(entries.len());
        for (key, entry) in (0..=Key::MAX).zip(entries.iter().copied()) {
            let end = entry
                .offset
                .checked_add(entry.size)
                .ok_or(LayoutError::EntryOverflow {
                    key,
                    offset: entry.offset,
                    size: entry.size,
                })?;
            if entry.is_empty() {
                continue;
            }
            storage_len = storage_len.max(end);
            occupied.push((key, entry));
        }

        occupied.sort_by_key(|(_, entry)| entry.offset);
        for pair in occupied.windows(2) {
            if let [(first, a), (second, b)] = pair {
                if a.end() > b.offset {
                    return Err(LayoutError::Overlap {
                        first: *first,
                        second: *second,
                    });
                }
            }
        }

        Ok(Self {
            entries,
            storage_len,
        })
    }

    /// Parse and validate a JSON table: an array of `{"offset", "size"}`.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the table as JSON.
    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Number of declared keys, claimed or not.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// All descriptors in key order.
    #[must_use]
    pub fn entries(&self) -> &[EntryDescriptor] {
        &self.entries
    }

    /// Descriptor for a claimed key.
    #[must_use]
    pub fn entry(&self, key: Key) -> Option<EntryDescriptor> {
        self.entries
            .get(usize::from(key))
            .copied()
            .filter(|entry| !entry.is_empty())
    }

    /// Whether `key` is declared with a non-zero size.
    #[must_use]
    pub fn contains(&self, key: Key) -> bool {
        self.entry(key).is_some()
    }

    /// Width of `key`, or 0 if unclaimed.
    #[must_use]
    pub fn size(&self, key: Key) -> usize {
        self.entry(key).map_or(0, |entry| entry.size)
    }

    /// Bytes needed to hold every entry: the end of the highest-addressed one.
    #[must_use]
    pub fn storage_len(&self) -> usize {
        self.storage_len
    }

    /// Claimed keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        (0..=Key::MAX)
            .zip(self.entries.iter())
            .filter(|(_, entry)| !entry.is_empty())
            .map(|(key, _)| key)
    }
}

impl TryFrom<Vec<EntryDescriptor>> for StoreLayout {
    type Error = LayoutError;

    fn try_from(entries: Vec<EntryDescriptor>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<StoreLayout> for Vec<EntryDescriptor> {
    fn from(layout: StoreLayout) -> Self {
        layout.entries
    }
}

/// Packs fields contiguously, in declaration order, starting at offset 0.
#[derive(Debug, Clone, Default)]
pub struct LayoutBuilder {
    entries: Vec<EntryDescriptor>,
    cursor: usize,
}

impl LayoutBuilder {
    /// Start an empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field of `size` bytes. Its key is the number of fields
    /// declared before it.
    #[must_use]
    pub fn field(mut self, size: usize) -> Self {
        self.entries.push(EntryDescriptor::new(self.cursor, size));
        // An overflowing field is reported by validation in `build`.
        self.cursor = self.cursor.saturating_add(size);
        self
    }

    /// Append a field as wide as `T`.
    #[must_use]
    pub fn field_of<T>(self) -> Self {
        self.field(std::mem::size_of::<T>())
    }

    /// Append an unclaimed key.
    #[must_use]
    pub fn reserved(self) -> Self {
        self.field(0)
    }

    /// Validate and freeze the layout.
    pub fn build(self) -> Result<StoreLayout, LayoutError> {
        StoreLayout::from_entries(self.entries)
    }
}

/// Declare a key enum and its packed layout.
///
/// ```ignore
/// store_layout! {
///     pub enum Keys {
///         Counter: u16,
///         Temperature: f32,
///     }
/// }
///
/// assert_eq!(Keys::Temperature.key(), 1);
/// let layout = Keys::layout()?;
/// assert_eq!(layout.storage_len(), 6);
/// ```
#[macro_export]
macro_rules! store_layout {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident : $ty:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u16)]
        $vis enum $name {
            $($variant),*
        }

        impl $name {
            /// Every key in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// Numeric key of this slot.
            #[must_use]
            pub const fn key(self) -> $crate::Key {
                self as $crate::Key
            }

            /// Packed layout with one entry per key.
            pub fn layout() -> ::std::result::Result<$crate::StoreLayout, $crate::LayoutError> {
                $crate::LayoutBuilder::new()
                    $(.field(::std::mem::size_of::<$ty>()))*
                    .build()
            }
        }

        impl ::std::convert::From<$name> for $crate::Key {
            fn from(key: $name) -> Self {
                key.key()
            }
        }
    };
}
