//! # Domain Layer
//!
//! Pure layout logic: no channels, no storage, no I/O.
//!
//! ## Modules
//!
//! - `layout` - Entry descriptors, validated layouts, packed builder, `store_layout!`
//! - `errors` - Layout validation errors

pub mod errors;
pub mod layout;
