//! In-memory entity store
//!
//! A `Snapshot` holds one ordered collection per entity kind. Typed callers
//! go through the `Entity` trait; string-keyed callers go through
//! `EntityKind` and JSON values.

mod dynamic;
mod entity;
mod snapshot;

pub use entity::{Entity, EntityKind, Record};
pub use snapshot::{display_number, Snapshot};
