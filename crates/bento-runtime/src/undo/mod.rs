#![forbid(unsafe_code)]

//! Undo/redo history for the builder.
//!
//! The builder records a whole-collection snapshot per committed edit.
//! Undo and redo move a cursor over those snapshots.
//!
//! # Module Structure
//!
//! - [`snapshot_store`]: the cursor-based [`SnapshotStore`]

pub mod snapshot_store;

pub use snapshot_store::{SnapshotConfig, SnapshotStore};
