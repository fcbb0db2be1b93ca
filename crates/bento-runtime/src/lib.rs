#![forbid(unsafe_code)]

//! Editing runtime for the bento layout builder.
//!
//! [`BuilderStore`] is the only way to change a layout. It places new
//! blocks first-fit, rejects drag and resize steps that would overlap,
//! and records committed edits in a linear undo/redo log.
//!
//! ```rust,ignore
//! use bento_runtime::BuilderStore;
//!
//! let mut store = BuilderStore::with_grid(4, 4);
//! let block = store.add(None)?;
//! store.begin_drag(block.id)?;
//! store.update_interaction(100.0, 0.0)?;
//! store.end_interaction()?;
//! store.undo();
//! ```

pub mod config;
pub mod error;
pub mod interaction;
pub mod store;
pub mod undo;

pub use config::BuilderConfig;
pub use error::{EditError, EditResult};
pub use interaction::{Interaction, InteractionKind};
pub use store::{BuilderStore, HistoryPosition, Snapshot, validate_layout};
pub use undo::{SnapshotConfig, SnapshotStore};
