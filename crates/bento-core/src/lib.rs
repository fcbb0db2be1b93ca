#![forbid(unsafe_code)]

//! Grid model for the bento layout builder.
//!
//! Everything here is pure: rectangles, the first-fit placement search,
//! the block record, grid settings, and the pointer-delta math used by
//! drag and resize. State and history live in `bento-runtime`.

pub mod block;
#[cfg(feature = "policy-config")]
pub mod config_loader;
pub mod drag;
pub mod geometry;
pub mod placement;
pub mod settings;

pub use block::{Block, BlockId, BlockShape};
pub use drag::{CELL_UNIT, Corner, drag_target, pixels_to_cells, resize_target};
pub use geometry::{GridRect, Position, is_within_bounds, overlaps};
pub use placement::{clamp_origin, find_placement};
#[cfg(feature = "policy-config")]
pub use config_loader::ConfigError;
pub use settings::GridSettings;
