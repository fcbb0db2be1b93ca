#![forbid(unsafe_code)]

//! Rejection reasons for builder edits.
//!
//! Every variant means "operation not applied": when a store method
//! returns `Err`, neither the live collection nor the history changed.

use bento_core::BlockId;

/// Why an edit was not applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// No free region of this shape exists on the grid.
    #[error("no space available for a {width}x{height} block")]
    PlacementUnavailable { width: u16, height: u16 },
    /// The requested geometry overlaps another block.
    #[error("block {id} would overlap block {other}")]
    Collision { id: BlockId, other: BlockId },
    /// The requested geometry leaves the grid.
    #[error("block {id} would leave the grid")]
    OutOfBounds { id: BlockId },
    /// Width or height is zero or larger than the grid.
    #[error("invalid block size {width}x{height}")]
    InvalidSize { width: u16, height: u16 },
    /// No block with this id exists.
    #[error("block {0} not found")]
    UnknownBlock(BlockId),
    /// A loaded layout uses the same id twice.
    #[error("block id {0} is used more than once")]
    DuplicateId(BlockId),
    /// Every block id up to this one has been handed out.
    #[error("no block ids left after {0}")]
    IdExhausted(BlockId),
    /// Paste was requested before anything was copied.
    #[error("clipboard is empty")]
    ClipboardEmpty,
    /// The call needs an active drag or resize.
    #[error("no drag or resize in progress")]
    NoActiveInteraction,
    /// A drag or resize on this block is already in progress.
    #[error("interaction on block {0} already in progress")]
    InteractionInProgress(BlockId),
    /// Settings failed validation.
    #[error("invalid settings: {}", .0.join("; "))]
    InvalidSettings(Vec<String>),
    /// New grid dimensions would push this block out of bounds.
    #[error("block {id} does not fit the new grid")]
    SettingsConflict { id: BlockId },
}

impl EditError {
    /// Whether the rejection should be surfaced to the user.
    ///
    /// Collisions and bounds rejections happen continuously during a drag
    /// and are absorbed silently; everything else is worth a notice.
    #[must_use]
    pub fn is_user_visible(&self) -> bool {
        !matches!(
            self,
            Self::Collision { .. } | Self::OutOfBounds { .. } | Self::InvalidSize { .. }
        )
    }
}

/// Result alias for store operations.
pub type EditResult<T> = Result<T, EditError>;
