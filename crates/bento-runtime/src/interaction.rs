#![forbid(unsafe_code)]

//! Live drag and resize sessions.
//!
//! An [`Interaction`] remembers which block is being manipulated and the
//! rectangle it had when the pointer went down. Every pointer move is
//! resolved against that start rectangle, never against the previous
//! move, so a rejected intermediate step does not skew later ones.
//!
//! # State Machine
//!
//! ```text
//!            begin_drag / begin_resize
//!   Idle ───────────────────────────────► Active(start)
//!    ▲                                      │  update (live, no history)
//!    │  end (commit) / cancel (restore)     │◄─┘
//!    └──────────────────────────────────────┘
//! ```

use bento_core::{BlockId, Corner, GridRect, drag_target, pixels_to_cells, resize_target};

/// What the pointer is doing to the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// Moving the whole block.
    Drag,
    /// Dragging one corner handle.
    Resize(Corner),
}

/// An in-progress drag or resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interaction {
    id: BlockId,
    kind: InteractionKind,
    start: GridRect,
}

impl Interaction {
    pub(crate) fn new(id: BlockId, kind: InteractionKind, start: GridRect) -> Self {
        Self { id, kind, start }
    }

    /// Block being manipulated.
    #[must_use]
    pub fn id(&self) -> BlockId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> InteractionKind {
        self.kind
    }

    /// Geometry of the block when the interaction began.
    #[must_use]
    pub fn start(&self) -> GridRect {
        self.start
    }

    /// Target rectangle for a pointer that moved `dx_px`, `dy_px` pixels
    /// since the interaction began.
    #[must_use]
    pub fn target(
        &self,
        dx_px: f64,
        dy_px: f64,
        cell_px: f64,
        columns: u16,
        rows: u16,
    ) -> GridRect {
        let dx = pixels_to_cells(dx_px, cell_px);
        let dy = pixels_to_cells(dy_px, cell_px);
        match self.kind {
            InteractionKind::Drag => self.start.at(drag_target(&self.start, dx, dy, columns, rows)),
            InteractionKind::Resize(corner) => {
                resize_target(&self.start, corner, dx, dy, columns, rows)
            }
        }
    }
}
