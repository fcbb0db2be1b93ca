#![forbid(unsafe_code)]

//! Geometric primitives on the builder grid.
//!
//! All coordinates are whole grid cells with the origin at the top-left
//! corner. Edges are half-open: a rectangle covers columns
//! `x..x + width` and rows `y..y + height`, so two rectangles that only
//! share an edge or a corner do not overlap.

use serde::{Deserialize, Serialize};

/// Top-left origin of a rectangle, in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridRect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl GridRect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Origin of the rectangle.
    #[inline]
    pub const fn origin(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Same size, moved to `origin`.
    #[inline]
    #[must_use]
    pub const fn at(&self, origin: Position) -> Self {
        Self::new(origin.x, origin.y, self.width, self.height)
    }

    /// Right edge (exclusive).
    ///
    /// Widened to `u32` so a rectangle hugging `u16::MAX` is still
    /// reported correctly against the grid bounds.
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x as u32 + self.width as u32
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y as u32 + self.height as u32
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the interiors of the two rectangles intersect.
    ///
    /// Separating-axis test: the rectangles are disjoint iff one lies
    /// entirely at or past an edge of the other on some axis. Shared
    /// edges and corners do not count as overlap.
    #[inline]
    pub const fn overlaps(&self, other: &GridRect) -> bool {
        !(self.right() <= other.x as u32
            || other.right() <= self.x as u32
            || self.bottom() <= other.y as u32
            || other.bottom() <= self.y as u32)
    }

    /// Whether the rectangle fits inside a `columns` x `rows` grid.
    ///
    /// The lower bounds hold by construction since coordinates are
    /// unsigned.
    #[inline]
    pub const fn is_within(&self, columns: u16, rows: u16) -> bool {
        self.right() <= columns as u32 && self.bottom() <= rows as u32
    }
}

/// Whether two rectangles overlap. See [`GridRect::overlaps`].
#[inline]
pub fn overlaps(a: &GridRect, b: &GridRect) -> bool {
    a.overlaps(b)
}

/// Whether `rect` lies inside a `columns` x `rows` grid.
#[inline]
pub fn is_within_bounds(rect: &GridRect, columns: u16, rows: u16) -> bool {
    rect.is_within(columns, rows)
}
