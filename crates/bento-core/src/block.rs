#![forbid(unsafe_code)]

//! Blocks: the rectangles a user places on the grid.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{GridRect, Position};

/// Opaque, never-reused identifier of a block.
///
/// Ids are handed out by the store that owns the collection; a removed
/// block's id is never given to another block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u64);

impl BlockId {
    /// Create a block ID from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Width and height of a block, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockShape {
    pub width: u16,
    pub height: u16,
}

impl Default for BlockShape {
    fn default() -> Self {
        Self {
            width: 2,
            height: 2,
        }
    }
}

/// A titled rectangle placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub title: String,
}

impl Block {
    /// Create a block from its id, geometry, and title.
    pub fn new(id: BlockId, rect: GridRect, title: impl Into<String>) -> Self {
        Self {
            id,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            title: title.into(),
        }
    }

    /// The block's footprint on the grid.
    #[inline]
    pub const fn rect(&self) -> GridRect {
        GridRect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub const fn origin(&self) -> Position {
        Position::new(self.x, self.y)
    }

    #[inline]
    pub const fn shape(&self) -> BlockShape {
        BlockShape {
            width: self.width,
            height: self.height,
        }
    }

    /// Replace the block's geometry, keeping its id and title.
    pub fn set_rect(&mut self, rect: GridRect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }
}
