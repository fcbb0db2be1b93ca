#![forbid(unsafe_code)]

//! Pointer-delta to grid-cell conversion for drag and resize.
//!
//! The editing surface reports how far the pointer travelled since the
//! interaction began, in pixels. These helpers turn that into a target
//! rectangle on the grid, always relative to the rectangle captured at
//! the start of the interaction so rounding never accumulates.
//!
//! # Invariants
//!
//! 1. [`drag_target`] keeps the start size and returns an origin inside
//!    the grid whenever the size fits the grid.
//! 2. [`resize_target`] never yields a width or height below 1.
//! 3. Resizing from a west (north) corner keeps the east (south) edge
//!    where it was.

use crate::geometry::{GridRect, Position};
use crate::placement::clamp_origin;

/// Pixels per grid cell on the editing canvas.
pub const CELL_UNIT: u16 = 50;

/// Convert a pixel delta to whole cells.
///
/// Rounds half toward positive infinity, so `-25px` at 50px per cell is
/// 0 cells and `25px` is 1 cell. A non-positive pitch yields 0.
#[must_use]
pub fn pixels_to_cells(delta_px: f64, cell_px: f64) -> i32 {
    if cell_px <= 0.0 || !delta_px.is_finite() {
        return 0;
    }
    // `as` saturates out-of-range floats.
    (delta_px / cell_px + 0.5).floor() as i32
}

/// The corner handle a resize is dragged from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::NorthWest,
        Corner::NorthEast,
        Corner::SouthWest,
        Corner::SouthEast,
    ];

    #[inline]
    pub const fn moves_north(self) -> bool {
        matches!(self, Corner::NorthWest | Corner::NorthEast)
    }

    #[inline]
    pub const fn moves_south(self) -> bool {
        !self.moves_north()
    }

    #[inline]
    pub const fn moves_west(self) -> bool {
        matches!(self, Corner::NorthWest | Corner::SouthWest)
    }

    #[inline]
    pub const fn moves_east(self) -> bool {
        !self.moves_west()
    }
}

/// Where a dragged rectangle lands after moving `dx`, `dy` cells.
#[must_use]
pub fn drag_target(start: &GridRect, dx: i32, dy: i32, columns: u16, rows: u16) -> Position {
    clamp_origin(
        i32::from(start.x).saturating_add(dx),
        i32::from(start.y).saturating_add(dy),
        start.width,
        start.height,
        columns,
        rows,
    )
}

/// The rectangle produced by dragging `corner` of `start` by `dx`, `dy` cells.
#[must_use]
pub fn resize_target(
    start: &GridRect,
    corner: Corner,
    dx: i32,
    dy: i32,
    columns: u16,
    rows: u16,
) -> GridRect {
    let (x, width) = resize_axis(start.x, start.width, dx, columns, corner.moves_west());
    let (y, height) = resize_axis(start.y, start.height, dy, rows, corner.moves_north());
    GridRect::new(x, y, width, height)
}

/// Resize one axis. `from_start` drags the leading edge, otherwise the
/// trailing edge.
fn resize_axis(origin: u16, size: u16, delta: i32, extent: u16, from_start: bool) -> (u16, u16) {
    let origin = i32::from(origin);
    let size = i32::from(size);
    let end = origin + size;
    // Every result below is clamped into [0, u16::MAX].
    if from_start {
        let new_origin = origin.saturating_add(delta).clamp(0, (end - 1).max(0));
        (new_origin as u16, (end - new_origin).max(1) as u16)
    } else {
        let room = (i32::from(extent) - origin).max(1);
        let new_size = size.saturating_add(delta).min(room).max(1);
        (origin as u16, new_size as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_round_half_up() {
        assert_eq!(pixels_to_cells(0.0, 50.0), 0);
        assert_eq!(pixels_to_cells(24.0, 50.0), 0);
        assert_eq!(pixels_to_cells(25.0, 50.0), 1);
        assert_eq!(pixels_to_cells(-25.0, 50.0), 0);
        assert_eq!(pixels_to_cells(-26.0, 50.0), -1);
        assert_eq!(pixels_to_cells(149.0, 50.0), 3);
    }

    #[test]
    fn pixels_with_bad_pitch() {
        assert_eq!(pixels_to_cells(100.0, 0.0), 0);
        assert_eq!(pixels_to_cells(f64::NAN, 50.0), 0);
    }

    #[test]
    fn corner_edges() {
        assert!(Corner::NorthWest.moves_north() && Corner::NorthWest.moves_west());
        assert!(Corner::NorthEast.moves_north() && Corner::NorthEast.moves_east());
        assert!(Corner::SouthWest.moves_south() && Corner::SouthWest.moves_west());
        assert!(Corner::SouthEast.moves_south() && Corner::SouthEast.moves_east());
    }

    #[test]
    fn drag_is_clamped() {
        let start = GridRect::new(2, 2, 2, 2);
        assert_eq!(drag_target(&start, 1, -1, 6, 6), Position::new(3, 1));
        assert_eq!(drag_target(&start, -10, -10, 6, 6), Position::new(0, 0));
        assert_eq!(drag_target(&start, 10, 10, 6, 6), Position::new(4, 4));
    }

    #[test]
    fn south_east_grows_and_shrinks() {
        let start = GridRect::new(1, 1, 2, 2);
        assert_eq!(
            resize_target(&start, Corner::SouthEast, 2, 1, 10, 10),
            GridRect::new(1, 1, 4, 3)
        );
        assert_eq!(
            resize_target(&start, Corner::SouthEast, -5, -5, 10, 10),
            GridRect::new(1, 1, 1, 1)
        );
    }

    #[test]
    fn south_east_stops_at_grid_edge() {
        let start = GridRect::new(6, 6, 2, 2);
        assert_eq!(
            resize_target(&start, Corner::SouthEast, 10, 10, 10, 10),
            GridRect::new(6, 6, 4, 4)
        );
    }

    #[test]
    fn north_west_anchors_far_edges() {
        let start = GridRect::new(4, 4, 2, 2);
        // Grow up-left by one cell.
        assert_eq!(
            resize_target(&start, Corner::NorthWest, -1, -1, 10, 10),
            GridRect::new(3, 3, 3, 3)
        );
        // Shrink past the far edge collapses to one cell at the far edge.
        assert_eq!(
            resize_target(&start, Corner::NorthWest, 5, 5, 10, 10),
            GridRect::new(5, 5, 1, 1)
        );
        // Growing past the grid origin stops at 0 without moving the far edge.
        assert_eq!(
            resize_target(&start, Corner::NorthWest, -9, -9, 10, 10),
            GridRect::new(0, 0, 6, 6)
        );
    }

    #[test]
    fn mixed_corners() {
        let start = GridRect::new(4, 4, 2, 2);
        assert_eq!(
            resize_target(&start, Corner::NorthEast, 1, -1, 10, 10),
            GridRect::new(4, 3, 3, 3)
        );
        assert_eq!(
            resize_target(&start, Corner::SouthWest, -1, 1, 10, 10),
            GridRect::new(3, 4, 3, 3)
        );
    }
}
