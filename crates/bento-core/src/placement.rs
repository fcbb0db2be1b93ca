#![forbid(unsafe_code)]

//! First-fit placement on the grid.
//!
//! [`find_placement`] is the single placement policy used by every
//! operation that introduces a block (add, duplicate, paste). It is pure
//! and deterministic: the same candidate and neighbours always yield the
//! same origin.
//!
//! # Search order
//!
//! ```text
//!   x →  0   1   2   3
//! y 0   [1] [2] [3] [4]     candidates are tried left to right,
//!   1   [5] [6] [7] [8]     top to bottom; the first origin whose
//!   2   ...                 rectangle overlaps nothing wins
//! ```

use crate::geometry::{GridRect, Position};

/// Find an origin for `candidate` that overlaps none of `others`.
///
/// 1. If the candidate's own origin is in bounds and free, it is returned
///    unchanged so a block that is already legal never moves.
/// 2. Otherwise origins are scanned row-major (`y` outer, `x` inner) over
///    every position where the candidate still fits, and the first free
///    one is returned.
/// 3. `None` means no free region of that shape exists.
#[must_use]
pub fn find_placement<'a, I>(
    candidate: &GridRect,
    others: I,
    columns: u16,
    rows: u16,
) -> Option<Position>
where
    I: IntoIterator<Item = &'a GridRect>,
    I::IntoIter: Clone,
{
    let others = others.into_iter();
    let is_free = |rect: &GridRect| others.clone().all(|other| !rect.overlaps(other));

    if candidate.is_within(columns, rows) && is_free(candidate) {
        return Some(candidate.origin());
    }

    if candidate.is_empty() || candidate.width > columns || candidate.height > rows {
        return None;
    }

    let max_x = columns - candidate.width;
    let max_y = rows - candidate.height;
    for y in 0..=max_y {
        for x in 0..=max_x {
            let probe = candidate.at(Position::new(x, y));
            if is_free(&probe) {
                return Some(probe.origin());
            }
        }
    }

    tracing::trace!(
        width = candidate.width,
        height = candidate.height,
        columns,
        rows,
        "no free region for shape"
    );
    None
}

/// Clamp an origin so a `width` x `height` rectangle stays inside the grid.
///
/// Each axis is clamped into `[0, extent - size]`. Sizes larger than the
/// grid clamp to 0 on that axis; callers reject such sizes before asking.
#[must_use]
pub fn clamp_origin(x: i32, y: i32, width: u16, height: u16, columns: u16, rows: u16) -> Position {
    let max_x = i32::from(columns.saturating_sub(width));
    let max_y = i32::from(rows.saturating_sub(height));
    // Both results lie in [0, u16::MAX].
    Position::new(x.clamp(0, max_x) as u16, y.clamp(0, max_y) as u16)
}
