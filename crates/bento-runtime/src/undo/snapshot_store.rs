#![forbid(unsafe_code)]

//! Linear snapshot log with a cursor.
//!
//! [`SnapshotStore`] keeps every committed state as an [`Arc`] in one
//! ordered sequence and a cursor pointing at the current one. Undo and
//! redo only move the cursor; pushing while the cursor is behind the end
//! drops everything after it.
//!
//! # Architecture
//!
//! ```text
//! push(s3)
//! ┌──────────────────────────────────────────────────┐
//! │ Snapshots:  [s0, s1, s2, s3]                      │
//! │ Cursor:                  ^                        │
//! └──────────────────────────────────────────────────┘
//!
//! undo() x2
//! ┌──────────────────────────────────────────────────┐
//! │ Snapshots:  [s0, s1, s2, s3]                      │
//! │ Cursor:          ^                                │
//! └──────────────────────────────────────────────────┘
//!
//! push(s4): s2 and s3 are pruned
//! ┌──────────────────────────────────────────────────┐
//! │ Snapshots:  [s0, s1, s4]                          │
//! │ Cursor:              ^                            │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! # Memory Model
//!
//! Snapshots are shared through `Arc`, so handing the current state to a
//! renderer never copies it. The store enforces a configurable depth
//! limit by evicting the oldest snapshots and shifting the cursor.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Configuration for the snapshot store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Maximum number of snapshots to retain, including the current one.
    /// Oldest snapshots are evicted when this limit is exceeded. Values
    /// below 1 behave as 1.
    pub max_depth: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

impl SnapshotConfig {
    /// Create a new configuration with the given depth limit.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Create an unlimited configuration (for testing).
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }
}

/// A cursor-based undo/redo log of `Arc<T>` snapshots.
///
/// # Invariants
///
/// 1. The log is never empty: it starts with the initial state.
/// 2. `cursor < len()` after every operation.
/// 3. `len() <= max(config.max_depth, 1)`.
/// 4. `push` leaves the cursor on the last snapshot (no redo available).
pub struct SnapshotStore<T> {
    snapshots: VecDeque<Arc<T>>,
    cursor: usize,
    config: SnapshotConfig,
}

impl<T: fmt::Debug> fmt::Debug for SnapshotStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotStore")
            .field("cursor", &self.cursor)
            .field("len", &self.snapshots.len())
            .field("config", &self.config)
            .finish()
    }
}

impl<T> SnapshotStore<T> {
    /// Create a store whose only snapshot is `initial`.
    #[must_use]
    pub fn new(initial: T, config: SnapshotConfig) -> Self {
        let mut snapshots = VecDeque::new();
        snapshots.push_back(Arc::new(initial));
        Self {
            snapshots,
            cursor: 0,
            config,
        }
    }

    // ====================================================================
    // Core Operations
    // ====================================================================

    /// Commit a new snapshot after the cursor, pruning any redo branch.
    pub fn push(&mut self, state: T) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(Arc::new(state));
        self.cursor = self.snapshots.len() - 1;
        self.enforce_depth();
    }

    /// Step the cursor back and return the snapshot it lands on.
    ///
    /// Returns `None` (and leaves the cursor alone) at the first snapshot.
    pub fn undo(&mut self) -> Option<Arc<T>> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(Arc::clone(self.current()))
    }

    /// Step the cursor forward and return the snapshot it lands on.
    ///
    /// Returns `None` (and leaves the cursor alone) at the last snapshot.
    pub fn redo(&mut self) -> Option<Arc<T>> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(Arc::clone(self.current()))
    }

    /// The snapshot under the cursor.
    #[must_use]
    pub fn current(&self) -> &Arc<T> {
        // Invariants 1 and 2 make the index valid.
        &self.snapshots[self.cursor]
    }

    // ====================================================================
    // Query
    // ====================================================================

    /// Check if undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Index of the current snapshot.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total number of snapshots, on both sides of the cursor.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Iterate over all snapshots, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.snapshots.iter()
    }

    // ====================================================================
    // Maintenance
    // ====================================================================

    /// Drop all history and start over from `initial`.
    pub fn reset(&mut self, initial: T) {
        self.snapshots.clear();
        self.snapshots.push_back(Arc::new(initial));
        self.cursor = 0;
    }

    /// Enforce the depth limit by evicting the oldest snapshots.
    fn enforce_depth(&mut self) {
        let limit = self.config.max_depth.max(1);
        while self.snapshots.len() > limit {
            self.snapshots.pop_front();
            self.cursor = self.cursor.saturating_sub(1);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(values: &[i32]) -> SnapshotStore<i32> {
        let mut store = SnapshotStore::new(values[0], SnapshotConfig::unlimited());
        for v in &values[1..] {
            store.push(*v);
        }
        store
    }

    #[test]
    fn new_store_has_initial_snapshot() {
        let store = SnapshotStore::new(0, SnapshotConfig::default());
        assert_eq!(**store.current(), 0);
        assert_eq!(store.cursor(), 0);
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
        assert!(!store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn push_moves_cursor_to_end() {
        let store = store_with(&[0, 1, 2]);
        assert_eq!(store.cursor(), 2);
        assert_eq!(**store.current(), 2);
        assert!(store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn undo_restores_previous() {
        let mut store = store_with(&[0, 1, 2]);
        assert_eq!(*store.undo().unwrap(), 1);
        assert_eq!(**store.current(), 1);
        assert_eq!(store.len(), 3);
        assert!(store.can_redo());
    }

    #[test]
    fn undo_at_start_is_noop() {
        let mut store = store_with(&[0, 1]);
        assert!(store.undo().is_some());
        assert!(store.undo().is_none());
        assert_eq!(store.cursor(), 0);
        assert_eq!(**store.current(), 0);
    }

    #[test]
    fn redo_at_end_is_noop() {
        let mut store = store_with(&[0, 1]);
        assert!(store.redo().is_none());
        assert_eq!(store.cursor(), 1);
    }

    #[test]
    fn redo_restores_undone() {
        let mut store = store_with(&[0, 1, 2]);
        store.undo();
        store.undo();
        assert_eq!(*store.redo().unwrap(), 1);
        assert_eq!(*store.redo().unwrap(), 2);
        assert!(store.redo().is_none());
    }

    #[test]
    fn push_prunes_redo_branch() {
        let mut store = store_with(&[0, 1, 2, 3]);
        store.undo();
        store.undo();
        store.push(4);

        assert_eq!(store.len(), 3);
        assert!(!store.can_redo());
        let seen: Vec<i32> = store.iter().map(|s| **s).collect();
        assert_eq!(seen, vec![0, 1, 4]);
    }

    #[test]
    fn depth_limit_evicts_oldest() {
        let mut store = SnapshotStore::new(1, SnapshotConfig::new(3));
        store.push(2);
        store.push(3);
        store.push(4);

        assert_eq!(store.len(), 3);
        assert_eq!(store.cursor(), 2);
        assert_eq!(*store.undo().unwrap(), 3);
        assert_eq!(*store.undo().unwrap(), 2);
        assert!(store.undo().is_none());
    }

    #[test]
    fn depth_limit_zero_keeps_current() {
        let mut store = SnapshotStore::new(1, SnapshotConfig::new(0));
        store.push(2);
        assert_eq!(store.len(), 1);
        assert_eq!(**store.current(), 2);
        assert!(!store.can_undo());
    }

    #[test]
    fn undo_hands_out_shared_snapshot() {
        let mut store = store_with(&[0, 1]);
        let first = Arc::clone(store.iter().next().unwrap());
        let undone = store.undo().unwrap();
        assert!(Arc::ptr_eq(&undone, &first));
        assert!(Arc::ptr_eq(store.current(), &first));
    }

    #[test]
    fn reset_discards_history() {
        let mut store = store_with(&[0, 1, 2]);
        store.reset(9);
        assert_eq!(store.len(), 1);
        assert_eq!(store.cursor(), 0);
        assert_eq!(**store.current(), 9);
    }

    #[test]
    fn config_default_and_debug() {
        assert_eq!(SnapshotConfig::default().max_depth, 100);
        assert_eq!(SnapshotConfig::unlimited().max_depth, usize::MAX);
        let store = SnapshotStore::new(1, SnapshotConfig::default());
        let s = format!("{store:?}");
        assert!(s.contains("SnapshotStore"));
        assert!(s.contains("cursor"));
    }
}
