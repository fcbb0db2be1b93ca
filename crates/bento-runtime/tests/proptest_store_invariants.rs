#![forbid(unsafe_code)]

//! Property tests for [`BuilderStore`] invariants.
//!
//! Validates:
//! - No two blocks overlap after any operation sequence.
//! - Every block stays inside the grid, live and committed.
//! - Ids stay unique.
//! - Failed operations leave state untouched.
//! - N undos followed by N redos restore the final committed state.
//! - A commit after undo makes the old redo target unreachable.

use std::collections::HashSet;

use bento_core::{Block, BlockId, Corner, is_within_bounds, overlaps};
use bento_runtime::{BuilderStore, HistoryPosition};
use proptest::prelude::*;

// ============================================================================
// Strategy helpers
// ============================================================================

/// Operations that can be performed on a BuilderStore. Block targets are
/// indices into the current collection, taken modulo its length.
#[derive(Debug, Clone)]
enum Op {
    Add,
    Duplicate(usize),
    Copy(usize),
    Paste,
    Remove(usize),
    MoveTo(usize, u16, u16),
    ResizeTo(usize, u16, u16, u16, u16),
    Nudge(usize, i32, i32),
    Grow(usize, i32, i32),
    Drag(usize, f64, f64),
    Resize(usize, usize, f64, f64),
    Commit,
    Undo,
    Redo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let idx = 0usize..8;
    prop_oneof![
        4 => Just(Op::Add),
        1 => idx.clone().prop_map(Op::Duplicate),
        1 => idx.clone().prop_map(Op::Copy),
        1 => Just(Op::Paste),
        1 => idx.clone().prop_map(Op::Remove),
        3 => (idx.clone(), 0u16..10, 0u16..10).prop_map(|(i, x, y)| Op::MoveTo(i, x, y)),
        2 => (idx.clone(), 0u16..6, 0u16..6, 0u16..10, 0u16..10)
            .prop_map(|(i, w, h, x, y)| Op::ResizeTo(i, w, h, x, y)),
        2 => (idx.clone(), -2i32..=2, -2i32..=2).prop_map(|(i, dx, dy)| Op::Nudge(i, dx, dy)),
        1 => (idx.clone(), -2i32..=2, -2i32..=2).prop_map(|(i, dw, dh)| Op::Grow(i, dw, dh)),
        2 => (idx.clone(), -300.0f64..300.0, -300.0f64..300.0)
            .prop_map(|(i, dx, dy)| Op::Drag(i, dx, dy)),
        2 => (idx.clone(), 0usize..4, -300.0f64..300.0, -300.0f64..300.0)
            .prop_map(|(i, c, dx, dy)| Op::Resize(i, c, dx, dy)),
        2 => Just(Op::Commit),
        2 => Just(Op::Undo),
        2 => Just(Op::Redo),
    ]
}

fn ops_strategy(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 1..=max_len)
}

fn pick(store: &BuilderStore, i: usize) -> Option<BlockId> {
    let blocks = store.blocks();
    if blocks.is_empty() {
        None
    } else {
        Some(blocks[i % blocks.len()].id)
    }
}

fn apply(store: &mut BuilderStore, op: &Op) {
    match *op {
        Op::Add => {
            let _ = store.add(None);
        }
        Op::Duplicate(i) => {
            if let Some(id) = pick(store, i) {
                let _ = store.duplicate(id);
            }
        }
        Op::Copy(i) => {
            if let Some(id) = pick(store, i) {
                let _ = store.copy(id);
            }
        }
        Op::Paste => {
            let _ = store.paste();
        }
        Op::Remove(i) => {
            if let Some(id) = pick(store, i) {
                store.remove(id);
            }
        }
        Op::MoveTo(i, x, y) => {
            if let Some(id) = pick(store, i) {
                let _ = store.move_to(id, x, y);
            }
        }
        Op::ResizeTo(i, w, h, x, y) => {
            if let Some(id) = pick(store, i) {
                let _ = store.resize_to(id, w, h, x, y);
            }
        }
        Op::Nudge(i, dx, dy) => {
            if let Some(id) = pick(store, i) {
                let _ = store.nudge(id, dx, dy);
            }
        }
        Op::Grow(i, dw, dh) => {
            if let Some(id) = pick(store, i) {
                let _ = store.grow(id, dw, dh);
            }
        }
        Op::Drag(i, dx, dy) => {
            if let Some(id) = pick(store, i) {
                store.begin_drag(id).unwrap();
                let _ = store.update_interaction(dx / 2.0, dy / 2.0);
                let _ = store.update_interaction(dx, dy);
                store.end_interaction().unwrap();
            }
        }
        Op::Resize(i, c, dx, dy) => {
            if let Some(id) = pick(store, i) {
                store.begin_resize(id, Corner::ALL[c]).unwrap();
                let _ = store.update_interaction(dx, dy);
                store.end_interaction().unwrap();
            }
        }
        Op::Commit => store.commit(),
        Op::Undo => {
            store.undo();
        }
        Op::Redo => {
            store.redo();
        }
    }
}

fn assert_layout_invariants(blocks: &[Block], columns: u16, rows: u16) -> Result<(), TestCaseError> {
    let mut ids = HashSet::new();
    for (i, a) in blocks.iter().enumerate() {
        prop_assert!(ids.insert(a.id), "duplicate id {}", a.id);
        prop_assert!(a.width >= 1 && a.height >= 1, "empty block {:?}", a);
        prop_assert!(is_within_bounds(&a.rect(), columns, rows), "out of bounds {:?}", a);
        for b in &blocks[i + 1..] {
            prop_assert!(!overlaps(&a.rect(), &b.rect()), "{:?} overlaps {:?}", a, b);
        }
    }
    Ok(())
}

// ============================================================================
// Invariant 1: no overlap, in bounds, unique ids, live and committed
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn layout_invariants_hold_after_every_op(
        columns in 2u16..=10,
        rows in 2u16..=10,
        ops in ops_strategy(60),
    ) {
        let mut store = BuilderStore::with_grid(columns, rows);
        for op in &ops {
            apply(&mut store, op);
            assert_layout_invariants(store.blocks(), columns, rows)?;
            assert_layout_invariants(&store.snapshot(), columns, rows)?;
        }
    }
}

// ============================================================================
// Invariant 2: ids are never reused
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn ids_are_never_reused(ops in ops_strategy(60)) {
        let mut store = BuilderStore::with_grid(8, 8);
        let mut known: HashSet<BlockId> = HashSet::new();
        let mut newest = 0u64;
        for op in &ops {
            apply(&mut store, op);
            for block in store.blocks() {
                if known.insert(block.id) {
                    // A block seen for the first time carries a fresh id.
                    prop_assert!(block.id.raw() > newest, "id {} reused", block.id);
                    newest = block.id.raw();
                }
            }
        }
    }
}

// ============================================================================
// Invariant 3: failed placement leaves state untouched
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn rejected_ops_do_not_mutate(ops in ops_strategy(40)) {
        let mut store = BuilderStore::with_grid(4, 4);
        for op in &ops {
            apply(&mut store, op);
        }
        let blocks = store.blocks().to_vec();
        let position = store.history_position();
        let selected = store.selected();

        if store.add(None).is_err() {
            prop_assert_eq!(store.blocks(), &blocks[..]);
            prop_assert_eq!(store.history_position(), position);
            prop_assert_eq!(store.selected(), selected);
        }
    }
}

// ============================================================================
// Invariant 4: undo N then redo N restores the final state
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn undo_then_redo_round_trips(ops in ops_strategy(40)) {
        let mut store = BuilderStore::with_grid(6, 6);
        for op in &ops {
            apply(&mut store, op);
        }
        store.commit();
        let final_blocks = store.blocks().to_vec();
        let HistoryPosition { cursor, .. } = store.history_position();

        for _ in 0..cursor {
            prop_assert!(store.undo());
        }
        prop_assert!(!store.undo());
        prop_assert_eq!(store.history_position().cursor, 0);

        for _ in 0..cursor {
            prop_assert!(store.redo());
        }
        prop_assert!(!store.redo());
        prop_assert_eq!(store.blocks(), &final_blocks[..]);
    }
}

// ============================================================================
// Invariant 5: commit after undo prunes the redo branch
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn commit_prunes_redo_branch(ops in ops_strategy(40), undos in 1usize..5) {
        let mut store = BuilderStore::with_grid(6, 6);
        for op in &ops {
            apply(&mut store, op);
        }
        store.commit();

        let mut undone = 0;
        for _ in 0..undos {
            if store.undo() {
                undone += 1;
            }
        }
        prop_assume!(undone > 0);
        prop_assert!(store.can_redo());

        store.commit();
        prop_assert!(!store.can_redo());
        let position = store.history_position();
        prop_assert_eq!(position.cursor + 1, position.len);
    }
}
