#![no_main]

use arbitrary::Arbitrary;
use bento_core::{Block, Corner, overlaps};
use bento_runtime::BuilderStore;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Session {
    columns: u8,
    rows: u8,
    ops: Vec<Op>,
}

#[derive(Debug, Arbitrary)]
enum Op {
    Add,
    Duplicate(u8),
    Copy(u8),
    Paste,
    Remove(u8),
    MoveTo(u8, u8, u8),
    ResizeTo(u8, u8, u8, u8, u8),
    Nudge(u8, i8, i8),
    Grow(u8, i8, i8),
    BeginDrag(u8),
    BeginResize(u8, u8),
    Update(i16, i16),
    End,
    Cancel,
    Commit,
    Undo,
    Redo,
    SelectNext,
}

fn pick(store: &BuilderStore, i: u8) -> Option<bento_core::BlockId> {
    let blocks = store.blocks();
    (!blocks.is_empty()).then(|| blocks[usize::from(i) % blocks.len()].id)
}

fuzz_target!(|session: Session| {
    // Grid dimensions in 1..=32.
    let columns = u16::from(session.columns % 32) + 1;
    let rows = u16::from(session.rows % 32) + 1;
    let mut store = BuilderStore::with_grid(columns, rows);

    for op in session.ops.iter().take(256) {
        match *op {
            Op::Add => {
                let _ = store.add(None);
            }
            Op::Duplicate(i) => {
                if let Some(id) = pick(&store, i) {
                    let _ = store.duplicate(id);
                }
            }
            Op::Copy(i) => {
                if let Some(id) = pick(&store, i) {
                    let _ = store.copy(id);
                }
            }
            Op::Paste => {
                let _ = store.paste();
            }
            Op::Remove(i) => {
                if let Some(id) = pick(&store, i) {
                    store.remove(id);
                }
            }
            Op::MoveTo(i, x, y) => {
                if let Some(id) = pick(&store, i) {
                    let _ = store.move_to(id, x.into(), y.into());
                }
            }
            Op::ResizeTo(i, w, h, x, y) => {
                if let Some(id) = pick(&store, i) {
                    let _ = store.resize_to(id, w.into(), h.into(), x.into(), y.into());
                }
            }
            Op::Nudge(i, dx, dy) => {
                if let Some(id) = pick(&store, i) {
                    let _ = store.nudge(id, dx.into(), dy.into());
                }
            }
            Op::Grow(i, dw, dh) => {
                if let Some(id) = pick(&store, i) {
                    let _ = store.grow(id, dw.into(), dh.into());
                }
            }
            Op::BeginDrag(i) => {
                if let Some(id) = pick(&store, i) {
                    let _ = store.begin_drag(id);
                }
            }
            Op::BeginResize(i, c) => {
                if let Some(id) = pick(&store, i) {
                    let corner = Corner::ALL[usize::from(c) % Corner::ALL.len()];
                    let _ = store.begin_resize(id, corner);
                }
            }
            Op::Update(dx, dy) => {
                let _ = store.update_interaction(dx.into(), dy.into());
            }
            Op::End => {
                let _ = store.end_interaction();
            }
            Op::Cancel => {
                let _ = store.cancel_interaction();
            }
            Op::Commit => store.commit(),
            Op::Undo => {
                store.undo();
            }
            Op::Redo => {
                store.redo();
            }
            Op::SelectNext => {
                store.select_next();
            }
        }

        // Post-conditions that must always hold:
        check_layout(store.blocks(), columns, rows);
        check_layout(&store.snapshot(), columns, rows);
        if let Some(id) = store.selected() {
            assert!(store.block(id).is_some(), "selection {id} dangling");
        }
        if let Some(interaction) = store.interaction() {
            assert!(store.block(interaction.id()).is_some(), "interaction dangling");
        }
    }
});

fn check_layout(blocks: &[Block], columns: u16, rows: u16) {
    for (i, a) in blocks.iter().enumerate() {
        let rect = a.rect();
        assert!(!rect.is_empty(), "empty block {a:?}");
        assert!(rect.is_within(columns, rows), "{a:?} outside {columns}x{rows}");
        for b in &blocks[i + 1..] {
            assert_ne!(a.id, b.id, "duplicate id");
            assert!(!overlaps(&rect, &b.rect()), "{a:?} overlaps {b:?}");
        }
    }
}
