#![forbid(unsafe_code)]

//! The builder store: sole owner of the block collection.
//!
//! [`BuilderStore`] holds the grid settings, a *live* block collection,
//! and a [`SnapshotStore`] of committed collections. Every mutation goes
//! through one of its methods, which validate the request against the
//! placement rules before touching anything.
//!
//! # Committed vs. live edits
//!
//! - `add`, `duplicate`, `paste`, `remove`, `nudge`, and `grow` apply and
//!   commit in one step.
//! - `move_to`, `resize_to`, and interaction updates only change the live
//!   collection. The caller ends the gesture with [`BuilderStore::commit`]
//!   (or [`BuilderStore::end_interaction`]) to record a single snapshot.
//!
//! # Invariants
//!
//! After every call, for the live collection and every snapshot:
//!
//! 1. every block lies inside the `columns` x `rows` grid;
//! 2. no two blocks overlap (touching edges is fine);
//! 3. ids are unique, and no id is ever handed out twice.
//!
//! # Failure Modes
//!
//! Every `Err` leaves the live collection, the history, the selection,
//! and the clipboard untouched. Collisions on the live path are expected
//! many times per second during a drag; they are logged at trace level
//! only.

use std::collections::HashSet;
use std::sync::Arc;

use bento_core::{
    Block, BlockId, BlockShape, CELL_UNIT, Corner, GridRect, GridSettings, Position,
    clamp_origin, find_placement,
};
use serde::{Deserialize, Serialize};

use crate::config::BuilderConfig;
use crate::error::{EditError, EditResult};
use crate::interaction::{Interaction, InteractionKind};
use crate::undo::SnapshotStore;

/// A committed block collection.
pub type Snapshot = Vec<Block>;

/// Where the history cursor stands, for enabling undo/redo controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPosition {
    /// Index of the current snapshot.
    pub cursor: usize,
    /// Number of snapshots in the log.
    pub len: usize,
}

impl HistoryPosition {
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.len
    }
}

/// Owner of the block collection, settings, and undo history.
#[derive(Debug)]
pub struct BuilderStore {
    settings: GridSettings,
    default_block: BlockShape,
    blocks: Snapshot,
    history: SnapshotStore<Snapshot>,
    /// `None` once `u64::MAX` has been handed out.
    next_id: Option<u64>,
    clipboard: Option<Block>,
    selected: Option<BlockId>,
    interaction: Option<Interaction>,
}

impl Default for BuilderStore {
    fn default() -> Self {
        Self::new(BuilderConfig::default())
    }
}

impl BuilderStore {
    /// Create an empty store. History starts with one empty snapshot.
    #[must_use]
    pub fn new(config: BuilderConfig) -> Self {
        Self {
            settings: config.settings,
            default_block: config.default_block,
            blocks: Vec::new(),
            history: SnapshotStore::new(Vec::new(), config.history),
            next_id: Some(1),
            clipboard: None,
            selected: None,
            interaction: None,
        }
    }

    /// Create an empty store for a `columns` x `rows` grid.
    #[must_use]
    pub fn with_grid(columns: u16, rows: u16) -> Self {
        Self::new(BuilderConfig {
            settings: GridSettings::with_grid(columns, rows),
            ..BuilderConfig::default()
        })
    }

    /// Start from a previously saved collection.
    ///
    /// The collection becomes the initial snapshot. It must already
    /// satisfy the placement invariants; new ids continue after the
    /// largest loaded one.
    pub fn from_blocks(config: BuilderConfig, blocks: Vec<Block>) -> EditResult<Self> {
        validate_layout(&blocks, config.settings.columns, config.settings.rows)?;
        let next_id = match blocks.iter().map(|b| b.id).max() {
            Some(max) => max.raw().checked_add(1).ok_or(EditError::IdExhausted(max))?,
            None => 1,
        };
        let mut store = Self::new(config);
        store.history.reset(blocks.clone());
        store.blocks = blocks;
        store.next_id = Some(next_id);
        tracing::debug!(blocks = store.blocks.len(), next_id, "layout loaded");
        Ok(store)
    }

    // ====================================================================
    // Accessors
    // ====================================================================

    #[must_use]
    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    /// The live collection, including uncommitted drag/resize changes.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// The committed collection under the history cursor.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(self.history.current())
    }

    #[must_use]
    pub fn history_position(&self) -> HistoryPosition {
        HistoryPosition {
            cursor: self.history.cursor(),
            len: self.history.len(),
        }
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Whether the live collection differs from the committed one.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.blocks != **self.history.current()
    }

    #[must_use]
    pub fn selected(&self) -> Option<BlockId> {
        self.selected
    }

    #[must_use]
    pub fn clipboard(&self) -> Option<&Block> {
        self.clipboard.as_ref()
    }

    #[must_use]
    pub fn interaction(&self) -> Option<&Interaction> {
        self.interaction.as_ref()
    }

    // ====================================================================
    // Committed edits
    // ====================================================================

    /// Add a default-sized block at the first free position.
    ///
    /// The title is `title_hint` when given, otherwise `"Block N"`.
    pub fn add(&mut self, title_hint: Option<&str>) -> EditResult<Block> {
        let title = match title_hint {
            Some(title) => title.to_owned(),
            None => format!("Block {}", self.blocks.len() + 1),
        };
        let seed = GridRect::from_size(self.default_block.width, self.default_block.height);
        let block = self.place_new(seed, title)?;
        tracing::debug!(id = %block.id, x = block.x, y = block.y, "block added");
        Ok(block)
    }

    /// Copy a block's size and title into a new block near it.
    ///
    /// The new block is seeded one cell down and right of the source and
    /// then placed first-fit. It becomes the selection.
    pub fn duplicate(&mut self, id: BlockId) -> EditResult<Block> {
        let source = self.block(id).cloned().ok_or(EditError::UnknownBlock(id))?;
        let block = self.place_near(&source)?;
        tracing::debug!(source = %id, id = %block.id, x = block.x, y = block.y, "block duplicated");
        Ok(block)
    }

    /// Remember a block for a later [`paste`](Self::paste).
    pub fn copy(&mut self, id: BlockId) -> EditResult<()> {
        let block = self.block(id).cloned().ok_or(EditError::UnknownBlock(id))?;
        self.clipboard = Some(block);
        tracing::debug!(%id, "block copied");
        Ok(())
    }

    /// Insert a copy of the clipboard block, placed like a duplicate.
    ///
    /// Works even if the copied block has since been removed.
    pub fn paste(&mut self) -> EditResult<Block> {
        let source = self.clipboard.clone().ok_or(EditError::ClipboardEmpty)?;
        let block = self.place_near(&source)?;
        tracing::debug!(source = %source.id, id = %block.id, x = block.x, y = block.y, "block pasted");
        Ok(block)
    }

    /// Remove a block and commit. Absent ids still commit an unchanged
    /// snapshot.
    pub fn remove(&mut self, id: BlockId) -> Option<Block> {
        let removed = self
            .blocks
            .iter()
            .position(|b| b.id == id)
            .map(|index| self.blocks.remove(index));
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.interaction.is_some_and(|i| i.id() == id) {
            self.interaction = None;
        }
        tracing::debug!(%id, found = removed.is_some(), "block removed");
        self.commit();
        removed
    }

    /// Move a block by whole cells (arrow keys) and commit if it moved.
    ///
    /// The target is clamped to the grid first, so pushing against an
    /// edge is a no-op rather than an error.
    pub fn nudge(&mut self, id: BlockId, dx: i32, dy: i32) -> EditResult<Block> {
        let current = self.block(id).ok_or(EditError::UnknownBlock(id))?.rect();
        let target = clamp_origin(
            i32::from(current.x).saturating_add(dx),
            i32::from(current.y).saturating_add(dy),
            current.width,
            current.height,
            self.settings.columns,
            self.settings.rows,
        );
        let block = self.move_to(id, target.x, target.y)?;
        if block.rect() != current {
            self.commit();
        }
        Ok(block)
    }

    /// Grow or shrink a block by whole cells (shift+arrow keys) and commit
    /// if it changed. Sizes are floored at one cell.
    pub fn grow(&mut self, id: BlockId, dw: i32, dh: i32) -> EditResult<Block> {
        let current = self.block(id).ok_or(EditError::UnknownBlock(id))?.rect();
        let width = resize_len(current.width, dw);
        let height = resize_len(current.height, dh);
        let block = self.resize_to(id, width, height, current.x, current.y)?;
        if block.rect() != current {
            self.commit();
        }
        Ok(block)
    }

    // ====================================================================
    // Live edits
    // ====================================================================

    /// Move a block to `(x, y)` without recording history.
    pub fn move_to(&mut self, id: BlockId, x: u16, y: u16) -> EditResult<Block> {
        let current = self.block(id).ok_or(EditError::UnknownBlock(id))?.rect();
        self.apply_live(id, current.at(Position::new(x, y)))
    }

    /// Change a block's size and origin without recording history.
    pub fn resize_to(
        &mut self,
        id: BlockId,
        width: u16,
        height: u16,
        x: u16,
        y: u16,
    ) -> EditResult<Block> {
        self.apply_live(id, GridRect::new(x, y, width, height))
    }

    /// Record the live collection as a new history snapshot, pruning any
    /// redo branch.
    pub fn commit(&mut self) {
        self.history.push(self.blocks.clone());
        tracing::debug!(
            cursor = self.history.cursor(),
            len = self.history.len(),
            blocks = self.blocks.len(),
            "history committed"
        );
    }

    // ====================================================================
    // Interactions
    // ====================================================================

    /// Start dragging a block.
    pub fn begin_drag(&mut self, id: BlockId) -> EditResult<()> {
        self.begin(id, InteractionKind::Drag)
    }

    /// Start resizing a block from one of its corners.
    pub fn begin_resize(&mut self, id: BlockId, corner: Corner) -> EditResult<()> {
        self.begin(id, InteractionKind::Resize(corner))
    }

    /// Feed a pointer position, as pixels travelled since the interaction
    /// began.
    ///
    /// Returns the block's geometry after the update. A target that would
    /// collide is absorbed: the block keeps its last valid geometry and
    /// the call still succeeds.
    pub fn update_interaction(&mut self, dx_px: f64, dy_px: f64) -> EditResult<Block> {
        let interaction = self.interaction.ok_or(EditError::NoActiveInteraction)?;
        let target = interaction.target(
            dx_px,
            dy_px,
            f64::from(CELL_UNIT),
            self.settings.columns,
            self.settings.rows,
        );
        let id = interaction.id();
        match self.apply_live(id, target) {
            Ok(block) => Ok(block),
            Err(EditError::Collision { .. } | EditError::InvalidSize { .. }) => self
                .block(id)
                .cloned()
                .ok_or(EditError::UnknownBlock(id)),
            Err(err) => Err(err),
        }
    }

    /// Finish the interaction and commit the result.
    pub fn end_interaction(&mut self) -> EditResult<Block> {
        let interaction = self.interaction.take().ok_or(EditError::NoActiveInteraction)?;
        self.commit();
        self.block(interaction.id())
            .cloned()
            .ok_or(EditError::UnknownBlock(interaction.id()))
    }

    /// Abandon the interaction and restore the committed collection.
    pub fn cancel_interaction(&mut self) -> EditResult<()> {
        let interaction = self.interaction.take().ok_or(EditError::NoActiveInteraction)?;
        self.blocks = (**self.history.current()).clone();
        tracing::debug!(id = %interaction.id(), "interaction cancelled");
        Ok(())
    }

    // ====================================================================
    // History
    // ====================================================================

    /// Step back one snapshot. Returns `false` at the first snapshot.
    ///
    /// Uncommitted live changes and any active interaction are dropped.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.restore(&snapshot);
        tracing::debug!(cursor = self.history.cursor(), "undo");
        true
    }

    /// Step forward one snapshot. Returns `false` at the last snapshot.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.restore(&snapshot);
        tracing::debug!(cursor = self.history.cursor(), "redo");
        true
    }

    // ====================================================================
    // Selection
    // ====================================================================

    pub fn select(&mut self, id: BlockId) -> EditResult<()> {
        if self.block(id).is_none() {
            return Err(EditError::UnknownBlock(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Select the block after the current one, wrapping (Tab).
    pub fn select_next(&mut self) -> Option<BlockId> {
        let next = match self.selected {
            None => self.blocks.first(),
            Some(current) => {
                let index = self.blocks.iter().position(|b| b.id == current);
                match index {
                    Some(index) => self.blocks.get((index + 1) % self.blocks.len()),
                    None => self.blocks.first(),
                }
            }
        };
        self.selected = next.map(|b| b.id);
        self.selected
    }

    // ====================================================================
    // Settings
    // ====================================================================

    /// Replace the grid settings.
    ///
    /// Cosmetic fields always apply. New grid dimensions are refused if
    /// any live or historical block would no longer fit.
    pub fn update_settings(&mut self, settings: GridSettings) -> EditResult<()> {
        let errors = settings.validate();
        if !errors.is_empty() {
            return Err(EditError::InvalidSettings(errors));
        }
        if !settings.same_grid(&self.settings) {
            let collections =
                std::iter::once(&self.blocks).chain(self.history.iter().map(|s| &**s));
            for blocks in collections {
                if let Some(block) = blocks
                    .iter()
                    .find(|b| !b.rect().is_within(settings.columns, settings.rows))
                {
                    return Err(EditError::SettingsConflict { id: block.id });
                }
            }
        }
        tracing::debug!(
            columns = settings.columns,
            rows = settings.rows,
            "settings updated"
        );
        self.settings = settings;
        Ok(())
    }

    // ====================================================================
    // Internals
    // ====================================================================

    fn allocate_id(&mut self) -> EditResult<BlockId> {
        let raw = self
            .next_id
            .ok_or(EditError::IdExhausted(BlockId::new(u64::MAX)))?;
        self.next_id = raw.checked_add(1);
        Ok(BlockId::new(raw))
    }

    fn index_of(&self, id: BlockId) -> EditResult<usize> {
        self.blocks
            .iter()
            .position(|b| b.id == id)
            .ok_or(EditError::UnknownBlock(id))
    }

    /// First block other than `id` that `rect` overlaps.
    fn collision(&self, id: BlockId, rect: &GridRect) -> Option<BlockId> {
        self.blocks
            .iter()
            .find(|b| b.id != id && b.rect().overlaps(rect))
            .map(|b| b.id)
    }

    /// Seed one cell down-right of `source` and place a copy.
    fn place_near(&mut self, source: &Block) -> EditResult<Block> {
        let seed = GridRect::new(
            source.x.saturating_add(1),
            source.y.saturating_add(1),
            source.width,
            source.height,
        );
        let block = self.place_new(seed, source.title.clone())?;
        self.selected = Some(block.id);
        Ok(block)
    }

    /// Place a new block first-fit from `seed`, append it, and commit.
    fn place_new(&mut self, seed: GridRect, title: String) -> EditResult<Block> {
        let others: Vec<GridRect> = self.blocks.iter().map(Block::rect).collect();
        let Some(origin) =
            find_placement(&seed, &others, self.settings.columns, self.settings.rows)
        else {
            tracing::debug!(
                width = seed.width,
                height = seed.height,
                blocks = self.blocks.len(),
                "no space available"
            );
            return Err(EditError::PlacementUnavailable {
                width: seed.width,
                height: seed.height,
            });
        };
        let block = Block::new(self.allocate_id()?, seed.at(origin), title);
        self.blocks.push(block.clone());
        self.commit();
        Ok(block)
    }

    /// Validate and apply a live geometry change.
    ///
    /// The requested rectangle must not overlap another block. The origin
    /// is then clamped into the grid; if that moved it, the clamped
    /// rectangle is checked again so clamping can never create an overlap.
    fn apply_live(&mut self, id: BlockId, rect: GridRect) -> EditResult<Block> {
        let index = self.index_of(id)?;
        let (columns, rows) = (self.settings.columns, self.settings.rows);
        if rect.is_empty() || rect.width > columns || rect.height > rows {
            tracing::trace!(%id, width = rect.width, height = rect.height, "live update rejected: size");
            return Err(EditError::InvalidSize {
                width: rect.width,
                height: rect.height,
            });
        }
        if let Some(other) = self.collision(id, &rect) {
            tracing::trace!(%id, %other, "live update rejected: collision");
            return Err(EditError::Collision { id, other });
        }
        let clamped = rect.at(clamp_origin(
            i32::from(rect.x),
            i32::from(rect.y),
            rect.width,
            rect.height,
            columns,
            rows,
        ));
        if clamped != rect {
            if let Some(other) = self.collision(id, &clamped) {
                tracing::trace!(%id, %other, "live update rejected: collision after clamp");
                return Err(EditError::Collision { id, other });
            }
        }
        let block = &mut self.blocks[index];
        block.set_rect(clamped);
        Ok(block.clone())
    }

    fn begin(&mut self, id: BlockId, kind: InteractionKind) -> EditResult<()> {
        if let Some(active) = self.interaction {
            return Err(EditError::InteractionInProgress(active.id()));
        }
        let start = self.block(id).ok_or(EditError::UnknownBlock(id))?.rect();
        self.interaction = Some(Interaction::new(id, kind, start));
        tracing::trace!(%id, ?kind, "interaction started");
        Ok(())
    }

    fn restore(&mut self, snapshot: &Snapshot) {
        self.blocks = snapshot.clone();
        self.interaction = None;
        if self.selected.is_some_and(|id| self.block(id).is_none()) {
            self.selected = None;
        }
    }
}

/// Apply a signed delta to a size, flooring at one cell.
fn resize_len(len: u16, delta: i32) -> u16 {
    // Clamped into [1, u16::MAX].
    (i32::from(len) + delta).clamp(1, i32::from(u16::MAX)) as u16
}

/// Check that a collection satisfies the placement invariants on a
/// `columns` x `rows` grid.
pub fn validate_layout(blocks: &[Block], columns: u16, rows: u16) -> EditResult<()> {
    let mut seen = HashSet::with_capacity(blocks.len());
    for (i, block) in blocks.iter().enumerate() {
        if !seen.insert(block.id) {
            return Err(EditError::DuplicateId(block.id));
        }
        let rect = block.rect();
        if rect.is_empty() {
            return Err(EditError::InvalidSize {
                width: rect.width,
                height: rect.height,
            });
        }
        if !rect.is_within(columns, rows) {
            return Err(EditError::OutOfBounds { id: block.id });
        }
        if let Some(other) = blocks[..i].iter().find(|b| b.rect().overlaps(&rect)) {
            return Err(EditError::Collision {
                id: block.id,
                other: other.id,
            });
        }
    }
    Ok(())
}
