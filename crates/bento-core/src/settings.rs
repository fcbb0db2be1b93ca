#![forbid(unsafe_code)]

//! Grid settings.
//!
//! Only `columns` and `rows` constrain placement. `cell_size`, `gap`, and
//! `border_radius` are carried for whoever renders or exports the layout.
//! Missing keys fall back to [`GridSettings::default`]. JSON keys are
//! camelCase (`cellSize`, `borderRadius`) so layouts saved by the web
//! builder load unchanged. File and string loaders live in
//! `config_loader` behind the `policy-config` feature.

use serde::{Deserialize, Serialize};

/// Dimensions and cosmetics of the builder grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridSettings {
    /// Rendered cell size in pixels.
    pub cell_size: u16,
    /// Gap between blocks in pixels.
    pub gap: u16,
    /// Corner radius of blocks in pixels.
    pub border_radius: u16,
    /// Grid width in cells.
    pub columns: u16,
    /// Grid height in cells.
    pub rows: u16,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            cell_size: 40,
            gap: 8,
            border_radius: 16,
            columns: 25,
            rows: 14,
        }
    }
}

impl GridSettings {
    /// Settings for a `columns` x `rows` grid with default cosmetics.
    #[must_use]
    pub fn with_grid(columns: u16, rows: u16) -> Self {
        Self {
            columns,
            rows,
            ..Self::default()
        }
    }

    /// Whether two settings describe the same grid dimensions.
    #[must_use]
    pub fn same_grid(&self, other: &GridSettings) -> bool {
        self.columns == other.columns && self.rows == other.rows
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the
    /// settings are valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.columns == 0 {
            errors.push("columns must be > 0".into());
        }
        if self.rows == 0 {
            errors.push("rows must be > 0".into());
        }
        errors
    }
}
