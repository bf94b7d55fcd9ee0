//! Cell placement and removal

use glam::Vec3;
use shared::{CellColor, CellKey};

use crate::cell::{self, layer_for_height, Cell};
use crate::error::{EditorError, EditorResult};

use super::SceneState;

impl SceneState {
    /// Place a cell at a world insertion point (as produced by hit-testing).
    ///
    /// Returns `None` without touching the scene when the point is off the
    /// grid, below the base layer, or the same key is already present.
    pub fn place_cell_at_point(&mut self, point: Vec3, color: CellColor) -> EditorResult<Option<CellKey>> {
        let Some(location) = self.grid.to_grid_position(point) else {
            tracing::debug!("Insertion point {point} is outside the grid");
            return Ok(None);
        };
        let layer = layer_for_height(point.y, self.thickness);
        if layer < 0 {
            tracing::debug!("Insertion point {point} is below the base layer");
            return Ok(None);
        }
        let key = CellKey::new(location.grid_x, location.grid_z, layer, color);
        if self.cells.contains_key(&key) {
            return Ok(None);
        }

        self.save_undo();
        cell::place_cell(&mut self.cells, &self.grid, key.clone(), &location, self.thickness)?;
        self.version += 1;
        Ok(Some(key))
    }

    /// Place a cell on quad (`grid_x`, `grid_z`) at `layer`, replacing any
    /// cell under the same key.
    pub fn place_cell(&mut self, grid_x: usize, grid_z: usize, layer: i32, color: CellColor) -> EditorResult<CellKey> {
        if layer < 0 {
            return Err(EditorError::InvalidArgument(format!("layer must be non-negative, got {layer}")));
        }
        let location = self.grid.quad(grid_x, grid_z)?;
        let key = CellKey::new(grid_x, grid_z, layer, color);

        self.save_undo();
        cell::place_cell(&mut self.cells, &self.grid, key.clone(), &location, self.thickness)?;
        self.version += 1;
        Ok(key)
    }

    /// Remove all cells at a location and layer, whatever their colour
    pub fn remove_cells_at(&mut self, grid_x: usize, grid_z: usize, layer: i32) -> Vec<CellKey> {
        if !self.cells.keys().any(|k| k.occupies(grid_x, grid_z, layer)) {
            return Vec::new();
        }
        self.save_undo();
        let removed = cell::remove_cells_at(&mut self.cells, grid_x, grid_z, layer);
        self.version += 1;
        removed
    }

    /// Look up a cell by its display key, e.g. `"2,2,0,#ff0000"`
    pub fn find_cell(&self, key: &str) -> Option<&Cell> {
        self.cells.iter().find(|(k, _)| k.to_string() == key).map(|(_, c)| c)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}
