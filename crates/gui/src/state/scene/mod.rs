//! Scene state management
//!
//! The editing session: lattice, placed cells and parallel lines, with
//! undo/redo history over scene snapshots.

mod cell_ops;
mod history;
mod line_ops;
mod persistence;
mod point_ops;

use shared::SceneSnapshot;

use crate::annotation::{update_all_annotations, MarkerSizes, ParallelLine};
use crate::cell::{resync_cells, CellMap, DEFAULT_CELL_THICKNESS};
use crate::error::{EditorError, EditorResult};
use crate::grid::Grid;

use super::settings::EditorSettings;

const MAX_UNDO: usize = 100;

/// Counts of derived geometry rebuilt by one [`SceneState::resync`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResyncStats {
    pub lines: usize,
    pub cells: usize,
    pub annotations: usize,
}

/// Editing session with undo/redo history
pub struct SceneState {
    pub(crate) grid: Grid,
    pub(crate) cells: CellMap,
    pub(crate) lines: Vec<ParallelLine>,
    pub(crate) thickness: f32,
    pub(crate) markers: MarkerSizes,
    /// Index into `lines` of the line being dragged
    pub(crate) dragged_line: Option<usize>,
    /// Undo stack - previous states
    pub(crate) undo_stack: Vec<SceneSnapshot>,
    /// Redo stack - undone states
    pub(crate) redo_stack: Vec<SceneSnapshot>,
    /// Monotonically increasing version counter for cache invalidation
    pub(crate) version: u64,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::from_grid(default_grid(), DEFAULT_CELL_THICKNESS, MarkerSizes::default())
    }
}

fn default_grid() -> Grid {
    let settings = EditorSettings::default();
    match Grid::build(settings.grid.size, settings.grid.spacing) {
        Ok(grid) => grid,
        Err(_) => unreachable!("default grid settings are valid"),
    }
}

impl SceneState {
    /// Empty session on a `size` x `size` lattice
    pub fn new(size: usize, spacing: f32, thickness: f32) -> EditorResult<Self> {
        check_thickness(thickness)?;
        Ok(Self::from_grid(Grid::build(size, spacing)?, thickness, MarkerSizes::default()))
    }

    pub fn from_settings(settings: &EditorSettings) -> EditorResult<Self> {
        settings.validate()?;
        let grid = Grid::build(settings.grid.size, settings.grid.spacing)?;
        Ok(Self::from_grid(
            grid,
            settings.cells.thickness,
            settings.annotations.marker_sizes(),
        ))
    }

    fn from_grid(grid: Grid, thickness: f32, markers: MarkerSizes) -> Self {
        Self {
            grid,
            cells: CellMap::new(),
            lines: Vec::new(),
            thickness,
            markers,
            dragged_line: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            version: 0,
        }
    }

    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cells(&self) -> &CellMap {
        &self.cells
    }

    pub fn lines(&self) -> &[ParallelLine] {
        &self.lines
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn marker_sizes(&self) -> MarkerSizes {
        self.markers
    }

    /// Bump version without saving undo
    pub fn notify_mutated(&mut self) {
        self.version += 1;
    }

    /// Save current state to undo stack and drop the redo branch
    pub(crate) fn save_undo(&mut self) {
        self.push_undo(self.snapshot());
    }

    pub(crate) fn push_undo(&mut self, snapshot: SceneSnapshot) {
        self.undo_stack.push(snapshot);
        if self.undo_stack.len() > MAX_UNDO {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Bring derived geometry up to date: grid lines, then cells, then
    /// parallel lines. Call after position changes and before drawing.
    pub fn resync(&mut self) -> EditorResult<ResyncStats> {
        let lines = self.grid.resync_lines();
        let cells = resync_cells(&mut self.cells, &self.grid, self.thickness)?;
        update_all_annotations(&mut self.lines);
        let stats = ResyncStats {
            lines,
            cells,
            annotations: self.lines.len(),
        };
        if lines > 0 || cells > 0 {
            tracing::debug!(?stats, "resynced scene geometry");
        }
        Ok(stats)
    }

    /// Remove all cells and lines and reset the lattice
    pub fn clear(&mut self) -> EditorResult<()> {
        let grid = Grid::build(self.grid.size(), self.grid.spacing())?;
        self.save_undo();
        self.grid = grid;
        self.cells.clear();
        self.lines = crate::annotation::destroy_annotations(std::mem::take(&mut self.lines));
        self.dragged_line = None;
        self.version += 1;
        tracing::info!("Cleared scene");
        Ok(())
    }
}

fn check_thickness(thickness: f32) -> EditorResult<()> {
    if thickness > 0.0 {
        Ok(())
    } else {
        Err(EditorError::InvalidArgument(format!(
            "cell thickness must be positive, got {thickness}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn test_default_scene() {
        let scene = SceneState::default();
        assert_eq!(scene.grid().size(), 10);
        assert!(scene.cells().is_empty());
        assert_eq!(scene.version(), 0);
    }

    #[test]
    fn test_new_rejects_bad_thickness() {
        assert!(SceneState::new(5, 1.0, 0.0).is_err());
        assert!(SceneState::new(0, 1.0, 0.5).is_err());
    }

    #[test]
    fn test_resync_order_updates_cells_after_points() {
        let mut scene = SceneState::new(5, 1.0, 0.5).unwrap();
        scene.place_cell(2, 2, 0, "#ff0000".parse().unwrap()).unwrap();
        scene.move_point(2, 2, Vec3::new(0.2, 0.0, -0.1)).unwrap();

        let stats = scene.resync().unwrap();
        assert_eq!(stats.lines, 4);
        assert_eq!(stats.cells, 1);

        let again = scene.resync().unwrap();
        assert_eq!(again, ResyncStats::default());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut scene = SceneState::new(4, 1.0, 0.5).unwrap();
        scene.place_cell(0, 0, 0, "#ff0000".parse().unwrap()).unwrap();
        scene.move_point(0, 0, Vec3::new(-3.0, 0.0, -3.0)).unwrap();
        scene.create_line(&[0, 1]).unwrap();
        scene.clear().unwrap();

        assert!(scene.cells().is_empty());
        assert!(scene.lines().is_empty());
        assert_eq!(scene.grid().point(0, 0).unwrap().position, Vec3::new(-1.5, 0.0, -1.5));
        assert!(scene.can_undo());
    }
}
