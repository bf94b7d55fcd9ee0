//! Snapshots, scene files and autosave

use std::path::{Path, PathBuf};

use glam::Vec3;
use shared::{SceneSnapshot, SNAPSHOT_VERSION};

use crate::annotation::{restore_annotation, ParallelLine};
use crate::cell::{self, CellMap};
use crate::error::{EditorError, EditorResult};
use crate::grid::Grid;

use super::{check_thickness, SceneState};

impl SceneState {
    /// Serializable copy of the current scene
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            version: SNAPSHOT_VERSION,
            grid_size: self.grid.size(),
            spacing: self.grid.spacing(),
            thickness: self.thickness,
            points: self.grid.points.iter().map(|p| p.position.to_array()).collect(),
            cells: self.cells.keys().cloned().collect(),
            lines: self.lines.iter().map(|l| l.to_record(&self.grid)).collect(),
        }
    }

    /// Replace the scene with a snapshot as an undoable edit.
    /// The scene is left untouched if the snapshot is invalid.
    pub fn restore(&mut self, snapshot: &SceneSnapshot) -> EditorResult<()> {
        let current = self.snapshot();
        self.apply_snapshot(snapshot)?;
        self.push_undo(current);
        Ok(())
    }

    /// Rebuild grid, cells and lines from a snapshot without touching history
    pub(crate) fn apply_snapshot(&mut self, snapshot: &SceneSnapshot) -> EditorResult<()> {
        check_thickness(snapshot.thickness)?;
        let expected = snapshot.grid_size.checked_mul(snapshot.grid_size);
        if expected != Some(snapshot.points.len()) {
            return Err(EditorError::InvalidArgument(format!(
                "grid size {} does not match {} stored point(s)",
                snapshot.grid_size,
                snapshot.points.len()
            )));
        }
        let mut grid = Grid::build(snapshot.grid_size, snapshot.spacing)?;
        let positions: Vec<Vec3> = snapshot.points.iter().copied().map(Vec3::from_array).collect();
        grid.set_positions(&positions)?;
        grid.resync_lines();

        let mut cells = CellMap::new();
        for key in &snapshot.cells {
            if key.layer < 0 {
                return Err(EditorError::InvalidArgument(format!("cell {key} is below the base layer")));
            }
            let location = grid.quad(key.grid_x, key.grid_z)?;
            cell::place_cell(&mut cells, &grid, key.clone(), &location, snapshot.thickness)?;
        }

        let lines = snapshot
            .lines
            .iter()
            .map(|record| {
                if record.points.len() < 2 {
                    return Err(EditorError::PreconditionNotMet(format!(
                        "parallel line needs at least 2 points, got {}",
                        record.points.len()
                    )));
                }
                restore_annotation(&grid, record, self.markers).ok_or_else(|| {
                    EditorError::InvalidArgument("parallel line references unknown points".into())
                })
            })
            .collect::<EditorResult<Vec<ParallelLine>>>()?;

        self.grid = grid;
        self.cells = cells;
        self.lines = lines;
        self.thickness = snapshot.thickness;
        self.dragged_line = None;
        self.version += 1;
        Ok(())
    }

    /// Scene as pretty JSON
    pub fn export_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    /// Replace the scene with JSON produced by [`SceneState::export_json`]
    pub fn import_json(&mut self, json: &str) -> EditorResult<()> {
        let snapshot: SceneSnapshot = serde_json::from_str(json)?;
        self.restore(&snapshot)
    }

    pub fn save_to_file(&self, path: &Path) -> EditorResult<()> {
        std::fs::write(path, self.export_json()?)?;
        tracing::info!("Saved scene to {}", path.display());
        Ok(())
    }

    pub fn load_from_file(&mut self, path: &Path) -> EditorResult<()> {
        let json = std::fs::read_to_string(path)?;
        self.import_json(&json)?;
        tracing::info!("Loaded scene from {}", path.display());
        Ok(())
    }

    /// Get autosave file path
    fn autosave_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cellgrid", "cellgrid")
            .map(|dirs| dirs.data_dir().join("autosave.json"))
    }

    /// Save scene to autosave file
    pub fn autosave(&self) {
        let Some(path) = Self::autosave_path() else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::error!("Failed to create {}: {e}", parent.display());
                return;
            }
        }
        if let Err(e) = self.save_to_file(&path) {
            tracing::error!("Autosave failed: {e}");
        }
    }

    /// Load scene from autosave file
    pub fn load_autosave() -> Option<SceneSnapshot> {
        let path = Self::autosave_path()?;
        let json = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&json) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::error!("Ignoring unreadable autosave {}: {e}", path.display());
                None
            }
        }
    }
}
