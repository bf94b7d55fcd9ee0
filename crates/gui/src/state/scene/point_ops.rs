//! Lattice point moves

use glam::Vec3;

use crate::error::{EditorError, EditorResult};

use super::SceneState;

impl SceneState {
    /// Move a lattice point as a single undoable edit.
    /// Cells and grid lines follow on the next [`SceneState::resync`].
    pub fn move_point(&mut self, i: usize, j: usize, position: Vec3) -> EditorResult<()> {
        self.grid.index_of(i, j).ok_or(EditorError::UnknownPoint { i, j })?;
        self.save_undo();
        self.grid.move_point(i, j, position)?;
        self.version += 1;
        Ok(())
    }

    /// Save undo state once at the beginning of a drag operation
    pub fn begin_drag(&mut self) {
        self.save_undo();
        self.version += 1;
    }

    /// Move a point during a drag started with [`SceneState::begin_drag`]
    pub fn drag_point_to(&mut self, index: usize, position: Vec3) -> EditorResult<()> {
        if index >= self.grid.points.len() {
            return Err(EditorError::InvalidArgument(format!("no lattice point with index {index}")));
        }
        let point = self.grid.point_ref(index);
        self.grid.move_point(point.i, point.j, position)?;
        self.version += 1;
        Ok(())
    }
}
