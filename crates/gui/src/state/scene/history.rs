//! Undo/redo functionality

use super::SceneState;

impl SceneState {
    /// Undo last change
    pub fn undo(&mut self) {
        if let Some(prev) = self.undo_stack.pop() {
            let current = self.snapshot();
            match self.apply_snapshot(&prev) {
                Ok(()) => self.redo_stack.push(current),
                Err(e) => tracing::error!("Undo failed: {e}"),
            }
        }
    }

    /// Redo last undone change
    pub fn redo(&mut self) {
        if let Some(next) = self.redo_stack.pop() {
            let current = self.snapshot();
            match self.apply_snapshot(&next) {
                Ok(()) => self.undo_stack.push(current),
                Err(e) => tracing::error!("Redo failed: {e}"),
            }
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::super::MAX_UNDO;
    use super::*;
    use shared::CellColor;

    fn red() -> CellColor {
        "#ff0000".parse().unwrap()
    }

    #[test]
    fn test_undo_redo_cell_placement() {
        let mut scene = SceneState::new(5, 1.0, 0.5).unwrap();
        scene.place_cell(2, 2, 0, red()).unwrap();
        scene.place_cell(1, 1, 0, red()).unwrap();

        scene.undo();
        assert_eq!(scene.cell_count(), 1);
        assert!(scene.can_redo());
        scene.undo();
        assert_eq!(scene.cell_count(), 0);
        assert!(!scene.can_undo());

        scene.redo();
        scene.redo();
        assert_eq!(scene.cell_count(), 2);
        assert!(!scene.can_redo());
    }

    #[test]
    fn test_new_edit_drops_redo() {
        let mut scene = SceneState::new(5, 1.0, 0.5).unwrap();
        scene.place_cell(2, 2, 0, red()).unwrap();
        scene.undo();
        scene.place_cell(0, 0, 0, red()).unwrap();
        assert!(!scene.can_redo());
    }

    #[test]
    fn test_undo_bumps_version() {
        let mut scene = SceneState::new(5, 1.0, 0.5).unwrap();
        scene.place_cell(2, 2, 0, red()).unwrap();
        let v = scene.version();
        scene.undo();
        assert!(scene.version() > v);
    }

    #[test]
    fn test_undo_stack_is_capped() {
        let mut scene = SceneState::new(3, 1.0, 0.5).unwrap();
        for layer in 0..(MAX_UNDO as i32 + 20) {
            scene.place_cell(0, 0, layer, red()).unwrap();
        }
        assert_eq!(scene.undo_stack.len(), MAX_UNDO);
    }
}
