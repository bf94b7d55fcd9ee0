//! Parallel line operations

use glam::Vec3;
use shared::PointRef;

use crate::annotation::{create_annotation, destroy_annotations, update_annotation, DragTarget};
use crate::error::{EditorError, EditorResult};
use crate::viewport::picking::Ray;

use super::SceneState;

impl SceneState {
    /// Create a parallel line through lattice point indices, in order.
    /// Returns the new line's id, or `None` when fewer than two points are given.
    pub fn create_line(&mut self, points: &[usize]) -> EditorResult<Option<String>> {
        if let Some(&bad) = points.iter().find(|&&idx| idx >= self.grid.points.len()) {
            return Err(EditorError::InvalidArgument(format!("no lattice point with index {bad}")));
        }
        let Some(line) = create_annotation(&self.grid, points, self.markers) else {
            return Ok(None);
        };
        self.save_undo();
        let id = line.id.clone();
        self.lines.push(line);
        self.version += 1;
        Ok(Some(id))
    }

    /// [`SceneState::create_line`] addressed by lattice coordinates
    pub fn create_line_through(&mut self, points: &[PointRef]) -> EditorResult<Option<String>> {
        let indices = points
            .iter()
            .map(|p| self.grid.index_of(p.i, p.j).ok_or(EditorError::UnknownPoint { i: p.i, j: p.j }))
            .collect::<EditorResult<Vec<_>>>()?;
        self.create_line(&indices)
    }

    pub fn clear_lines(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        self.save_undo();
        let count = self.lines.len();
        self.lines = destroy_annotations(std::mem::take(&mut self.lines));
        self.dragged_line = None;
        self.version += 1;
        tracing::info!("Cleared {count} parallel line(s)");
    }

    /// Nearest line marker under the ray: (line index, marker)
    pub fn pick_line_marker(&self, ray: &Ray) -> Option<(usize, DragTarget)> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| line.pick_marker(ray).map(|(target, d)| (idx, target, d)))
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(idx, target, _)| (idx, target))
    }

    /// Start dragging a marker of line `index`; saves one undo step
    pub fn begin_line_drag(&mut self, index: usize, target: DragTarget) -> EditorResult<()> {
        if index >= self.lines.len() {
            return Err(EditorError::InvalidArgument(format!("no parallel line with index {index}")));
        }
        self.end_line_drag();
        self.save_undo();
        self.lines[index].begin_drag(target);
        self.dragged_line = Some(index);
        self.version += 1;
        Ok(())
    }

    /// Move the dragged marker, if any
    pub fn drag_line_to(&mut self, position: Vec3) -> EditorResult<()> {
        let Some(index) = self.dragged_line else {
            return Err(EditorError::PreconditionNotMet("no parallel line is being dragged".into()));
        };
        let line = &mut self.lines[index];
        line.drag_to(position);
        update_annotation(line);
        self.version += 1;
        Ok(())
    }

    pub fn end_line_drag(&mut self) {
        if let Some(index) = self.dragged_line.take() {
            if let Some(line) = self.lines.get_mut(index) {
                line.end_drag();
                update_annotation(line);
            }
            self.version += 1;
        }
    }

    pub fn is_dragging_line(&self) -> bool {
        self.dragged_line.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_line_needs_two_points() {
        let mut scene = SceneState::new(4, 1.0, 0.5).unwrap();
        assert_eq!(scene.create_line(&[3]).unwrap(), None);
        assert_eq!(scene.version(), 0);
        assert!(scene.create_line(&[0, 99]).is_err());

        let id = scene.create_line(&[0, 5, 10]).unwrap().unwrap();
        assert_eq!(scene.lines()[0].id, id);
        assert_eq!(scene.lines()[0].points, vec![0, 5, 10]);
    }

    #[test]
    fn test_create_line_through_coordinates() {
        let mut scene = SceneState::new(4, 1.0, 0.5).unwrap();
        let refs = [PointRef { i: 0, j: 0 }, PointRef { i: 3, j: 3 }];
        scene.create_line_through(&refs).unwrap().unwrap();
        assert_eq!(scene.lines()[0].points, vec![0, 15]);

        let bad = [PointRef { i: 0, j: 0 }, PointRef { i: 4, j: 0 }];
        assert_eq!(
            scene.create_line_through(&bad).unwrap_err(),
            EditorError::UnknownPoint { i: 4, j: 0 }
        );
    }

    #[test]
    fn test_handle_drag_through_scene() {
        let mut scene = SceneState::new(4, 1.0, 0.5).unwrap();
        scene.create_line(&[0, 3]).unwrap();
        let handle = scene.lines()[0].handle.position;
        let ray = Ray::new(handle + Vec3::Y * 10.0, Vec3::NEG_Y);
        let (idx, target) = scene.pick_line_marker(&ray).unwrap();
        assert_eq!((idx, target), (0, DragTarget::Handle));

        scene.begin_line_drag(idx, target).unwrap();
        scene.drag_line_to(handle + Vec3::new(1.0, 0.0, 0.0)).unwrap();
        scene.end_line_drag();
        assert!(!scene.is_dragging_line());

        let line = &scene.lines()[0];
        assert_eq!(line.endpoints[0].position, Vec3::new(-0.5, 0.0, -1.5));
        assert_eq!(line.handle.position, line.endpoint_center());

        scene.undo();
        assert_eq!(scene.lines()[0].endpoints[0].position, Vec3::new(-1.5, 0.0, -1.5));
    }

    #[test]
    fn test_drag_without_begin_fails() {
        let mut scene = SceneState::new(4, 1.0, 0.5).unwrap();
        assert!(matches!(
            scene.drag_line_to(Vec3::ZERO),
            Err(EditorError::PreconditionNotMet(_))
        ));
    }

    #[test]
    fn test_clear_lines() {
        let mut scene = SceneState::new(4, 1.0, 0.5).unwrap();
        scene.create_line(&[0, 1]).unwrap();
        scene.create_line(&[4, 5]).unwrap();
        scene.clear_lines();
        assert!(scene.lines().is_empty());
        scene.undo();
        assert_eq!(scene.lines().len(), 2);
    }
}
