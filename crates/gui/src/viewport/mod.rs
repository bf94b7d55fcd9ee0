//! Isometric viewport panel drawn with the egui painter

mod camera;
mod overlays;
pub use cellgrid_lib::viewport::picking;

use egui::{PointerButton, Ui};
use glam::Vec3;

use cellgrid_lib::annotation::DragTarget;
use cellgrid_lib::hit_test::{hit_cells, hit_lattice, resolve_insertion_point, Hittable};

use crate::state::settings::ViewportSettings;
use crate::state::{AppState, DragState, Tool};
use camera::IsometricCamera;
use picking::Ray;

/// Isometric viewport panel
pub struct ViewportPanel {
    camera: IsometricCamera,
    /// Height of the plane a drag moves along
    drag_plane_y: f32,
}

impl ViewportPanel {
    pub fn new(settings: &ViewportSettings) -> Self {
        Self {
            camera: IsometricCamera::new(settings.frustum_size, settings.camera_distance),
            drag_plane_y: 0.0,
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset();
    }

    pub fn rotate_camera(&mut self, steps: i32) {
        self.camera.rotate_quarter(steps);
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        // ── Camera controls ─────────────────────────────
        self.handle_camera(&response, ui, rect);

        // ── Tool interaction ─────────────────────────────
        let hover_ray = response.hover_pos().map(|pos| self.camera.screen_ray(pos, rect));
        self.update_hover(hover_ray.as_ref(), state);

        match state.tool {
            Tool::Place => self.handle_place(&response, rect, state),
            Tool::Remove => self.handle_remove(&response, rect, state),
            Tool::SelectPoints => self.handle_select(&response, rect, state),
            Tool::Move => self.handle_move(&response, rect, state),
        }

        // Derived geometry must match the lattice before drawing
        if let Err(e) = state.scene.resync() {
            tracing::error!("Failed to resync scene geometry: {e}");
        }

        if !ui.is_rect_visible(rect) {
            return;
        }

        let painter = ui.painter_at(rect);
        overlays::draw_background(&painter, rect, state);
        overlays::draw_grid(&painter, rect, &self.camera, state);
        overlays::draw_cells(&painter, rect, &self.camera, state);
        overlays::draw_points(&painter, rect, &self.camera, state);
        overlays::draw_lines(&painter, rect, &self.camera, state);
        if state.tool == Tool::Place {
            let preview = hover_ray.as_ref().and_then(|ray| self.insertion_point(ray, state));
            overlays::draw_insertion_preview(&painter, rect, &self.camera, preview);
        }
        overlays::draw_axis_labels(&painter, rect, &self.camera);
    }

    fn handle_camera(&mut self, response: &egui::Response, ui: &Ui, rect: egui::Rect) {
        if response.dragged_by(PointerButton::Middle) || response.dragged_by(PointerButton::Secondary) {
            let delta = response.drag_delta();
            let scale = self.camera.world_per_pixel(rect);
            self.camera.pan(-delta.x * scale, delta.y * scale);
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.camera.zoom_by(scroll * 0.002);
            }
        }
    }

    fn update_hover(&self, ray: Option<&Ray>, state: &mut AppState) {
        state.selection.hovered_point = ray
            .and_then(|ray| hit_lattice(ray, state.scene.grid(), state.settings.grid.point_radius))
            .and_then(|hit| match hit {
                Hittable::LatticePoint { index, .. } => Some(index),
                _ => None,
            });
    }

    fn insertion_point(&self, ray: &Ray, state: &AppState) -> Option<Vec3> {
        resolve_insertion_point(
            ray,
            state.scene.cells(),
            state.scene.grid(),
            state.settings.grid.point_radius,
            state.scene.thickness(),
        )
    }

    fn click_ray(&self, response: &egui::Response, rect: egui::Rect) -> Option<Ray> {
        if !response.clicked_by(PointerButton::Primary) {
            return None;
        }
        response
            .interact_pointer_pos()
            .map(|pos| self.camera.screen_ray(pos, rect))
    }

    fn handle_place(&self, response: &egui::Response, rect: egui::Rect, state: &mut AppState) {
        let Some(ray) = self.click_ray(response, rect) else {
            return;
        };
        let Some(point) = self.insertion_point(&ray, state) else {
            return;
        };
        let color = state.color.clone();
        match state.scene.place_cell_at_point(point, color) {
            Ok(Some(key)) => tracing::debug!("Placed {key} from click"),
            Ok(None) => tracing::debug!("Click at {point} did not place a cell"),
            Err(e) => tracing::warn!("Cannot place cell: {e}"),
        }
    }

    fn handle_remove(&self, response: &egui::Response, rect: egui::Rect, state: &mut AppState) {
        let Some(ray) = self.click_ray(response, rect) else {
            return;
        };
        if let Some(Hittable::CellSurface { key, .. }) = hit_cells(&ray, state.scene.cells()) {
            state.scene.remove_cells_at(key.grid_x, key.grid_z, key.layer);
        }
    }

    fn handle_select(&self, response: &egui::Response, rect: egui::Rect, state: &mut AppState) {
        let Some(ray) = self.click_ray(response, rect) else {
            return;
        };
        match hit_lattice(&ray, state.scene.grid(), state.settings.grid.point_radius) {
            Some(Hittable::LatticePoint { index, .. }) => state.selection.toggle(index),
            _ => state.selection.clear(),
        }
    }

    fn handle_move(&mut self, response: &egui::Response, rect: egui::Rect, state: &mut AppState) {
        if response.drag_started_by(PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                let ray = self.camera.screen_ray(pos, rect);
                self.begin_move(&ray, state);
            }
        }

        if response.dragged_by(PointerButton::Primary) {
            if let (Some(drag), Some(pos)) = (state.selection.drag, response.interact_pointer_pos()) {
                if let Some(target) = self.camera.plane_point(pos, rect, self.drag_plane_y) {
                    let result = match drag {
                        DragState::Point(index) => state.scene.drag_point_to(index, target),
                        DragState::LineMarker(..) => state.scene.drag_line_to(target),
                    };
                    if let Err(e) = result {
                        tracing::warn!("Drag failed: {e}");
                        state.selection.drag = None;
                    }
                }
            }
        }

        if response.drag_stopped_by(PointerButton::Primary) {
            if let Some(DragState::LineMarker(..)) = state.selection.drag {
                state.scene.end_line_drag();
            }
            state.selection.drag = None;
        }
    }

    /// Line markers take priority over lattice points
    fn begin_move(&mut self, ray: &Ray, state: &mut AppState) {
        if let Some((index, target)) = state.scene.pick_line_marker(ray) {
            let line = &state.scene.lines()[index];
            self.drag_plane_y = match target {
                DragTarget::Start => line.endpoints[0].position.y,
                DragTarget::End => line.endpoints[1].position.y,
                DragTarget::Handle => line.handle.position.y,
            };
            match state.scene.begin_line_drag(index, target) {
                Ok(()) => state.selection.drag = Some(DragState::LineMarker(index, target)),
                Err(e) => tracing::warn!("Cannot drag line marker: {e}"),
            }
            return;
        }

        if let Some(Hittable::LatticePoint { index, .. }) =
            hit_lattice(ray, state.scene.grid(), state.settings.grid.point_radius)
        {
            self.drag_plane_y = 0.0;
            state.scene.begin_drag();
            state.selection.drag = Some(DragState::Point(index));
        }
    }
}
