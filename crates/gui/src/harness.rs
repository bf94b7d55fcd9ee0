//! Headless test harness for programmatic scene manipulation.
//!
//! Drives the editing session the way the viewport does (pick rays,
//! tools, per-frame resync) without a window.

use glam::Vec3;
use shared::{CellColor, CellKey, PointRef};

use crate::cell::{layer_for_height, Cell};
use crate::hit_test::{resolve_hit, Hittable};
use crate::state::scene::SceneState;
use crate::state::selection::SelectionState;
use crate::state::settings::EditorSettings;
use crate::validation::MeshValidator;
use crate::viewport::picking::Ray;

/// Headless test harness: scene, point selection and settings
pub struct TestHarness {
    pub scene: SceneState,
    pub selection: SelectionState,
    pub settings: EditorSettings,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Harness on the default 10x10 grid
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    /// Harness on a `size` x `size` grid with unit spacing
    pub fn with_grid(size: usize) -> Self {
        let mut settings = EditorSettings::default();
        settings.grid.size = size;
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        let scene = SceneState::from_settings(&settings).unwrap_or_else(|e| {
            tracing::warn!("Invalid harness settings, using defaults: {e}");
            SceneState::default()
        });
        Self {
            scene,
            selection: SelectionState::default(),
            settings,
        }
    }

    // ── Scene manipulation ────────────────────────────────────

    /// Place a cell by grid coordinates; returns its key string
    pub fn place_cell(&mut self, grid_x: usize, grid_z: usize, layer: i32, color: &str) -> Result<String, String> {
        let color: CellColor = color.parse().map_err(|e| format!("{e}"))?;
        let key = self
            .scene
            .place_cell(grid_x, grid_z, layer, color)
            .map_err(|e| e.to_string())?;
        self.resync();
        Ok(key.to_string())
    }

    /// Place a cell at a world insertion point
    pub fn place_cell_at_point(&mut self, point: Vec3, color: &str) -> Result<Option<String>, String> {
        let color: CellColor = color.parse().map_err(|e| format!("{e}"))?;
        let key = self
            .scene
            .place_cell_at_point(point, color)
            .map_err(|e| e.to_string())?;
        self.resync();
        Ok(key.map(|k| k.to_string()))
    }

    /// Remove all cells at a location and layer
    pub fn remove_cells(&mut self, grid_x: usize, grid_z: usize, layer: i32) -> Vec<String> {
        self.scene
            .remove_cells_at(grid_x, grid_z, layer)
            .iter()
            .map(CellKey::to_string)
            .collect()
    }

    pub fn move_point(&mut self, i: usize, j: usize, position: Vec3) -> Result<(), String> {
        self.scene.move_point(i, j, position).map_err(|e| e.to_string())?;
        self.resync();
        Ok(())
    }

    /// Create a line through lattice coordinates; returns the line id
    pub fn create_line(&mut self, points: &[(usize, usize)]) -> Result<Option<String>, String> {
        let refs: Vec<PointRef> = points.iter().map(|&(i, j)| PointRef { i, j }).collect();
        self.scene.create_line_through(&refs).map_err(|e| e.to_string())
    }

    /// Create a line from the current point selection
    pub fn create_line_from_selection(&mut self) -> Result<Option<String>, String> {
        let points = self.selection.take();
        self.scene.create_line(&points).map_err(|e| e.to_string())
    }

    pub fn clear_lines(&mut self) {
        self.scene.clear_lines();
    }

    /// Load a scene from JSON string (replaces current)
    pub fn load_scene_json(&mut self, json: &str) -> Result<(), String> {
        self.scene.import_json(json).map_err(|e| e.to_string())?;
        self.selection = SelectionState::default();
        Ok(())
    }

    /// Export the current scene as JSON
    pub fn export_scene_json(&self) -> Result<String, String> {
        self.scene.export_json().map_err(|e| e.to_string())
    }

    /// Undo the last operation
    pub fn undo(&mut self) -> bool {
        if self.scene.can_undo() {
            self.scene.undo();
            true
        } else {
            false
        }
    }

    /// Redo the last undone operation
    pub fn redo(&mut self) -> bool {
        if self.scene.can_redo() {
            self.scene.redo();
            true
        } else {
            false
        }
    }

    /// Clear the entire scene
    pub fn clear(&mut self) -> Result<(), String> {
        self.scene.clear().map_err(|e| e.to_string())?;
        self.selection = SelectionState::default();
        Ok(())
    }

    /// Per-frame resync; errors are logged
    pub fn resync(&mut self) {
        if let Err(e) = self.scene.resync() {
            tracing::error!("Resync failed: {e}");
        }
    }

    // ── Pointer simulation ────────────────────────────────────

    /// What a click along `ray` would hit
    pub fn pick(&self, ray: &Ray) -> Option<Hittable> {
        resolve_hit(ray, self.scene.cells(), self.scene.grid(), self.settings.grid.point_radius)
    }

    /// Place-tool click: place a cell where the ray resolves
    pub fn click_place(&mut self, ray: &Ray, color: &str) -> Result<Option<String>, String> {
        let Some(hit) = self.pick(ray) else {
            return Ok(None);
        };
        self.place_cell_at_point(hit.insertion_point(self.scene.thickness()), color)
    }

    /// Remove-tool click: remove every cell at the clicked cell's location and layer
    pub fn click_remove(&mut self, ray: &Ray) -> Vec<String> {
        match self.pick(ray) {
            Some(Hittable::CellSurface { key, .. }) => self.remove_cells(key.grid_x, key.grid_z, key.layer),
            _ => Vec::new(),
        }
    }

    /// Select-tool click: toggle the lattice point under the ray
    pub fn click_select(&mut self, ray: &Ray) -> Option<usize> {
        match self.pick(ray) {
            Some(Hittable::LatticePoint { index, .. }) => {
                self.selection.toggle(index);
                Some(index)
            }
            _ => None,
        }
    }

    /// Straight-down ray over a world (x, z)
    pub fn ray_down(x: f32, z: f32) -> Ray {
        Ray::new(Vec3::new(x, 100.0, z), Vec3::NEG_Y)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn cell_count(&self) -> usize {
        self.scene.cell_count()
    }

    pub fn line_count(&self) -> usize {
        self.scene.lines().len()
    }

    pub fn has_cell(&self, key: &str) -> bool {
        self.scene.find_cell(key).is_some()
    }

    pub fn cell(&self, key: &str) -> Option<&Cell> {
        self.scene.find_cell(key)
    }

    /// Sorted cell key strings
    pub fn cell_keys(&self) -> Vec<String> {
        self.scene.cells().keys().map(CellKey::to_string).collect()
    }

    /// Validator for a cell's solid
    pub fn validate_cell(&self, key: &str) -> Option<MeshValidator<'_>> {
        self.scene.find_cell(key).map(|c| MeshValidator::new(&c.solid))
    }

    /// Layer a world height falls in
    pub fn layer_at(&self, y: f32) -> i32 {
        layer_for_height(y, self.scene.thickness())
    }
}
