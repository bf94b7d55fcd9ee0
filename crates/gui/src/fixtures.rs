//! Factory functions for creating test data.
//!
//! Helpers to construct `SceneSnapshot`s and their parts for tests and
//! for scripted sessions.

use shared::*;

// ── Grid factories ──────────────────────────────────────────────

/// Row-major point positions of an undisturbed lattice
pub fn lattice_points(size: usize, spacing: f32) -> Vec<[f32; 3]> {
    let half = size.saturating_sub(1) as f32 * spacing / 2.0;
    (0..size)
        .flat_map(|i| (0..size).map(move |j| [i as f32 * spacing - half, 0.0, j as f32 * spacing - half]))
        .collect()
}

/// Snapshot of an empty scene
pub fn empty_scene(size: usize, spacing: f32) -> SceneSnapshot {
    SceneSnapshot {
        version: SNAPSHOT_VERSION,
        grid_size: size,
        spacing,
        thickness: 0.5,
        points: lattice_points(size, spacing),
        cells: Vec::new(),
        lines: Vec::new(),
    }
}

// ── Cell factories ──────────────────────────────────────────────

/// Cell key from a colour string; panics on a bad colour
pub fn cell_key(grid_x: usize, grid_z: usize, layer: i32, color: &str) -> CellKey {
    let color = color
        .parse()
        .unwrap_or_else(|e| panic!("fixture colour {color:?}: {e}"));
    CellKey::new(grid_x, grid_z, layer, color)
}

/// 5x5 scene with one red cell on quad (2, 2), layer 0
pub fn single_cell_scene() -> SceneSnapshot {
    let mut scene = empty_scene(5, 1.0);
    scene.cells.push(cell_key(2, 2, 0, "#ff0000"));
    scene
}

/// Column of `height` cells on quad (x, z), alternating red and blue
pub fn stacked_cells_scene(size: usize, x: usize, z: usize, height: i32) -> SceneSnapshot {
    let mut scene = empty_scene(size, 1.0);
    for layer in 0..height {
        let color = if layer % 2 == 0 { "#ff0000" } else { "#0000ff" };
        scene.cells.push(cell_key(x, z, layer, color));
    }
    scene
}

// ── Line factories ──────────────────────────────────────────────

/// Line record through lattice points, endpoints at the first and last
pub fn line_through(scene: &SceneSnapshot, points: &[(usize, usize)]) -> LineRecord {
    let position = |&(i, j): &(usize, usize)| scene.points[i * scene.grid_size + j];
    LineRecord {
        points: points.iter().map(|&(i, j)| PointRef { i, j }).collect(),
        start: points.first().map(position).unwrap_or_default(),
        end: points.last().map(position).unwrap_or_default(),
    }
}

/// Serialize a snapshot for `load_scene_json`
pub fn to_json(scene: &SceneSnapshot) -> String {
    serde_json::to_string_pretty(scene).unwrap_or_default()
}
