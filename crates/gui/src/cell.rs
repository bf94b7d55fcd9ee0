//! Placed cells: hexahedral solids stacked on grid quads.

use std::collections::BTreeMap;

use glam::Vec3;
use shared::{CellColor, CellKey};

use crate::error::{EditorError, EditorResult};
use crate::grid::{Grid, GridCellLocation};
use crate::viewport::edge::extract_outline;
use crate::viewport::mesh::{push_vert, LineMeshData, MeshData};

/// Default vertical size of one layer
pub const DEFAULT_CELL_THICKNESS: f32 = 0.5;

/// Faces meeting at more than this angle get an outline edge
pub const OUTLINE_THRESHOLD_DEGREES: f32 = 1.0;

const OUTLINE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Triangles of the solid. Vertices 0..4 are the bottom ring
/// (c0, c1, c3, c2), 4..8 the same ring lifted by the thickness.
/// Every triangle winds counter-clockwise seen from outside.
const SOLID_INDICES: [u32; 36] = [
    // Bottom
    0, 2, 1,
    0, 3, 2,
    // Top
    4, 5, 6,
    4, 6, 7,
    // Sides
    0, 1, 4,
    1, 5, 4,
    1, 2, 5,
    2, 6, 5,
    2, 3, 6,
    3, 7, 6,
    3, 0, 7,
    0, 4, 7,
];

/// Cells keyed by location, layer and colour
pub type CellMap = BTreeMap<CellKey, Cell>;

/// A placed cell with its derived geometry
#[derive(Debug, Clone)]
pub struct Cell {
    pub key: CellKey,
    /// Lattice point indices, same order as `GridCellLocation::corners`
    pub corners: [usize; 4],
    pub solid: MeshData,
    pub outline: LineMeshData,
    /// Corner centroid on the cell's base plane
    pub world_position: Vec3,
    /// Corner positions the current geometry was built from
    built_from: [Vec3; 4],
    /// Bumped every time the geometry is rebuilt
    revision: u64,
}

impl Cell {
    pub fn layer(&self) -> i32 {
        self.key.layer
    }

    pub fn color(&self) -> &CellColor {
        &self.key.color
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn rebuild(&mut self, corners: [Vec3; 4], thickness: f32) -> EditorResult<()> {
        let base_y = layer_base(self.key.layer, thickness);
        let solid = build_cell_solid(&corners, base_y, thickness, self.key.color.rgb())?;
        // Replacing the buffers drops the previous geometry
        self.outline = extract_outline(&solid, OUTLINE_THRESHOLD_DEGREES, OUTLINE_COLOR);
        self.solid = solid;
        self.world_position = anchor(&corners, base_y);
        self.built_from = corners;
        self.revision += 1;
        Ok(())
    }
}

/// World height of a layer's base
pub fn layer_base(layer: i32, thickness: f32) -> f32 {
    layer as f32 * thickness
}

/// Layer containing a world height
pub fn layer_for_height(y: f32, thickness: f32) -> i32 {
    (y / thickness).floor() as i32
}

fn anchor(corners: &[Vec3; 4], base_y: f32) -> Vec3 {
    let c = corners.iter().copied().sum::<Vec3>() / 4.0;
    Vec3::new(c.x, base_y, c.z)
}

/// Build the 8-vertex, 12-triangle solid spanning `base_y..base_y + thickness`
/// over four grid corners given as (i,j), (i,j+1), (i+1,j), (i+1,j+1).
///
/// Vertex normals are the normalised sum of adjacent face normals.
pub fn build_cell_solid(
    corners: &[Vec3],
    base_y: f32,
    thickness: f32,
    color: [f32; 3],
) -> EditorResult<MeshData> {
    if corners.len() < 4 {
        return Err(EditorError::InvalidArgument(format!(
            "cell solid needs 4 corners, got {}",
            corners.len()
        )));
    }

    // Walk the quad boundary rather than the row-major corner order
    let ring = [corners[0], corners[1], corners[3], corners[2]];
    let mut positions = [Vec3::ZERO; 8];
    for (k, p) in ring.iter().enumerate() {
        positions[k] = Vec3::new(p.x, base_y, p.z);
        positions[k + 4] = Vec3::new(p.x, base_y + thickness, p.z);
    }

    let mut normals = [Vec3::ZERO; 8];
    for tri in SOLID_INDICES.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += n;
        normals[b] += n;
        normals[c] += n;
    }

    let mut vertices = Vec::with_capacity(8 * 9);
    for (p, n) in positions.iter().zip(normals.iter()) {
        push_vert(&mut vertices, *p, n.normalize_or_zero(), color);
    }

    Ok(MeshData {
        vertices,
        indices: SOLID_INDICES.to_vec(),
    })
}

/// Create a cell for `key` on the located quad and insert it into `cells`.
///
/// An existing cell under the same key is replaced.
pub fn place_cell<'a>(
    cells: &'a mut CellMap,
    grid: &Grid,
    key: CellKey,
    location: &GridCellLocation,
    thickness: f32,
) -> EditorResult<&'a Cell> {
    let corners = location.corner_positions(grid);
    let mut cell = Cell {
        key: key.clone(),
        corners: location.corners,
        solid: MeshData::default(),
        outline: LineMeshData::default(),
        world_position: Vec3::ZERO,
        built_from: corners,
        revision: 0,
    };
    cell.rebuild(corners, thickness)?;

    tracing::info!("Placed cell {key}");
    cells.insert(key.clone(), cell);
    Ok(&cells[&key])
}

/// Remove every cell at a location and layer regardless of colour.
/// Returns the removed keys; removing again is a no-op.
pub fn remove_cells_at(cells: &mut CellMap, grid_x: usize, grid_z: usize, layer: i32) -> Vec<CellKey> {
    let doomed: Vec<CellKey> = cells
        .keys()
        .filter(|k| k.occupies(grid_x, grid_z, layer))
        .cloned()
        .collect();
    for key in &doomed {
        cells.remove(key);
        tracing::info!("Removed cell {key}");
    }
    doomed
}

/// Rebuild geometry of cells whose corner points moved since the last build.
/// Returns the number of rebuilt cells.
pub fn resync_cells(cells: &mut CellMap, grid: &Grid, thickness: f32) -> EditorResult<usize> {
    let mut rebuilt = 0;
    for cell in cells.values_mut() {
        let current = cell.corners.map(|idx| grid.points[idx].position);
        if current != cell.built_from {
            cell.rebuild(current, thickness)?;
            rebuilt += 1;
        }
    }
    if rebuilt > 0 {
        tracing::debug!("Rebuilt {rebuilt} cell(s)");
    }
    Ok(rebuilt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> CellColor {
        "#ff0000".parse().unwrap()
    }

    fn unit_corners() -> [Vec3; 4] {
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn test_solid_has_8_vertices_12_triangles() {
        let mesh = build_cell_solid(&unit_corners(), 0.0, 0.5, [1.0, 0.0, 0.0]).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
        for p in mesh.positions() {
            assert!(p.y == 0.0 || p.y == 0.5);
        }
    }

    #[test]
    fn test_solid_rejects_missing_corners() {
        let err = build_cell_solid(&unit_corners()[..3], 0.0, 0.5, [1.0; 3]).unwrap_err();
        assert!(matches!(err, EditorError::InvalidArgument(_)));
    }

    #[test]
    fn test_faces_point_outward() {
        let mesh = build_cell_solid(&unit_corners(), 1.0, 0.5, [1.0; 3]).unwrap();
        let center = Vec3::new(0.5, 1.25, 0.5);
        for tri in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle(tri);
            let face_center = (a + b + c) / 3.0;
            assert!(mesh.face_normal(tri).dot(face_center - center) > 0.0, "triangle {tri}");
        }
    }

    #[test]
    fn test_smooth_normals_point_away_from_center() {
        let mesh = build_cell_solid(&unit_corners(), 0.0, 0.5, [1.0; 3]).unwrap();
        let center = Vec3::new(0.5, 0.25, 0.5);
        for v in 0..mesh.vertex_count() {
            let n = mesh.normal(v);
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(n.dot(mesh.position(v) - center) > 0.0);
        }
    }

    #[test]
    fn test_outline_has_box_edges() {
        let grid = Grid::build(3, 1.0).unwrap();
        let loc = grid.locate_cell(0.5, 0.5).unwrap();
        let mut cells = CellMap::new();
        let key = CellKey::new(loc.grid_x, loc.grid_z, 0, red());
        let cell = place_cell(&mut cells, &grid, key, &loc, 0.5).unwrap();
        assert_eq!(cell.outline.segment_count(), 12);
        assert_eq!(cell.world_position, Vec3::new(0.5, 0.0, 0.5));
    }

    #[test]
    fn test_remove_ignores_color_and_is_idempotent() {
        let grid = Grid::build(3, 1.0).unwrap();
        let loc = grid.locate_cell(0.5, 0.5).unwrap();
        let mut cells = CellMap::new();
        for color in ["#ff0000", "#00ff00"] {
            let key = CellKey::new(1, 1, 2, color.parse().unwrap());
            place_cell(&mut cells, &grid, key, &loc, 0.5).unwrap();
        }
        place_cell(&mut cells, &grid, CellKey::new(1, 1, 3, red()), &loc, 0.5).unwrap();

        let removed = remove_cells_at(&mut cells, 1, 1, 2);
        assert_eq!(removed.len(), 2);
        assert!(cells.keys().all(|k| !k.occupies(1, 1, 2)));
        assert_eq!(cells.len(), 1);
        assert!(remove_cells_at(&mut cells, 1, 1, 2).is_empty());
    }

    #[test]
    fn test_resync_only_rebuilds_moved_cells() {
        let mut grid = Grid::build(4, 1.0).unwrap();
        let mut cells = CellMap::new();
        let near = grid.locate_cell(-1.0, -1.0).unwrap();
        let far = grid.locate_cell(1.0, 1.0).unwrap();
        let near_key = CellKey::new(near.grid_x, near.grid_z, 0, red());
        let far_key = CellKey::new(far.grid_x, far.grid_z, 0, red());
        place_cell(&mut cells, &grid, near_key.clone(), &near, 0.5).unwrap();
        place_cell(&mut cells, &grid, far_key.clone(), &far, 0.5).unwrap();

        assert_eq!(resync_cells(&mut cells, &grid, 0.5).unwrap(), 0);

        // (0,0) is only a corner of the near quad
        grid.move_point(0, 0, Vec3::new(-2.0, 0.0, -2.0)).unwrap();
        assert_eq!(resync_cells(&mut cells, &grid, 0.5).unwrap(), 1);
        assert_eq!(cells[&near_key].revision(), 2);
        assert_eq!(cells[&far_key].revision(), 1);
        assert!(cells[&near_key]
            .solid
            .positions()
            .any(|p| (p.x + 2.0).abs() < 1e-6 && (p.z + 2.0).abs() < 1e-6));
    }

    #[test]
    fn test_layer_helpers() {
        assert_eq!(layer_for_height(0.0, 0.5), 0);
        assert_eq!(layer_for_height(0.75, 0.5), 1);
        assert_eq!(layer_for_height(-0.25, 0.5), -1);
        assert_eq!(layer_base(3, 0.5), 1.5);
    }
}
