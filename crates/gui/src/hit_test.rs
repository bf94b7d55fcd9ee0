//! Resolve a pointer ray to the point where a new cell should go.
//!
//! Targets are tried in priority order: existing cell surfaces, lattice
//! points, then the base plane y = 0. A later target is only considered
//! when every earlier one missed.

use glam::Vec3;
use shared::CellKey;

use crate::cell::CellMap;
use crate::grid::Grid;
use crate::viewport::picking::{pick_nearest_sphere, pick_triangle, ray_plane, Ray};

/// What the ray hit, with the data each placement rule needs
#[derive(Debug, Clone, PartialEq)]
pub enum Hittable {
    CellSurface {
        key: CellKey,
        point: Vec3,
        /// World-space normal of the hit face
        normal: Vec3,
    },
    LatticePoint {
        index: usize,
        point: Vec3,
    },
    BasePlane {
        point: Vec3,
    },
}

impl Hittable {
    pub fn point(&self) -> Vec3 {
        match self {
            Hittable::CellSurface { point, .. }
            | Hittable::LatticePoint { point, .. }
            | Hittable::BasePlane { point } => *point,
        }
    }

    /// Where a new cell attaches for this hit.
    ///
    /// Horizontal faces offset vertically by half a thickness toward the
    /// normal's side; side faces offset half a thickness along the normal.
    /// Lattice hits drop to the base layer.
    pub fn insertion_point(&self, thickness: f32) -> Vec3 {
        let half = thickness * 0.5;
        match self {
            Hittable::CellSurface { point, normal, .. } => {
                if normal.y.abs() > 0.5 {
                    *point + Vec3::Y * half.copysign(normal.y)
                } else {
                    *point + *normal * half
                }
            }
            Hittable::LatticePoint { point, .. } => Vec3::new(point.x, 0.0, point.z),
            Hittable::BasePlane { point } => *point,
        }
    }
}

/// Nearest cell face along the ray
pub fn hit_cells(ray: &Ray, cells: &CellMap) -> Option<Hittable> {
    let mut best: Option<(f32, Hittable)> = None;
    for (key, cell) in cells {
        if let Some(hit) = pick_triangle(ray, &cell.solid) {
            if best.as_ref().is_none_or(|(d, _)| hit.distance < *d) {
                best = Some((
                    hit.distance,
                    Hittable::CellSurface {
                        key: key.clone(),
                        point: ray.at(hit.distance),
                        normal: hit.normal,
                    },
                ));
            }
        }
    }
    best.map(|(_, h)| h)
}

/// Nearest lattice point marker along the ray
pub fn hit_lattice(ray: &Ray, grid: &Grid, point_radius: f32) -> Option<Hittable> {
    pick_nearest_sphere(ray, grid.points.iter().map(|p| p.position), point_radius).map(
        |(index, dist)| Hittable::LatticePoint {
            index,
            point: ray.at(dist),
        },
    )
}

/// Intersection with the base plane y = 0
pub fn hit_base_plane(ray: &Ray) -> Option<Hittable> {
    ray_plane(ray, Vec3::Y, 0.0).map(|t| Hittable::BasePlane { point: ray.at(t) })
}

/// First target hit in priority order
pub fn resolve_hit(ray: &Ray, cells: &CellMap, grid: &Grid, point_radius: f32) -> Option<Hittable> {
    hit_cells(ray, cells)
        .or_else(|| hit_lattice(ray, grid, point_radius))
        .or_else(|| hit_base_plane(ray))
}

/// World point where a new cell should be inserted, if any
pub fn resolve_insertion_point(
    ray: &Ray,
    cells: &CellMap,
    grid: &Grid,
    point_radius: f32,
    thickness: f32,
) -> Option<Vec3> {
    resolve_hit(ray, cells, grid, point_radius).map(|hit| hit.insertion_point(thickness))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::place_cell;

    const T: f32 = 0.5;

    fn scene_with_center_cell() -> (Grid, CellMap) {
        let grid = Grid::build(5, 1.0).unwrap();
        let loc = grid.locate_cell(0.5, 0.5).unwrap();
        let mut cells = CellMap::new();
        let key = CellKey::new(loc.grid_x, loc.grid_z, 0, "#ff0000".parse().unwrap());
        place_cell(&mut cells, &grid, key, &loc, T).unwrap();
        (grid, cells)
    }

    #[test]
    fn test_top_face_offsets_up() {
        let (grid, cells) = scene_with_center_cell();
        let ray = Ray::new(Vec3::new(0.3, 10.0, 0.6), Vec3::NEG_Y);
        let hit = resolve_hit(&ray, &cells, &grid, 0.05).unwrap();
        let Hittable::CellSurface { point, normal, .. } = &hit else {
            panic!("expected cell hit, got {hit:?}");
        };
        assert!((normal.y - 1.0).abs() < 1e-5);
        assert!((point.y - 0.5).abs() < 1e-5);
        let insert = hit.insertion_point(T);
        assert!((insert.y - (point.y + T / 2.0)).abs() < 1e-5);
    }

    #[test]
    fn test_bottom_face_offsets_down() {
        let (grid, cells) = scene_with_center_cell();
        let ray = Ray::new(Vec3::new(0.3, -10.0, 0.6), Vec3::Y);
        let insert = resolve_insertion_point(&ray, &cells, &grid, 0.05, T).unwrap();
        assert!((insert.y + T / 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_side_face_offsets_along_normal() {
        let (grid, cells) = scene_with_center_cell();
        let ray = Ray::new(Vec3::new(10.0, 0.25, 0.3), Vec3::NEG_X);
        let hit = resolve_hit(&ray, &cells, &grid, 0.05).unwrap();
        let Hittable::CellSurface { point, normal, .. } = &hit else {
            panic!("expected cell hit, got {hit:?}");
        };
        assert!((*normal - Vec3::X).length() < 1e-5);
        let insert = hit.insertion_point(T);
        assert!((insert - (*point + Vec3::X * T / 2.0)).length() < 1e-5);
        assert!((insert.x - 1.25).abs() < 1e-5);
    }

    #[test]
    fn test_lattice_point_forces_base_layer() {
        let grid = Grid::build(5, 1.0).unwrap();
        let cells = CellMap::new();
        let ray = Ray::new(Vec3::new(1.0, 10.0, 1.0), Vec3::NEG_Y);
        let hit = resolve_hit(&ray, &cells, &grid, 0.05).unwrap();
        assert!(matches!(hit, Hittable::LatticePoint { .. }));
        let insert = hit.insertion_point(T);
        assert_eq!(insert.y, 0.0);
        assert!((insert.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_falls_back_to_base_plane() {
        let grid = Grid::build(5, 1.0).unwrap();
        let cells = CellMap::new();
        let ray = Ray::new(Vec3::new(0.3, 4.0, 0.4), Vec3::new(0.0, -1.0, 0.0));
        let hit = resolve_hit(&ray, &cells, &grid, 0.05).unwrap();
        assert!(matches!(hit, Hittable::BasePlane { .. }));
        let p = hit.point();
        assert!(p.y.abs() < 1e-6);
        assert!((p.x - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_parallel_ray_misses_everything() {
        let grid = Grid::build(5, 1.0).unwrap();
        let cells = CellMap::new();
        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), Vec3::X);
        assert!(resolve_insertion_point(&ray, &cells, &grid, 0.05, T).is_none());
    }

    #[test]
    fn test_cells_take_priority_over_points() {
        let (grid, cells) = scene_with_center_cell();
        // Straight down onto a lattice point covered by the cell's corner
        let ray = Ray::new(Vec3::new(0.02, 10.0, 0.01), Vec3::NEG_Y);
        let hit = resolve_hit(&ray, &cells, &grid, 0.05).unwrap();
        assert!(matches!(hit, Hittable::CellSurface { .. }));
    }
}
