//! Lattice of grid points and the segments connecting neighbours.
//!
//! Points are laid out row-major (`i * size + j`), centred on the origin in
//! the XZ plane. Cell lookup uses the bounding box of each quad's corners, so
//! it keeps working after points are dragged away from their lattice slots.

use glam::Vec3;
use shared::PointRef;

use crate::error::{EditorError, EditorResult};

/// A lattice point: grid index plus its current world position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub i: usize,
    pub j: usize,
    pub position: Vec3,
}

/// Segment between two adjacent points, with its last synced endpoints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSegment {
    pub a: usize,
    pub b: usize,
    pub positions: [Vec3; 2],
}

/// Grid quad containing a query point.
///
/// Corners are point indices in the order (i,j), (i,j+1), (i+1,j), (i+1,j+1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCellLocation {
    pub grid_x: usize,
    pub grid_z: usize,
    pub local: Vec3,
    pub corners: [usize; 4],
}

impl GridCellLocation {
    pub fn corner_positions(&self, grid: &Grid) -> [Vec3; 4] {
        self.corners.map(|idx| grid.points[idx].position)
    }
}

/// The lattice owned by the editing session
#[derive(Debug, Clone)]
pub struct Grid {
    size: usize,
    spacing: f32,
    pub points: Vec<GridPoint>,
    pub segments: Vec<GridSegment>,
    dirty: bool,
}

impl Grid {
    /// Build a `size` x `size` lattice with the given spacing.
    pub fn build(size: usize, spacing: f32) -> EditorResult<Self> {
        if size == 0 {
            return Err(EditorError::InvalidArgument(
                "grid size must be positive".into(),
            ));
        }
        if !(spacing > 0.0) {
            return Err(EditorError::InvalidArgument(format!(
                "grid spacing must be positive, got {spacing}"
            )));
        }

        let count = size
            .checked_mul(size)
            .ok_or_else(|| EditorError::InvalidArgument(format!("grid size {size} is too large")))?;

        let half = (size - 1) as f32 * spacing / 2.0;
        let mut points = Vec::with_capacity(count);
        for i in 0..size {
            for j in 0..size {
                points.push(GridPoint {
                    i,
                    j,
                    position: Vec3::new(i as f32 * spacing - half, 0.0, j as f32 * spacing - half),
                });
            }
        }

        let mut segments = Vec::with_capacity(2 * size * (size - 1));
        // Along j
        for i in 0..size {
            for j in 0..size - 1 {
                segments.push(Self::segment(&points, i * size + j, i * size + j + 1));
            }
        }
        // Along i
        for i in 0..size - 1 {
            for j in 0..size {
                segments.push(Self::segment(&points, i * size + j, (i + 1) * size + j));
            }
        }

        Ok(Self {
            size,
            spacing,
            points,
            segments,
            dirty: false,
        })
    }

    fn segment(points: &[GridPoint], a: usize, b: usize) -> GridSegment {
        GridSegment {
            a,
            b,
            positions: [points[a].position, points[b].position],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn index_of(&self, i: usize, j: usize) -> Option<usize> {
        (i < self.size && j < self.size).then_some(i * self.size + j)
    }

    pub fn point(&self, i: usize, j: usize) -> Option<&GridPoint> {
        self.index_of(i, j).map(|idx| &self.points[idx])
    }

    pub fn point_ref(&self, index: usize) -> PointRef {
        let p = &self.points[index];
        PointRef { i: p.i, j: p.j }
    }

    fn quad_corners(&self, i: usize, j: usize) -> [usize; 4] {
        let size = self.size;
        [
            i * size + j,
            i * size + j + 1,
            (i + 1) * size + j,
            (i + 1) * size + j + 1,
        ]
    }

    /// Quad (`grid_x`, `grid_z`) addressed directly, located at its corner centroid
    pub fn quad(&self, grid_x: usize, grid_z: usize) -> EditorResult<GridCellLocation> {
        if grid_x + 1 >= self.size || grid_z + 1 >= self.size {
            return Err(EditorError::InvalidArgument(format!(
                "no grid cell at ({grid_x}, {grid_z})"
            )));
        }
        let corners = self.quad_corners(grid_x, grid_z);
        let local = corners.iter().map(|&c| self.points[c].position).sum::<Vec3>() / 4.0;
        Ok(GridCellLocation {
            grid_x,
            grid_z,
            local,
            corners,
        })
    }

    /// Find the first quad (row-major) whose corner bounding box contains (x, z).
    ///
    /// Points on a shared edge resolve to the lower-index quad.
    pub fn locate_cell(&self, world_x: f32, world_z: f32) -> Option<GridCellLocation> {
        let size = self.size;
        for i in 0..size.saturating_sub(1) {
            for j in 0..size - 1 {
                let corners = self.quad_corners(i, j);
                let (mut min_x, mut max_x) = (f32::MAX, f32::MIN);
                let (mut min_z, mut max_z) = (f32::MAX, f32::MIN);
                for &c in &corners {
                    let p = self.points[c].position;
                    min_x = min_x.min(p.x);
                    max_x = max_x.max(p.x);
                    min_z = min_z.min(p.z);
                    max_z = max_z.max(p.z);
                }

                if world_x >= min_x && world_x <= max_x && world_z >= min_z && world_z <= max_z {
                    return Some(GridCellLocation {
                        grid_x: i,
                        grid_z: j,
                        local: Vec3::new(world_x, 0.0, world_z),
                        corners,
                    });
                }
            }
        }
        None
    }

    /// `locate_cell` carrying the full 3D query position through
    pub fn to_grid_position(&self, world: Vec3) -> Option<GridCellLocation> {
        self.locate_cell(world.x, world.z).map(|loc| GridCellLocation {
            local: world,
            ..loc
        })
    }

    /// Move a point, keeping it on the grid plane. Marks segments for resync.
    pub fn move_point(&mut self, i: usize, j: usize, position: Vec3) -> EditorResult<()> {
        let idx = self.index_of(i, j).ok_or(EditorError::UnknownPoint { i, j })?;
        self.points[idx].position = Vec3::new(position.x, 0.0, position.z);
        self.dirty = true;
        Ok(())
    }

    /// Restore point positions in row-major order, pinned to the grid plane
    pub fn set_positions(&mut self, positions: &[Vec3]) -> EditorResult<()> {
        if positions.len() != self.points.len() {
            return Err(EditorError::InvalidArgument(format!(
                "expected {} point positions, got {}",
                self.points.len(),
                positions.len()
            )));
        }
        for (point, pos) in self.points.iter_mut().zip(positions) {
            point.position = Vec3::new(pos.x, 0.0, pos.z);
        }
        self.dirty = true;
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rewrite segment endpoints from current point positions.
    /// Returns the number of segments whose endpoints changed.
    pub fn resync_lines(&mut self) -> usize {
        if !self.dirty {
            return 0;
        }
        let mut changed = 0;
        for seg in &mut self.segments {
            let next = [self.points[seg.a].position, self.points[seg.b].position];
            if seg.positions != next {
                seg.positions = next;
                changed += 1;
            }
        }
        self.dirty = false;
        changed
    }
}
