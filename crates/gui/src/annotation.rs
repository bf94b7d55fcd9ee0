//! Parallel lines: user-drawn polylines through selected lattice points,
//! with two draggable endpoints and a centroid handle.

use glam::Vec3;
use shared::{LineRecord, PointRef};

use crate::grid::Grid;
use crate::viewport::picking::{ray_sphere, Ray};

/// Which marker of a line is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Start,
    End,
    Handle,
}

/// A draggable sphere marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub position: Vec3,
    pub radius: f32,
}

/// Marker sizes for new lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerSizes {
    pub endpoint_radius: f32,
    pub handle_radius: f32,
}

impl Default for MarkerSizes {
    fn default() -> Self {
        Self {
            endpoint_radius: 0.1,
            handle_radius: 0.15,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParallelLine {
    pub id: String,
    /// Selected lattice point indices, in selection order
    pub points: Vec<usize>,
    /// Polyline vertices
    pub polyline: Vec<Vec3>,
    /// Start and end markers
    pub endpoints: [Marker; 2],
    pub handle: Marker,
    /// Handle position at the previous update, used for drag deltas
    pub last_position: Vec3,
    pub is_dragging: bool,
    pub dragged: Option<DragTarget>,
}

impl ParallelLine {
    pub fn endpoint_center(&self) -> Vec3 {
        (self.endpoints[0].position + self.endpoints[1].position) * 0.5
    }

    fn handle_dragged(&self) -> bool {
        self.is_dragging && self.dragged == Some(DragTarget::Handle)
    }

    pub fn begin_drag(&mut self, target: DragTarget) {
        self.is_dragging = true;
        self.dragged = Some(target);
    }

    /// Move the dragged marker to `position`.
    ///
    /// Dragging the handle translates both endpoints by the handle's
    /// displacement since the last update.
    pub fn drag_to(&mut self, position: Vec3) {
        match self.dragged {
            Some(DragTarget::Start) => self.endpoints[0].position = position,
            Some(DragTarget::End) => self.endpoints[1].position = position,
            Some(DragTarget::Handle) => {
                let delta = position - self.last_position;
                for endpoint in &mut self.endpoints {
                    endpoint.position += delta;
                }
                self.handle.position = position;
                self.last_position = position;
            }
            None => {}
        }
    }

    pub fn end_drag(&mut self) {
        self.is_dragging = false;
        self.dragged = None;
    }

    /// Nearest marker hit by the ray
    pub fn pick_marker(&self, ray: &Ray) -> Option<(DragTarget, f32)> {
        let markers = [
            (DragTarget::Start, self.endpoints[0]),
            (DragTarget::End, self.endpoints[1]),
            (DragTarget::Handle, self.handle),
        ];
        markers
            .into_iter()
            .filter_map(|(target, m)| ray_sphere(ray, m.position, m.radius).map(|d| (target, d)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    pub fn to_record(&self, grid: &Grid) -> LineRecord {
        LineRecord {
            points: self.points.iter().map(|&idx| grid.point_ref(idx)).collect(),
            start: self.endpoints[0].position.to_array(),
            end: self.endpoints[1].position.to_array(),
        }
    }
}

/// Create a line through `selected` (point indices into `grid.points`).
///
/// Needs at least two points; otherwise logs and returns `None`.
/// Only the first and last points become draggable endpoints.
pub fn create_annotation(
    grid: &Grid,
    selected: &[usize],
    sizes: MarkerSizes,
) -> Option<ParallelLine> {
    if selected.len() < 2 {
        tracing::warn!("Need at least 2 points to create a parallel line, got {}", selected.len());
        return None;
    }
    if let Some(&bad) = selected.iter().find(|&&idx| idx >= grid.points.len()) {
        tracing::warn!("Ignoring parallel line through unknown point index {bad}");
        return None;
    }

    let polyline: Vec<Vec3> = selected
        .iter()
        .map(|&idx| grid.points[idx].position)
        .collect();
    let start = polyline[0];
    let end = polyline[polyline.len() - 1];
    let center = (start + end) * 0.5;

    let line = ParallelLine {
        id: uuid::Uuid::new_v4().to_string(),
        points: selected.to_vec(),
        polyline,
        endpoints: [
            Marker {
                position: start,
                radius: sizes.endpoint_radius,
            },
            Marker {
                position: end,
                radius: sizes.endpoint_radius,
            },
        ],
        handle: Marker {
            position: center,
            radius: sizes.handle_radius,
        },
        last_position: center,
        is_dragging: false,
        dragged: None,
    };
    tracing::info!("Created parallel line {} through {} point(s)", line.id, selected.len());
    Some(line)
}

/// Rebuild a line from a persisted record
pub fn restore_annotation(
    grid: &Grid,
    record: &LineRecord,
    sizes: MarkerSizes,
) -> Option<ParallelLine> {
    let indices: Option<Vec<usize>> = record
        .points
        .iter()
        .map(|PointRef { i, j }| grid.index_of(*i, *j))
        .collect();
    let mut line = create_annotation(grid, &indices?, sizes)?;
    line.endpoints[0].position = Vec3::from_array(record.start);
    line.endpoints[1].position = Vec3::from_array(record.end);
    update_annotation(&mut line);
    Some(line)
}

/// Sync the polyline with the endpoints and, unless the handle is being
/// dragged, re-centre the handle between them.
pub fn update_annotation(line: &mut ParallelLine) {
    line.polyline.clear();
    line.polyline.extend(line.endpoints.iter().map(|m| m.position));

    if !line.handle_dragged() {
        let center = line.endpoint_center();
        line.handle.position = center;
        line.last_position = center;
    }
}

/// Per-frame update of every line
pub fn update_all_annotations(lines: &mut [ParallelLine]) {
    for line in lines.iter_mut() {
        update_annotation(line);
    }
}

/// Detach every line and hand back an empty collection
pub fn destroy_annotations(lines: Vec<ParallelLine>) -> Vec<ParallelLine> {
    for line in &lines {
        tracing::debug!("Removing parallel line {}", line.id);
    }
    drop(lines);
    Vec::new()
}
