//! Edge extraction for cell outlines
//!
//! Collects triangle edges, merges the ones shared by two faces and keeps
//! those where the faces meet at an angle (plus open boundary edges).

use std::collections::BTreeMap;

use glam::Vec3;

use super::mesh::{LineMeshData, MeshData};

/// Represents an edge in a mesh
#[derive(Debug, Clone)]
pub struct MeshEdge {
    pub start: Vec3,
    pub end: Vec3,
    pub normal1: Vec3,
    pub normal2: Option<Vec3>,
}

impl MeshEdge {
    /// Angle between the normals of the adjacent faces (in radians)
    pub fn dihedral_angle(&self) -> f32 {
        match self.normal2 {
            Some(n2) => self.normal1.dot(n2).clamp(-1.0, 1.0).acos(),
            None => 0.0,
        }
    }

    /// Boundary edge or faces meeting at more than `threshold_degrees`
    pub fn is_sharp(&self, threshold_degrees: f32) -> bool {
        self.normal2.is_none() || self.dihedral_angle().to_degrees() > threshold_degrees
    }
}

type QuantizedPos = (i64, i64, i64);

fn quantize_position(pos: Vec3) -> QuantizedPos {
    let scale = 10000.0;
    (
        (pos.x * scale).round() as i64,
        (pos.y * scale).round() as i64,
        (pos.z * scale).round() as i64,
    )
}

fn edge_key(p1: QuantizedPos, p2: QuantizedPos) -> (QuantizedPos, QuantizedPos) {
    if p1 < p2 { (p1, p2) } else { (p2, p1) }
}

/// Extract all edges from a mesh, in a stable order
pub fn extract_edges(mesh: &MeshData) -> Vec<MeshEdge> {
    let mut edge_map: BTreeMap<(QuantizedPos, QuantizedPos), MeshEdge> = BTreeMap::new();

    for tri_idx in 0..mesh.triangle_count() {
        let [v0, v1, v2] = mesh.triangle(tri_idx);
        let normal = mesh.face_normal(tri_idx);

        let q0 = quantize_position(v0);
        let q1 = quantize_position(v1);
        let q2 = quantize_position(v2);

        for (qa, qb, va, vb) in [(q0, q1, v0, v1), (q1, q2, v1, v2), (q2, q0, v2, v0)] {
            edge_map
                .entry(edge_key(qa, qb))
                .and_modify(|e| {
                    if e.normal2.is_none() {
                        e.normal2 = Some(normal);
                    }
                })
                .or_insert(MeshEdge {
                    start: va,
                    end: vb,
                    normal1: normal,
                    normal2: None,
                });
        }
    }

    edge_map.into_values().collect()
}

/// Extract only sharp edges
pub fn extract_sharp_edges(mesh: &MeshData, threshold_degrees: f32) -> Vec<MeshEdge> {
    extract_edges(mesh)
        .into_iter()
        .filter(|e| e.is_sharp(threshold_degrees))
        .collect()
}

/// Line segments along the sharp edges of a solid
pub fn extract_outline(mesh: &MeshData, threshold_degrees: f32, color: [f32; 4]) -> LineMeshData {
    let mut lines = LineMeshData::default();
    for edge in extract_sharp_edges(mesh, threshold_degrees) {
        lines.push_segment(edge.start, edge.end, color);
    }
    lines
}
