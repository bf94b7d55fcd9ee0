//! Mesh validation utilities.
//!
//! `MeshValidator` checks generated cell solids: stride, index range,
//! unit normals, outward winding and bounding box dimensions.

use glam::Vec3;

use crate::viewport::mesh::{MeshData, VERTEX_STRIDE};
use crate::viewport::picking::Aabb;

/// Validator for `MeshData` integrity checks.
pub struct MeshValidator<'a> {
    mesh: &'a MeshData,
}

impl<'a> MeshValidator<'a> {
    pub fn new(mesh: &'a MeshData) -> Self {
        Self { mesh }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Check that the vertex buffer length is a multiple of the stride.
    pub fn is_stride_valid(&self) -> bool {
        self.mesh.vertices.len() % VERTEX_STRIDE == 0
    }

    pub fn is_index_stride_valid(&self) -> bool {
        self.mesh.indices.len() % 3 == 0
    }

    /// Check that all indices are within the valid vertex range.
    pub fn are_indices_in_range(&self) -> bool {
        let max_idx = self.vertex_count() as u32;
        self.mesh.indices.iter().all(|&i| i < max_idx)
    }

    /// Check that all vertex normals have unit length (within epsilon).
    pub fn are_normals_normalized(&self, epsilon: f32) -> bool {
        (0..self.vertex_count()).all(|i| (self.mesh.normal(i).length() - 1.0).abs() <= epsilon)
    }

    /// Every face normal points away from the bounding box centre.
    /// Only meaningful for convex solids such as cells.
    pub fn is_outward_wound(&self) -> bool {
        let center = self.aabb().center();
        (0..self.triangle_count()).all(|tri| {
            let [a, b, c] = self.mesh.triangle(tri);
            let face_center = (a + b + c) / 3.0;
            self.mesh.face_normal(tri).dot(face_center - center) > 0.0
        })
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_mesh(self.mesh)
    }

    /// Dimensions (width, height, depth) of the bounding box.
    pub fn dimensions(&self) -> [f32; 3] {
        let aabb = self.aabb();
        (aabb.max - aabb.min).to_array()
    }

    pub fn assert_dimensions_approx(&self, expected: [f32; 3], tolerance: f32) -> bool {
        let dims = Vec3::from_array(self.dimensions());
        (dims - Vec3::from_array(expected)).abs().max_element() < tolerance
    }

    /// Distinct vertex heights, ascending
    pub fn heights(&self) -> Vec<f32> {
        let mut ys: Vec<f32> = self.mesh.positions().map(|p| p.y).collect();
        ys.sort_by(f32::total_cmp);
        ys.dedup_by(|a, b| (*a - *b).abs() < 1e-6);
        ys
    }

    /// Run all validation checks and return a list of error messages.
    /// An empty list means the mesh is valid.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.is_stride_valid() {
            errors.push(format!(
                "Vertex buffer length {} is not a multiple of {VERTEX_STRIDE}",
                self.mesh.vertices.len()
            ));
            return errors;
        }

        if !self.is_index_stride_valid() {
            errors.push(format!(
                "Index buffer length {} is not a multiple of 3",
                self.mesh.indices.len()
            ));
        }

        if !self.are_indices_in_range() {
            let max_idx = self.vertex_count() as u32;
            let out_of_range: Vec<_> = self
                .mesh
                .indices
                .iter()
                .filter(|&&i| i >= max_idx)
                .take(5)
                .collect();
            errors.push(format!(
                "Indices out of range (vertex_count={}): {:?}",
                max_idx, out_of_range
            ));
            return errors;
        }

        if self.vertex_count() > 0 && !self.are_normals_normalized(0.1) {
            errors.push("Some normals are not unit-length (epsilon=0.1)".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::build_cell_solid;

    fn unit_cell() -> MeshData {
        let corners = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
        ];
        build_cell_solid(&corners, 0.5, 0.5, [1.0, 0.0, 0.0]).unwrap()
    }

    #[test]
    fn test_cell_solid_is_valid() {
        let mesh = unit_cell();
        let v = MeshValidator::new(&mesh);
        assert!(v.validate_all().is_empty(), "{:?}", v.validate_all());
        assert!(v.is_outward_wound());
        assert!(v.assert_dimensions_approx([1.0, 0.5, 1.0], 1e-5));
        assert_eq!(v.heights(), vec![0.5, 1.0]);
    }

    #[test]
    fn test_stride_invalid() {
        let bad = MeshData {
            vertices: vec![0.0; 10],
            indices: vec![],
        };
        let v = MeshValidator::new(&bad);
        assert!(!v.is_stride_valid());
        assert_eq!(v.validate_all().len(), 1);
    }

    #[test]
    fn test_indices_out_of_range() {
        let mut mesh = unit_cell();
        mesh.indices.push(42);
        mesh.indices.extend([0, 1]);
        let v = MeshValidator::new(&mesh);
        assert!(!v.are_indices_in_range());
        assert!(v.validate_all()[0].contains("out of range"));
    }

    #[test]
    fn test_flipped_winding_detected() {
        let mut mesh = unit_cell();
        mesh.indices.swap(0, 1);
        assert!(!MeshValidator::new(&mesh).is_outward_wound());
    }

    #[test]
    fn test_unnormalized_normals() {
        let mut mesh = unit_cell();
        mesh.vertices[3] = 5.0;
        let v = MeshValidator::new(&mesh);
        assert!(!v.are_normals_normalized(0.1));
    }
}
