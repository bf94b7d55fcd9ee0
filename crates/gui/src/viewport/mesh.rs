use glam::Vec3;

/// Floats per solid vertex
pub const VERTEX_STRIDE: usize = 9;
/// Floats per line vertex
pub const LINE_VERTEX_STRIDE: usize = 7;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position(&self, index: usize) -> Vec3 {
        let base = index * VERTEX_STRIDE;
        Vec3::new(
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        )
    }

    pub fn normal(&self, index: usize) -> Vec3 {
        let base = index * VERTEX_STRIDE + 3;
        Vec3::new(
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        )
    }

    /// Corner positions of a triangle
    pub fn triangle(&self, tri_idx: usize) -> [Vec3; 3] {
        let i0 = self.indices[tri_idx * 3] as usize;
        let i1 = self.indices[tri_idx * 3 + 1] as usize;
        let i2 = self.indices[tri_idx * 3 + 2] as usize;
        [self.position(i0), self.position(i1), self.position(i2)]
    }

    /// Geometric normal of a triangle, following its winding
    pub fn face_normal(&self, tri_idx: usize) -> Vec3 {
        let [v0, v1, v2] = self.triangle(tri_idx);
        (v1 - v0).cross(v2 - v0).normalize_or_zero()
    }

    /// Iterate over vertex positions
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.vertex_count()).map(|i| self.position(i))
    }
}

/// Lines mesh: interleaved [pos.x, pos.y, pos.z, r, g, b, a], two vertices per segment
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineMeshData {
    /// 7 floats per vertex: position(3) + color(4)
    pub vertices: Vec<f32>,
}

impl LineMeshData {
    pub fn segment_count(&self) -> usize {
        self.vertices.len() / (LINE_VERTEX_STRIDE * 2)
    }

    pub fn push_segment(&mut self, a: Vec3, b: Vec3, color: [f32; 4]) {
        push_line_vert(&mut self.vertices, a.x, a.y, a.z, color);
        push_line_vert(&mut self.vertices, b.x, b.y, b.z, color);
    }

    /// Segment endpoints by index
    pub fn segment(&self, index: usize) -> (Vec3, Vec3) {
        let base = index * LINE_VERTEX_STRIDE * 2;
        let v = &self.vertices;
        (
            Vec3::new(v[base], v[base + 1], v[base + 2]),
            Vec3::new(
                v[base + LINE_VERTEX_STRIDE],
                v[base + LINE_VERTEX_STRIDE + 1],
                v[base + LINE_VERTEX_STRIDE + 2],
            ),
        )
    }

    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        (0..self.segment_count()).map(|i| self.segment(i))
    }
}

// ── Helpers ──────────────────────────────────────────────────

pub fn push_vert(v: &mut Vec<f32>, p: Vec3, n: Vec3, c: [f32; 3]) {
    v.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, c[0], c[1], c[2]]);
}

fn push_line_vert(v: &mut Vec<f32>, px: f32, py: f32, pz: f32, c: [f32; 4]) {
    v.extend_from_slice(&[px, py, pz, c[0], c[1], c[2], c[3]]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshData {
        let mut vertices = Vec::new();
        push_vert(&mut vertices, Vec3::ZERO, Vec3::Y, [1.0, 0.0, 0.0]);
        push_vert(&mut vertices, Vec3::Z, Vec3::Y, [1.0, 0.0, 0.0]);
        push_vert(&mut vertices, Vec3::X, Vec3::Y, [1.0, 0.0, 0.0]);
        MeshData {
            vertices,
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn test_face_normal_follows_winding() {
        let mesh = triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!((mesh.face_normal(0) - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_line_segments() {
        let mut lines = LineMeshData::default();
        lines.push_segment(Vec3::ZERO, Vec3::X, [1.0; 4]);
        lines.push_segment(Vec3::Y, Vec3::Z, [1.0; 4]);
        assert_eq!(lines.segment_count(), 2);
        assert_eq!(lines.segment(1), (Vec3::Y, Vec3::Z));
    }
}
