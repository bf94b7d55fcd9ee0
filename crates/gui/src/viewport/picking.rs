use glam::Vec3;

use super::mesh::MeshData;

/// A ray in world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Compute AABB over the vertex positions of a mesh
    pub fn from_mesh(data: &MeshData) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for p in data.positions() {
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Möller-Trumbore ray-triangle intersection algorithm.
/// Returns the distance along the ray if hit, or None if no intersection.
pub fn ray_triangle_intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    // Outside triangle (u)
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    // Outside triangle (v)
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    // Intersection is behind ray origin
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Result of picking a triangle in a mesh
#[derive(Clone, Debug)]
pub struct TriangleHit {
    /// Index of the triangle (into mesh.indices / 3)
    pub triangle_index: usize,
    /// Distance from ray origin to hit point
    pub distance: f32,
    /// Geometric normal of the hit triangle
    pub normal: Vec3,
}

/// Find the nearest triangle in a mesh intersected by the ray.
pub fn pick_triangle(ray: &Ray, mesh: &MeshData) -> Option<TriangleHit> {
    let mut best: Option<TriangleHit> = None;

    for tri_idx in 0..mesh.triangle_count() {
        let [v0, v1, v2] = mesh.triangle(tri_idx);
        if let Some(dist) = ray_triangle_intersect(ray, v0, v1, v2) {
            if best.as_ref().is_none_or(|b| dist < b.distance) {
                best = Some(TriangleHit {
                    triangle_index: tri_idx,
                    distance: dist,
                    normal: mesh.face_normal(tri_idx),
                });
            }
        }
    }

    best
}

/// Nearest non-negative distance at which the ray meets a sphere.
/// A ray starting inside the sphere reports the exit point.
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let t0 = -b - sqrt_disc;
    let t1 = -b + sqrt_disc;
    if t1 < 0.0 {
        None
    } else if t0 < 0.0 {
        Some(t1)
    } else {
        Some(t0)
    }
}

/// Distance along the ray to the plane `normal . p = offset`.
///
/// `None` when the ray is parallel to the plane (and not lying in it)
/// or the plane is behind the origin.
pub fn ray_plane(ray: &Ray, normal: Vec3, offset: f32) -> Option<f32> {
    let denom = normal.dot(ray.direction);
    let dist_origin = normal.dot(ray.origin) - offset;
    if denom == 0.0 {
        return (dist_origin == 0.0).then_some(0.0);
    }
    let t = -dist_origin / denom;
    (t >= 0.0).then_some(t)
}

/// Pick the nearest sphere among `centers`; returns (index, distance)
pub fn pick_nearest_sphere<I>(ray: &Ray, centers: I, radius: f32) -> Option<(usize, f32)>
where
    I: IntoIterator<Item = Vec3>,
{
    let mut best: Option<(usize, f32)> = None;
    for (idx, center) in centers.into_iter().enumerate() {
        if let Some(dist) = ray_sphere(ray, center, radius) {
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((idx, dist));
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_triangle_hit_and_miss() {
        let ray = Ray::new(Vec3::new(0.25, 1.0, 0.25), Vec3::NEG_Y);
        let hit = ray_triangle_intersect(&ray, Vec3::ZERO, Vec3::Z, Vec3::X);
        assert!((hit.unwrap() - 1.0).abs() < 1e-6);

        let miss = Ray::new(Vec3::new(2.0, 1.0, 2.0), Vec3::NEG_Y);
        assert!(ray_triangle_intersect(&miss, Vec3::ZERO, Vec3::Z, Vec3::X).is_none());
    }

    #[test]
    fn test_ray_sphere() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        let t = ray_sphere(&ray, Vec3::ZERO, 0.5).unwrap();
        assert!((t - 4.5).abs() < 1e-5);
        assert!(ray_sphere(&ray, Vec3::new(2.0, 0.0, 0.0), 0.5).is_none());

        let inside = Ray::new(Vec3::ZERO, Vec3::X);
        assert!((ray_sphere(&inside, Vec3::ZERO, 0.5).unwrap() - 0.5).abs() < 1e-5);

        let away = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(ray_sphere(&away, Vec3::ZERO, 0.5).is_none());
    }

    #[test]
    fn test_ray_plane() {
        let down = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, -1.0, 1.0));
        let t = ray_plane(&down, Vec3::Y, 0.0).unwrap();
        let p = down.at(t);
        assert!(p.y.abs() < 1e-5);
        assert!((p.z - 5.0).abs() < 1e-5);

        let parallel = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert!(ray_plane(&parallel, Vec3::Y, 0.0).is_none());

        let up = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert!(ray_plane(&up, Vec3::Y, 0.0).is_none());
    }

    #[test]
    fn test_pick_nearest_sphere() {
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        let centers = [Vec3::new(3.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0)];
        let (idx, _) = pick_nearest_sphere(&ray, centers, 0.1).unwrap();
        assert_eq!(idx, 1);
    }
}
