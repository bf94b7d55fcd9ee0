use glam::{Mat4, Vec3, Vec4};

use super::picking::Ray;

/// Isometric elevation: the camera looks down the (1, 1, 1) diagonal
pub fn isometric_elevation() -> f32 {
    (1.0 / 2.0_f32.sqrt()).atan()
}

/// Orthographic camera fixed at an isometric angle
pub struct IsometricCamera {
    /// Horizontal rotation angle (radians)
    pub azimuth: f32,
    /// Vertical angle above the ground plane (radians)
    pub elevation: f32,
    /// Distance from target
    pub distance: f32,
    /// Camera target point
    pub target: Vec3,
    /// Visible world height at zoom 1
    pub frustum_size: f32,
    /// Zoom factor; larger shows less
    pub zoom: f32,
}

impl IsometricCamera {
    pub fn new(frustum_size: f32, distance: f32) -> Self {
        Self {
            azimuth: std::f32::consts::FRAC_PI_4,
            elevation: isometric_elevation(),
            distance,
            target: Vec3::ZERO,
            frustum_size,
            zoom: 1.0,
        }
    }

    pub fn zoom_by(&mut self, delta: f32) {
        self.zoom = (self.zoom * (1.0 + delta)).clamp(0.2, 10.0);
    }

    /// Pan by a screen-space delta in world units
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.target += self.right_vector() * dx + self.up_vector() * dy;
    }

    /// Rotate around the vertical axis in 90 degree steps
    pub fn rotate_quarter(&mut self, steps: i32) {
        self.azimuth += steps as f32 * std::f32::consts::FRAC_PI_2;
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.frustum_size, self.distance);
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        let ce = self.elevation.cos();
        self.target
            + Vec3::new(
                self.distance * ce * self.azimuth.sin(),
                self.distance * self.elevation.sin(),
                self.distance * ce * self.azimuth.cos(),
            )
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye_position()).normalize_or_zero()
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        let half_h = self.frustum_size / (2.0 * self.zoom);
        let half_w = half_h * aspect;
        Mat4::orthographic_rh_gl(-half_w, half_w, -half_h, half_h, 0.1, self.distance * 4.0)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// World units per screen pixel
    pub fn world_per_pixel(&self, rect: egui::Rect) -> f32 {
        self.frustum_size / self.zoom / rect.height().max(1.0)
    }

    fn right_vector(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or_zero()
    }

    fn up_vector(&self) -> Vec3 {
        self.right_vector().cross(self.forward()).normalize_or_zero()
    }

    /// Project a 3D point to 2D screen coords and view depth
    pub fn project(&self, point: Vec3, rect: egui::Rect) -> Option<(egui::Pos2, f32)> {
        let aspect = rect.width() / rect.height();
        let p = self.view_projection(aspect) * point.extend(1.0);
        if p.w <= 0.0 {
            return None;
        }
        let ndc = p.truncate() / p.w;
        let screen_x = rect.center().x + ndc.x * rect.width() * 0.5;
        let screen_y = rect.center().y - ndc.y * rect.height() * 0.5;
        Some((egui::pos2(screen_x, screen_y), ndc.z))
    }

    /// Cast a ray from a screen position into the 3D scene.
    /// Orthographic rays are parallel: they start on the near plane.
    pub fn screen_ray(&self, screen_pos: egui::Pos2, rect: egui::Rect) -> Ray {
        let aspect = rect.width() / rect.height();

        // Screen → NDC
        let ndc_x = (screen_pos.x - rect.center().x) / (rect.width() * 0.5);
        let ndc_y = -(screen_pos.y - rect.center().y) / (rect.height() * 0.5);

        let vp_inv = self.view_projection(aspect).inverse();
        let near_world = vp_inv * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let near = near_world.truncate() / near_world.w;

        Ray::new(near, self.forward())
    }

    /// Point under the pointer on the horizontal plane at `height`
    pub fn plane_point(
        &self,
        screen_pos: egui::Pos2,
        rect: egui::Rect,
        height: f32,
    ) -> Option<Vec3> {
        let ray = self.screen_ray(screen_pos, rect);
        super::picking::ray_plane(&ray, Vec3::Y, height).map(|t| ray.at(t))
    }
}
