//! Painter-based scene drawing: grid, cells, lattice points and parallel lines

use egui::{Color32, Painter, Pos2, Shape, Stroke};
use glam::Vec3;

use crate::state::AppState;

use super::camera::IsometricCamera;

const GRID_COLOR: Color32 = Color32::from_rgb(90, 90, 100);
const POINT_COLOR: Color32 = Color32::from_rgb(180, 180, 190);
const SELECTED_COLOR: Color32 = Color32::from_rgb(0, 220, 255);
const HOVER_COLOR: Color32 = Color32::from_rgb(255, 200, 50);
const LINE_COLOR: Color32 = Color32::from_rgb(255, 140, 0);
const HANDLE_COLOR: Color32 = Color32::from_rgb(255, 80, 160);

/// Direction the light comes from
fn light_dir() -> Vec3 {
    Vec3::new(0.5, 1.0, 0.3).normalize()
}

/// Flat lambert shading of a base colour
fn shade(rgb: [f32; 3], normal: Vec3, alpha: f32) -> Color32 {
    let intensity = 0.35 + 0.65 * normal.dot(light_dir()).max(0.0);
    let c = |v: f32| (v * intensity * 255.0).clamp(0.0, 255.0) as u8;
    Color32::from_rgba_unmultiplied(c(rgb[0]), c(rgb[1]), c(rgb[2]), (alpha * 255.0) as u8)
}

/// Screen radius of a world-space sphere, never smaller than `min_px`
fn screen_radius(camera: &IsometricCamera, rect: egui::Rect, world_radius: f32, min_px: f32) -> f32 {
    (world_radius / camera.world_per_pixel(rect)).max(min_px)
}

pub fn draw_background(painter: &Painter, rect: egui::Rect, state: &AppState) {
    let [r, g, b] = state.settings.viewport.background_color;
    painter.rect_filled(rect, 0.0, Color32::from_rgb(r, g, b));
}

/// Grid segments from their last synced positions
pub fn draw_grid(painter: &Painter, rect: egui::Rect, camera: &IsometricCamera, state: &AppState) {
    let stroke = Stroke::new(1.0, GRID_COLOR);
    for seg in &state.scene.grid().segments {
        let a = camera.project(seg.positions[0], rect);
        let b = camera.project(seg.positions[1], rect);
        if let (Some((a, _)), Some((b, _))) = (a, b) {
            painter.line_segment([a, b], stroke);
        }
    }
}

struct FaceShape {
    depth: f32,
    points: Vec<Pos2>,
    color: Color32,
}

/// Cell solids as depth-sorted flat-lit triangles, then their outlines
pub fn draw_cells(painter: &Painter, rect: egui::Rect, camera: &IsometricCamera, state: &AppState) {
    let forward = camera.forward();
    let opacity = state.settings.cells.opacity.clamp(0.0, 1.0);
    let mut faces = Vec::new();

    for cell in state.scene.cells().values() {
        let rgb = cell.color().rgb();
        for tri in 0..cell.solid.triangle_count() {
            let normal = cell.solid.face_normal(tri);
            // Back faces
            if normal.dot(forward) >= 0.0 {
                continue;
            }
            let corners = cell.solid.triangle(tri);
            let projected: Option<Vec<(Pos2, f32)>> =
                corners.iter().map(|&p| camera.project(p, rect)).collect();
            let Some(projected) = projected else {
                continue;
            };
            let depth = projected.iter().map(|(_, z)| z).sum::<f32>() / 3.0;
            faces.push(FaceShape {
                depth,
                points: projected.into_iter().map(|(p, _)| p).collect(),
                color: shade(rgb, normal, opacity),
            });
        }
    }

    // Painter's algorithm: farthest first
    faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    painter.extend(
        faces
            .into_iter()
            .map(|f| Shape::convex_polygon(f.points, f.color, Stroke::NONE)),
    );

    let outline = Stroke::new(1.2, Color32::WHITE);
    for cell in state.scene.cells().values() {
        for (a, b) in cell.outline.segments() {
            if let (Some((a, _)), Some((b, _))) = (camera.project(a, rect), camera.project(b, rect)) {
                painter.line_segment([a, b], outline);
            }
        }
    }
}

/// Lattice point markers, highlighting selection and hover
pub fn draw_points(painter: &Painter, rect: egui::Rect, camera: &IsometricCamera, state: &AppState) {
    let radius = screen_radius(camera, rect, state.settings.grid.point_radius, 2.5);
    for (idx, point) in state.scene.grid().points.iter().enumerate() {
        let Some((screen, _)) = camera.project(point.position, rect) else {
            continue;
        };
        let (color, r) = if state.selection.is_selected(idx) {
            (SELECTED_COLOR, radius * 1.6)
        } else if state.selection.hovered_point == Some(idx) {
            (HOVER_COLOR, radius * 1.4)
        } else {
            (POINT_COLOR, radius)
        };
        painter.circle_filled(screen, r, color);
    }

    // Selection order, so the first and last are recognisable
    for (order, &idx) in state.selection.points().iter().enumerate() {
        if let Some((screen, _)) = camera.project(state.scene.grid().points[idx].position, rect) {
            painter.text(
                screen + egui::vec2(6.0, -6.0),
                egui::Align2::LEFT_BOTTOM,
                format!("{}", order + 1),
                egui::FontId::monospace(11.0),
                SELECTED_COLOR,
            );
        }
    }
}

/// Parallel lines with their endpoint and handle markers
pub fn draw_lines(painter: &Painter, rect: egui::Rect, camera: &IsometricCamera, state: &AppState) {
    let stroke = Stroke::new(2.0, LINE_COLOR);
    for line in state.scene.lines() {
        let screen: Vec<Pos2> = line
            .polyline
            .iter()
            .filter_map(|&p| camera.project(p, rect).map(|(s, _)| s))
            .collect();
        if screen.len() >= 2 {
            painter.add(Shape::line(screen, stroke));
        }

        for endpoint in &line.endpoints {
            if let Some((s, _)) = camera.project(endpoint.position, rect) {
                painter.circle_filled(s, screen_radius(camera, rect, endpoint.radius, 4.0), LINE_COLOR);
            }
        }
        if let Some((s, _)) = camera.project(line.handle.position, rect) {
            let r = screen_radius(camera, rect, line.handle.radius, 5.0);
            painter.circle_filled(s, r, HANDLE_COLOR);
            painter.circle_stroke(s, r, Stroke::new(1.0, Color32::WHITE));
        }
    }
}

/// Ghost marker where a click would place a cell
pub fn draw_insertion_preview(
    painter: &Painter,
    rect: egui::Rect,
    camera: &IsometricCamera,
    point: Option<Vec3>,
) {
    if let Some((screen, _)) = point.and_then(|p| camera.project(p, rect)) {
        painter.circle_stroke(screen, 5.0, Stroke::new(1.5, HOVER_COLOR));
    }
}

/// Draw axis labels in the viewport
pub fn draw_axis_labels(painter: &Painter, rect: egui::Rect, camera: &IsometricCamera) {
    let labels = [
        (Vec3::new(1.6, 0.0, 0.0), "X", Color32::from_rgb(220, 70, 70)),
        (Vec3::new(0.0, 1.6, 0.0), "Y", Color32::from_rgb(70, 200, 70)),
        (Vec3::new(0.0, 0.0, 1.6), "Z", Color32::from_rgb(70, 110, 220)),
    ];

    let origin = rect.left_bottom() + egui::vec2(40.0, -40.0);
    let Some((center, _)) = camera.project(camera.target, rect) else {
        return;
    };
    for (dir, label, color) in &labels {
        let Some((tip, _)) = camera.project(camera.target + *dir, rect) else {
            continue;
        };
        let offset = (tip - center).normalized() * 24.0;
        painter.line_segment([origin, origin + offset], Stroke::new(2.0, *color));
        painter.text(
            origin + offset * 1.25,
            egui::Align2::CENTER_CENTER,
            *label,
            egui::FontId::monospace(12.0),
            *color,
        );
    }
}
