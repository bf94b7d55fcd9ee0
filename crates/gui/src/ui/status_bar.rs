use egui::Ui;

use crate::state::{AppState, DragState, Tool};

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        let size = state.scene.grid().size();
        ui.weak(format!("Grid: {size}x{size}"));
        ui.separator();
        ui.weak(format!("Cells: {}", state.scene.cell_count()));
        ui.separator();
        ui.weak(format!("Lines: {}", state.scene.lines().len()));
        ui.separator();

        let hint = match (state.tool, state.selection.drag) {
            (_, Some(DragState::Point(index))) => {
                let p = state.scene.grid().point_ref(index);
                format!("Moving point ({}, {})", p.i, p.j)
            }
            (_, Some(DragState::LineMarker(..))) => "Moving line marker".to_string(),
            (Tool::Place, None) => "Click a cell, point or the ground to place".to_string(),
            (Tool::Remove, None) => "Click a cell to remove its layer".to_string(),
            (Tool::SelectPoints, None) => {
                format!("Selected: {} (Enter creates a line)", state.selection.count())
            }
            (Tool::Move, None) => "Drag points or line markers".to_string(),
        };
        ui.label(format!("{}: {hint}", state.tool.label()));

        // Right-aligned version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(format!("CellGrid v0.1 (rev {})", state.scene.version()));
        });
    });
}
