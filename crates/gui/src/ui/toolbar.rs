//! Toolbar actions and UI

use egui::Ui;
use shared::CellColor;

use crate::state::{AppState, Tool};

// ── Public actions (callable from menus and shortcuts too) ─────────

/// Create a parallel line through the selected points, in selection order
pub fn action_create_line(state: &mut AppState) {
    let points = state.selection.points().to_vec();
    match state.scene.create_line(&points) {
        Ok(Some(id)) => {
            tracing::info!("Created parallel line {id}");
            state.selection.clear();
        }
        Ok(None) => tracing::warn!("Select at least two lattice points to create a line"),
        Err(e) => tracing::error!("Cannot create line: {e}"),
    }
}

pub fn action_clear_lines(state: &mut AppState) {
    state.scene.clear_lines();
}

/// Start over with an empty scene on the current lattice
pub fn action_clear_scene(state: &mut AppState) {
    if let Err(e) = state.scene.clear() {
        tracing::error!("Failed to clear scene: {e}");
    }
    state.selection.clear();
}

pub fn set_tool(state: &mut AppState, tool: Tool) {
    if state.tool != tool {
        tracing::debug!("Tool: {}", tool.label());
        state.tool = tool;
        state.selection.drag = None;
    }
}

// ── UI ──────────────────────────────────────────────────────────

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        for &tool in Tool::all() {
            if ui.selectable_label(state.tool == tool, tool.label()).clicked() {
                set_tool(state, tool);
            }
        }

        ui.separator();

        ui.label("Colour");
        let mut rgb = state.color.rgb_u8();
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            state.color = CellColor::from_rgb(rgb[0], rgb[1], rgb[2]);
        }
        ui.weak(state.color.as_str());

        ui.separator();

        let selected = state.selection.count();
        if ui
            .add_enabled(selected >= 2, egui::Button::new(format!("Create line ({selected})")))
            .on_hover_text("Parallel line through the selected points (Enter)")
            .clicked()
        {
            action_create_line(state);
        }
        if ui
            .add_enabled(!state.scene.lines().is_empty(), egui::Button::new("Clear lines"))
            .clicked()
        {
            action_clear_lines(state);
        }

        ui.separator();

        if ui
            .add_enabled(state.scene.can_undo(), egui::Button::new("Undo"))
            .clicked()
        {
            state.scene.undo();
        }
        if ui
            .add_enabled(state.scene.can_redo(), egui::Button::new("Redo"))
            .clicked()
        {
            state.scene.redo();
        }
    });
}
