//! Application menu bar and settings window

use eframe::egui;

use crate::state::{AppState, EditorSettings, SceneState};
use crate::ui::toolbar;
use crate::viewport::ViewportPanel;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("File", |ui| {
        if ui.button("New").clicked() {
            toolbar::action_clear_scene(state);
            ui.close_menu();
        }
        if ui.button("Open...").clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title("Open scene")
                .add_filter("JSON", &["json"])
                .pick_file()
            {
                match state.scene.load_from_file(&path) {
                    Ok(()) => state.selection.clear(),
                    Err(e) => tracing::error!("Failed to open {}: {e}", path.display()),
                }
            }
        }
        if ui.button("Save...").clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title("Save scene")
                .add_filter("JSON", &["json"])
                .set_file_name("scene.json")
                .save_file()
            {
                if let Err(e) = state.scene.save_to_file(&path) {
                    tracing::error!("Failed to save {}: {e}", path.display());
                }
            }
        }
        ui.separator();
        if ui.button("Quit").clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Show the edit menu
pub fn edit_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("Edit", |ui| {
        if ui
            .add_enabled(state.scene.can_undo(), egui::Button::new("Undo"))
            .clicked()
        {
            state.scene.undo();
            ui.close_menu();
        }
        if ui
            .add_enabled(state.scene.can_redo(), egui::Button::new("Redo"))
            .clicked()
        {
            state.scene.redo();
            ui.close_menu();
        }
        ui.separator();
        if ui
            .add_enabled(
                state.selection.count() >= 2,
                egui::Button::new("Create line from selection"),
            )
            .clicked()
        {
            toolbar::action_create_line(state);
            ui.close_menu();
        }
        if ui
            .add_enabled(!state.scene.lines().is_empty(), egui::Button::new("Clear lines"))
            .clicked()
        {
            toolbar::action_clear_lines(state);
            ui.close_menu();
        }
        if ui.button("Deselect all").clicked() {
            state.selection.clear();
            ui.close_menu();
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, viewport: &mut ViewportPanel) {
    ui.menu_button("View", |ui| {
        if ui.button("Reset camera").clicked() {
            viewport.reset_camera();
            ui.close_menu();
        }
        if ui.button("Rotate left").clicked() {
            viewport.rotate_camera(1);
            ui.close_menu();
        }
        if ui.button("Rotate right").clicked() {
            viewport.rotate_camera(-1);
            ui.close_menu();
        }
    });
}

/// Show the settings menu
pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("Settings", |ui| {
        if ui.button("Preferences...").clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
    });
}

/// Show the settings window
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_settings_window;
    egui::Window::new("Settings")
        .open(&mut open)
        .resizable(true)
        .default_width(360.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_grid_settings(ui, state);
                show_cell_settings(ui, state);
                show_annotation_settings(ui, state);
                show_viewport_settings(ui, state);
                show_settings_buttons(ui, state);
            });
        });
    state.show_settings_window = open;
}

fn show_grid_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Grid");
    ui.horizontal(|ui| {
        ui.label("Points per side");
        ui.add(egui::DragValue::new(&mut state.settings.grid.size).range(2..=64));
    });
    ui.horizontal(|ui| {
        ui.label("Spacing");
        ui.add(
            egui::DragValue::new(&mut state.settings.grid.spacing)
                .speed(0.05)
                .range(0.1..=10.0),
        );
    });
    ui.horizontal(|ui| {
        ui.label("Point pick radius");
        ui.add(
            egui::DragValue::new(&mut state.settings.grid.point_radius)
                .speed(0.01)
                .range(0.01..=1.0),
        );
    });
    ui.weak("Size and spacing apply to the next new scene");
    ui.add_space(10.0);
}

fn show_cell_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Cells");
    ui.horizontal(|ui| {
        ui.label("Layer thickness");
        ui.add(
            egui::DragValue::new(&mut state.settings.cells.thickness)
                .speed(0.05)
                .range(0.05..=5.0),
        );
    });
    ui.horizontal(|ui| {
        ui.label("Opacity");
        ui.add(egui::Slider::new(&mut state.settings.cells.opacity, 0.1..=1.0));
    });
    ui.horizontal(|ui| {
        ui.label("Default colour");
        let mut rgb = state.settings.cells.default_color.rgb_u8();
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            state.settings.cells.default_color = shared::CellColor::from_rgb(rgb[0], rgb[1], rgb[2]);
        }
    });
    ui.add_space(10.0);
}

fn show_annotation_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Parallel lines");
    ui.horizontal(|ui| {
        ui.label("Endpoint radius");
        ui.add(
            egui::DragValue::new(&mut state.settings.annotations.endpoint_radius)
                .speed(0.01)
                .range(0.02..=1.0),
        );
    });
    ui.horizontal(|ui| {
        ui.label("Handle radius");
        ui.add(
            egui::DragValue::new(&mut state.settings.annotations.handle_radius)
                .speed(0.01)
                .range(0.02..=1.0),
        );
    });
    ui.add_space(10.0);
}

fn show_viewport_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Viewport");
    ui.horizontal(|ui| {
        ui.label("Background");
        ui.color_edit_button_srgb(&mut state.settings.viewport.background_color);
    });
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, state: &mut AppState) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button("Reset to defaults").clicked() {
            state.settings = EditorSettings::default();
        }
        if ui.button("New scene with these settings").clicked() {
            match SceneState::from_settings(&state.settings) {
                Ok(scene) => {
                    state.scene = scene;
                    state.scene.notify_mutated();
                    state.selection.clear();
                    tracing::info!("Started a new scene from settings");
                }
                Err(e) => tracing::error!("Invalid settings: {e}"),
            }
        }
        if ui.button("Save").clicked() {
            state.settings.save();
        }
    });
}
