//! Keyboard shortcut handling

use eframe::egui;

use crate::state::{AppState, Tool};
use crate::ui::toolbar;
use crate::viewport::ViewportPanel;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(
    ctx: &egui::Context,
    state: &mut AppState,
    viewport: &mut ViewportPanel,
) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        // Ctrl+Z: undo
        if i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift {
            state.scene.undo();
        }
        // Ctrl+Shift+Z or Ctrl+Y: redo
        if (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
            || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        {
            state.scene.redo();
        }
        if i.key_pressed(egui::Key::Escape) {
            state.selection.clear();
        }
        if i.key_pressed(egui::Key::Enter) {
            toolbar::action_create_line(state);
        }
        if i.key_pressed(egui::Key::Delete) {
            toolbar::action_clear_lines(state);
        }

        // Tool hotkeys
        if !i.modifiers.command {
            for (key, tool) in [
                (egui::Key::P, Tool::Place),
                (egui::Key::R, Tool::Remove),
                (egui::Key::S, Tool::SelectPoints),
                (egui::Key::M, Tool::Move),
            ] {
                if i.key_pressed(key) {
                    toolbar::set_tool(state, tool);
                }
            }
            if i.key_pressed(egui::Key::Q) {
                viewport.rotate_camera(1);
            }
            if i.key_pressed(egui::Key::E) {
                viewport.rotate_camera(-1);
            }
            if i.key_pressed(egui::Key::Home) {
                viewport.reset_camera();
            }
        }
    });
}
