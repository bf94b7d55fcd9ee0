//! Main application module

mod keyboard;
mod menus;
mod styles;

use eframe::egui;
use shared::SceneSnapshot;

use crate::state::scene::SceneState;
use crate::state::AppState;
use crate::ui::{status_bar, toolbar};
use crate::viewport::ViewportPanel;

const FONT_SIZE: f32 = 14.0;

/// Main application
pub struct CellGridApp {
    state: AppState,
    viewport: ViewportPanel,
    /// Last saved scene version (for autosave)
    last_saved_version: u64,
}

impl CellGridApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_scene: Option<SceneSnapshot>) -> Self {
        let mut state = AppState::default();

        // Load initial scene: CLI argument takes priority, then autosave
        let source = match initial_scene {
            Some(scene) => Some(("command line", scene)),
            None => SceneState::load_autosave().map(|scene| ("autosave", scene)),
        };
        if let Some((origin, scene)) = source {
            match state.scene.restore(&scene) {
                Ok(()) => tracing::info!("Loaded {origin} scene"),
                Err(e) => tracing::error!("Ignoring {origin} scene: {e}"),
            }
        }

        styles::configure_styles(&cc.egui_ctx, FONT_SIZE);

        let viewport = ViewportPanel::new(&state.settings.viewport);
        let last_saved_version = state.scene.version();

        Self {
            state,
            viewport,
            last_saved_version,
        }
    }
}

impl eframe::App for CellGridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Autosave scene if changed, once a drag has settled
        let current_version = self.state.scene.version();
        if current_version != self.last_saved_version && self.state.selection.drag.is_none() {
            self.state.scene.autosave();
            self.state.settings.save();
            self.last_saved_version = current_version;
        }

        keyboard::handle_keyboard(ctx, &mut self.state, &mut self.viewport);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state);
                menus::edit_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.viewport);
                menus::settings_menu(ui, &mut self.state);
            });
        });

        // ── Settings window ──────────────────────────────────
        menus::settings_window(ctx, &mut self.state);

        // ── Toolbar ───────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.state);
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Central panel: isometric viewport ────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });
    }
}
