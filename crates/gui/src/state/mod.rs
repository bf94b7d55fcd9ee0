pub mod scene;
pub mod selection;
pub mod settings;

use shared::CellColor;

pub use scene::{ResyncStats, SceneState};
pub use selection::{DragState, SelectionState};
pub use settings::{AnnotationSettings, CellSettings, EditorSettings, GridSettings, ViewportSettings};

/// Active viewport tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Click places a cell at the hit-tested insertion point
    #[default]
    Place,
    /// Click on a cell removes every cell at its location and layer
    Remove,
    /// Click toggles lattice points for line creation
    SelectPoints,
    /// Drag lattice points and line markers
    Move,
}

impl Tool {
    pub fn label(&self) -> &'static str {
        match self {
            Tool::Place => "Place",
            Tool::Remove => "Remove",
            Tool::SelectPoints => "Select points",
            Tool::Move => "Move",
        }
    }

    pub fn all() -> &'static [Tool] {
        &[Tool::Place, Tool::Remove, Tool::SelectPoints, Tool::Move]
    }
}

/// Combined application state
pub struct AppState {
    pub scene: SceneState,
    pub selection: SelectionState,
    pub settings: EditorSettings,
    pub tool: Tool,
    /// Colour for newly placed cells
    pub color: CellColor,
    /// Show settings window
    pub show_settings_window: bool,
}

impl AppState {
    /// State built from settings, falling back to defaults when they are invalid
    pub fn new(settings: EditorSettings) -> Self {
        let scene = SceneState::from_settings(&settings).unwrap_or_else(|e| {
            tracing::warn!("Invalid settings, using defaults: {e}");
            SceneState::default()
        });
        Self {
            scene,
            selection: SelectionState::default(),
            color: settings.cells.default_color.clone(),
            settings,
            tool: Tool::default(),
            show_settings_window: false,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(EditorSettings::load())
    }
}
