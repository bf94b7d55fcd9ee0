//! Editor settings

use serde::{Deserialize, Serialize};
use shared::CellColor;

use crate::annotation::MarkerSizes;
use crate::error::{EditorError, EditorResult};

/// Lattice settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Points per side
    pub size: usize,
    /// Distance between neighbouring points
    pub spacing: f32,
    /// Pick radius of lattice point markers
    pub point_radius: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: 10,
            spacing: 1.0,
            point_radius: 0.05,
        }
    }
}

/// Cell settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSettings {
    /// Height of one layer
    pub thickness: f32,
    /// Colour used by the place tool
    pub default_color: CellColor,
    /// Face opacity (0.0 - 1.0)
    pub opacity: f32,
}

impl Default for CellSettings {
    fn default() -> Self {
        Self {
            thickness: 0.5,
            default_color: CellColor::from_rgb(0x44, 0x88, 0xff),
            opacity: 0.75,
        }
    }
}

/// Parallel line marker sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSettings {
    pub endpoint_radius: f32,
    pub handle_radius: f32,
}

impl Default for AnnotationSettings {
    fn default() -> Self {
        let sizes = MarkerSizes::default();
        Self {
            endpoint_radius: sizes.endpoint_radius,
            handle_radius: sizes.handle_radius,
        }
    }
}

impl AnnotationSettings {
    pub fn marker_sizes(&self) -> MarkerSizes {
        MarkerSizes {
            endpoint_radius: self.endpoint_radius,
            handle_radius: self.handle_radius,
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Vertical extent of the orthographic view in world units
    pub frustum_size: f32,
    /// Camera distance from the target
    pub camera_distance: f32,
    /// Background color RGB
    pub background_color: [u8; 3],
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            frustum_size: 10.0,
            camera_distance: 15.0,
            background_color: [30, 30, 35],
        }
    }
}

/// All editor settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub cells: CellSettings,
    #[serde(default)]
    pub annotations: AnnotationSettings,
    #[serde(default)]
    pub viewport: ViewportSettings,
}

impl EditorSettings {
    fn config_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "cellgrid", "cellgrid")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if missing or invalid
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        let Ok(json) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        match serde_json::from_str::<Self>(&json) {
            Ok(settings) => match settings.validate() {
                Ok(()) => settings,
                Err(e) => {
                    tracing::warn!("Ignoring {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::error!("Failed to parse {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save settings to file
    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            return;
        };
        if let Some(dir) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                tracing::error!("Failed to create {}: {e}", dir.display());
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    tracing::error!("Failed to write {}: {e}", path.display());
                }
            }
            Err(e) => tracing::error!("Failed to serialize settings: {e}"),
        }
    }

    pub fn validate(&self) -> EditorResult<()> {
        if self.grid.size < 2 {
            return Err(EditorError::InvalidArgument(format!(
                "grid size must be at least 2, got {}",
                self.grid.size
            )));
        }
        if !(self.grid.spacing > 0.0) {
            return Err(EditorError::InvalidArgument(format!(
                "grid spacing must be positive, got {}",
                self.grid.spacing
            )));
        }
        if !(self.cells.thickness > 0.0) {
            return Err(EditorError::InvalidArgument(format!(
                "cell thickness must be positive, got {}",
                self.cells.thickness
            )));
        }
        Ok(())
    }
}
