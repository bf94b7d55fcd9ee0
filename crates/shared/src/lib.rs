use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

/// Error produced when a colour string is not `#rgb` or `#rrggbb`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid colour '{0}': expected #rgb or #rrggbb")]
pub struct ColorParseError(pub String);

/// Cell colour, stored as a normalised lowercase `#rrggbb` string
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellColor(String);

impl CellColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Linear RGB components in 0..=1
    pub fn rgb(&self) -> [f32; 3] {
        let [r, g, b] = self.rgb_u8();
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }

    pub fn rgb_u8(&self) -> [u8; 3] {
        // Normalised on construction, so the slices are always valid hex
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        [channel(1), channel(3), channel(5)]
    }

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("#{r:02x}{g:02x}{b:02x}"))
    }
}

impl FromStr for CellColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError(s.to_string()))?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError(s.to_string()));
        }
        let expanded = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => hex.to_string(),
            _ => return Err(ColorParseError(s.to_string())),
        };
        Ok(Self(format!("#{}", expanded.to_ascii_lowercase())))
    }
}

impl TryFrom<String> for CellColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CellColor> for String {
    fn from(color: CellColor) -> Self {
        color.0
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage key of a placed cell.
///
/// Two cells may share a location and layer as long as their colours differ.
/// Displays as `gridX,gridZ,layer,color`, e.g. `2,2,0,#ff0000`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellKey {
    pub grid_x: usize,
    pub grid_z: usize,
    pub layer: i32,
    pub color: CellColor,
}

impl CellKey {
    pub fn new(grid_x: usize, grid_z: usize, layer: i32, color: CellColor) -> Self {
        Self {
            grid_x,
            grid_z,
            layer,
            color,
        }
    }

    /// True when the key sits at the given location and layer, whatever its colour
    pub fn occupies(&self, grid_x: usize, grid_z: usize, layer: i32) -> bool {
        self.grid_x == grid_x && self.grid_z == grid_z && self.layer == layer
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.grid_x, self.grid_z, self.layer, self.color)
    }
}

/// Lattice coordinates of a grid point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointRef {
    pub i: usize,
    pub j: usize,
}

/// Persisted parallel line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Selected lattice points, in selection order
    pub points: Vec<PointRef>,
    pub start: [f32; 3],
    pub end: [f32; 3],
}

/// Full editor scene: lattice, cells and parallel lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    pub grid_size: usize,
    pub spacing: f32,
    #[serde(default = "default_thickness")]
    pub thickness: f32,
    /// Point positions in row-major order (`i * grid_size + j`)
    pub points: Vec<[f32; 3]>,
    #[serde(default)]
    pub cells: Vec<CellKey>,
    #[serde(default)]
    pub lines: Vec<LineRecord>,
}

fn default_thickness() -> f32 {
    0.5
}
