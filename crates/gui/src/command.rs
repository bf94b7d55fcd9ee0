//! JSON command protocol for scripted editing.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::harness::TestHarness;

/// A command that can be executed against the harness.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Place a cell on grid quad (grid_x, grid_z) at a layer
    PlaceCell {
        grid_x: usize,
        grid_z: usize,
        #[serde(default)]
        layer: i32,
        color: String,
    },
    /// Place a cell at a world insertion point
    PlaceCellAtPoint {
        point: [f32; 3],
        color: String,
    },
    /// Remove all cells at a location and layer, any colour
    RemoveCells {
        grid_x: usize,
        grid_z: usize,
        #[serde(default)]
        layer: i32,
    },
    /// Move lattice point (i, j); y is pinned to the grid plane
    MovePoint {
        i: usize,
        j: usize,
        position: [f32; 3],
    },
    /// Create a parallel line through lattice points given as [i, j] pairs
    CreateLine {
        points: Vec<[usize; 2]>,
    },
    ClearLines,
    /// Undo the last operation.
    Undo,
    /// Redo the last undone operation.
    Redo,
    /// Clear the entire scene.
    Clear,
    /// Inspect the scene: grid, cells and lines.
    Inspect,
    /// Export the scene as JSON.
    ExportScene,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

impl From<Result<serde_json::Value, String>> for CommandResponse {
    fn from(result: Result<serde_json::Value, String>) -> Self {
        match result {
            Ok(data) => Self::ok_with_data(data),
            Err(msg) => Self::err(msg),
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::PlaceCell {
            grid_x,
            grid_z,
            layer,
            color,
        } => harness
            .place_cell(grid_x, grid_z, layer, &color)
            .map(|key| serde_json::json!({ "key": key }))
            .into(),

        AgentCommand::PlaceCellAtPoint { point, color } => harness
            .place_cell_at_point(Vec3::from_array(point), &color)
            .map(|key| serde_json::json!({ "key": key }))
            .into(),

        AgentCommand::RemoveCells {
            grid_x,
            grid_z,
            layer,
        } => {
            let removed = harness.remove_cells(grid_x, grid_z, layer);
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        AgentCommand::MovePoint { i, j, position } => {
            match harness.move_point(i, j, Vec3::from_array(position)) {
                Ok(()) => CommandResponse::ok(),
                Err(e) => CommandResponse::err(e),
            }
        }

        AgentCommand::CreateLine { points } => {
            let pairs: Vec<(usize, usize)> = points.iter().map(|&[i, j]| (i, j)).collect();
            match harness.create_line(&pairs) {
                Ok(Some(id)) => CommandResponse::ok_with_data(serde_json::json!({ "id": id })),
                Ok(None) => CommandResponse::err(format!(
                    "a parallel line needs at least 2 points, got {}",
                    pairs.len()
                )),
                Err(e) => CommandResponse::err(e),
            }
        }

        AgentCommand::ClearLines => {
            harness.clear_lines();
            CommandResponse::ok()
        }

        AgentCommand::Undo => {
            let success = harness.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        AgentCommand::Redo => {
            let success = harness.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        AgentCommand::Clear => match harness.clear() {
            Ok(()) => CommandResponse::ok(),
            Err(e) => CommandResponse::err(e),
        },

        AgentCommand::Inspect => {
            harness.resync();
            let scene = &harness.scene;
            let cells: Vec<serde_json::Value> = scene
                .cells()
                .values()
                .map(|cell| {
                    serde_json::json!({
                        "key": cell.key.to_string(),
                        "grid_x": cell.key.grid_x,
                        "grid_z": cell.key.grid_z,
                        "layer": cell.key.layer,
                        "color": cell.key.color.as_str(),
                        "position": cell.world_position.to_array(),
                        "vertex_count": cell.solid.vertex_count(),
                    })
                })
                .collect();
            let lines: Vec<serde_json::Value> = scene
                .lines()
                .iter()
                .map(|line| {
                    serde_json::json!({
                        "id": line.id,
                        "point_count": line.points.len(),
                        "start": line.endpoints[0].position.to_array(),
                        "end": line.endpoints[1].position.to_array(),
                        "handle": line.handle.position.to_array(),
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "grid_size": scene.grid().size(),
                "version": scene.version(),
                "cell_count": cells.len(),
                "cells": cells,
                "line_count": lines.len(),
                "lines": lines,
            }))
        }

        AgentCommand::ExportScene => harness
            .export_scene_json()
            .map(|json| serde_json::json!({ "scene_json": json }))
            .into(),
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}
