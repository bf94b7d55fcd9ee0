// Library crate: the editing core (grid, cells, parallel lines, hit-testing,
// session state) plus the headless harness and JSON command interface.
// The window, camera and painter-based drawing stay in the binary crate.

pub mod annotation;
pub mod cell;
pub mod command;
pub mod error;
pub mod fixtures;
pub mod grid;
pub mod harness;
pub mod hit_test;
pub mod state;
pub mod validation;

/// Geometry buffers, edge extraction and ray picking.
/// The camera and drawing code stay in the binary crate.
pub mod viewport {
    pub mod edge;
    pub mod mesh;
    pub mod picking;
}
