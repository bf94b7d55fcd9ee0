mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state` resolves to the lib
// crate types everywhere in the binary.
pub use cellgrid_lib::state;

use app::CellGridApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cellgrid=info,cellgrid_lib=info".into()),
        )
        .init();

    // Parse --scene <path> argument
    let initial_scene = parse_scene_arg();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("CellGrid: isometric cell editor")
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "cellgrid",
        native_options,
        Box::new(move |cc| Ok(Box::new(CellGridApp::new(cc, initial_scene)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_scene_arg() -> Option<shared::SceneSnapshot> {
    let args: Vec<String> = std::env::args().collect();
    let path = args
        .windows(2)
        .find(|pair| pair[0] == "--scene")
        .map(|pair| pair[1].clone())?;

    match std::fs::read_to_string(&path) {
        Ok(json) => match serde_json::from_str::<shared::SceneSnapshot>(&json) {
            Ok(scene) => {
                tracing::info!(
                    "Loaded scene from {path} ({} cells, {} lines)",
                    scene.cells.len(),
                    scene.lines.len()
                );
                Some(scene)
            }
            Err(e) => {
                tracing::error!("Failed to parse scene JSON from {path}: {e}");
                None
            }
        },
        Err(e) => {
            tracing::error!("Failed to read scene file {path}: {e}");
            None
        }
    }
}
