//! Main application entry point.

use std::path::PathBuf;

fn main() -> eframe::Result {
    env_logger::init();
    log::info!("Starting Tracery");

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    tracery_app::run(path)
}
