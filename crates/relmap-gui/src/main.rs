#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use anyhow::Result;
use clap::Parser;
use eframe::egui;
use std::path::PathBuf;

mod app;
mod canvas;
mod loader;

use app::RelmapApp;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON data document with entities and relations
    #[arg(short, long, default_value = "data.json")]
    data: PathBuf,
}

fn main() -> Result<()> {
    // Log to stdout (run with `RUST_LOG=debug` for scene rebuild traces).
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let data = loader::load_graph(&args.data)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "relmap",
        options,
        Box::new(move |cc| Ok(Box::new(RelmapApp::new(cc, data)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe exited with error: {e}"))
}
