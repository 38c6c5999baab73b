// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Dot Sketch - connect-the-dots drawing tool
//!
//! A cross-platform desktop application for placing numbered dots on a
//! canvas, connecting them in order, and exporting the result.

mod app;
mod config;
mod io;
mod models;
mod state;
mod ui;
mod util;

use anyhow::Result;
use app::DotsApp;
use config::Config;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = Config::load();
    let app = DotsApp::new(config.clone())?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Dot Sketch"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Dot Sketch",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
