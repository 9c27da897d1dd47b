// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Bounding Box Annotator
//!
//! A desktop application for drawing and labeling rectangular regions
//! over an image.

mod app;
mod ui;

use anyhow::{Context, Result};
use app::AnnotatorApp;
use bbox_annotator::config::AnnotatorConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image to annotate
    image: Option<PathBuf>,

    /// Configuration file (YAML or JSON) with classes and zoom range
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Additional class label; may be repeated
    #[arg(long = "class")]
    classes: Vec<String>,
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();
    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => AnnotatorConfig::load(path).context("Failed to load configuration")?,
        None => AnnotatorConfig::default(),
    };
    config.classes.extend(args.classes);
    config.normalize();
    if config.classes.is_empty() {
        log::warn!("No classes configured; boxes cannot be labeled or saved");
    }

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Bounding Box Annotator"),
        ..Default::default()
    };

    // Run the application
    let image = args.image;
    eframe::run_native(
        "bbox-annotator",
        options,
        Box::new(move |_cc| Ok(Box::new(AnnotatorApp::new(config, image)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
