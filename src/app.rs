// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! The application hosts one annotator per loaded image. It loads images
//! in the background, feeds UI input to the annotator as events, and
//! handles the annotator's save and cancel callbacks.

use crate::ui::{canvas, properties, toolbar};
use bbox_annotator::annotator::{Annotator, AnnotatorHost, Event};
use bbox_annotator::config::AnnotatorConfig;
use bbox_annotator::models::annotation::{Annotation, ImageSize};
use bbox_annotator::models::project::AnnotationSet;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Callback sent from the annotator back to the application.
enum HostMessage {
    Save(Vec<Annotation>),
    Cancel,
}

/// Forwards annotator callbacks over a channel so they can be handled
/// once the annotator is no longer borrowed.
struct ChannelHost(Sender<HostMessage>);

impl AnnotatorHost for ChannelHost {
    fn on_save(&mut self, annotations: &[Annotation]) {
        let _ = self.0.send(HostMessage::Save(annotations.to_vec()));
    }

    fn on_cancel(&mut self) {
        let _ = self.0.send(HostMessage::Cancel);
    }
}

/// Result of background image loading operation.
struct LoadedImageData {
    path: PathBuf,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Main application state.
pub struct AnnotatorApp {
    /// Class list and zoom range for every annotator
    config: AnnotatorConfig,

    /// Annotator for the current image
    annotator: Option<Annotator>,

    /// Path of the image being annotated
    image_path: Option<PathBuf>,

    /// Loaded image texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Image dimensions (width, height)
    image_size: Option<(u32, u32)>,

    host_sender: Sender<HostMessage>,
    host_receiver: Receiver<HostMessage>,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<LoadedImageData, String>>>,

    /// Loading state message
    loading_message: Option<String>,

    /// Result of the last save, shown in the status bar
    status: Option<String>,
}

impl AnnotatorApp {
    /// Create the application, optionally loading an image right away.
    pub fn new(config: AnnotatorConfig, image: Option<PathBuf>) -> Self {
        let (host_sender, host_receiver) = channel();
        let mut app = Self {
            config,
            annotator: None,
            image_path: None,
            image_texture: None,
            image_size: None,
            host_sender,
            host_receiver,
            image_loader: None,
            loading_message: None,
            status: None,
        };
        if let Some(path) = image {
            app.load_image_file(path);
        }
        app
    }

    /// Load an image file in the background.
    pub fn load_image_file(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some("Loading image...".to_string());

        std::thread::spawn(move || {
            let result = bbox_annotator::io::media::load_image(&path)
                .map(|loaded| {
                    log::info!(
                        "Loaded image: {} ({}x{})",
                        path.display(),
                        loaded.width,
                        loaded.height
                    );
                    LoadedImageData {
                        path: path.clone(),
                        width: loaded.width,
                        height: loaded.height,
                        pixels: loaded.pixels,
                    }
                })
                .map_err(|e| format!("{:#}", e));

            let _ = sender.send(result);
        });
    }

    /// Mount a fresh annotator for a newly loaded image.
    fn mount(&mut self, ctx: &egui::Context, loaded: LoadedImageData) {
        let size = [loaded.width as usize, loaded.height as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
        let texture = ctx.load_texture("loaded_image", color_image, egui::TextureOptions::LINEAR);

        let mut annotator = Annotator::new(
            self.config.clone(),
            Box::new(ChannelHost(self.host_sender.clone())),
        );
        annotator.handle(Event::ImageLoaded(ImageSize::from((
            loaded.width,
            loaded.height,
        ))));

        self.annotator = Some(annotator);
        self.image_texture = Some(texture);
        self.image_size = Some((loaded.width, loaded.height));
        self.image_path = Some(loaded.path);
        self.status = None;
    }

    fn poll_image_loader(&mut self, ctx: &egui::Context) {
        let Some(ref receiver) = self.image_loader else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.image_loader = None;
        self.loading_message = None;

        match result {
            Ok(loaded) => self.mount(ctx, loaded),
            Err(e) => {
                log::error!("Failed to load image: {}", e);
                self.status = Some(format!("Failed to load image: {}", e));
            }
        }
    }

    fn poll_host_messages(&mut self, ctx: &egui::Context) {
        while let Ok(message) = self.host_receiver.try_recv() {
            match message {
                HostMessage::Save(annotations) => self.export_annotations(annotations),
                HostMessage::Cancel => {
                    log::info!("Closing without saving");
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }
    }

    /// Ask for a destination and write the saved boxes there.
    fn export_annotations(&mut self, annotations: Vec<Annotation>) {
        let (Some(image_path), Some((width, height))) = (&self.image_path, self.image_size) else {
            return;
        };

        let stem = image_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("annotations");
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .add_filter("YAML", &["yaml", "yml"])
            .set_file_name(format!("{}.json", stem))
            .save_file()
        else {
            return;
        };

        let data = AnnotationSet::new(
            image_path.to_string_lossy().to_string(),
            width,
            height,
            annotations,
        );

        match bbox_annotator::io::serialization::export(&data, &path) {
            Ok(_) => {
                log::info!(
                    "Exported {} annotations ({}) to {}",
                    data.annotations.len(),
                    data.labels().join(", "),
                    path.display()
                );
                self.status = Some(format!("Saved to {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export annotations: {:#}", e);
                self.status = Some(format!("Save failed: {}", e));
            }
        }
    }

    fn pick_image(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"])
            .pick_file()
        {
            self.load_image_file(path);
        }
    }

    fn dispatch(&mut self, events: Vec<Event>) {
        if let Some(ref mut annotator) = self.annotator {
            for event in events {
                annotator.handle(event);
            }
        }
    }
}

impl eframe::App for AnnotatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_image_loader(ctx);

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        let state = self.annotator.as_ref().map(Annotator::render_state);
        let mut events = Vec::new();

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        self.pick_image();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                if let Some(ref state) = state {
                    ui.menu_button("Edit", |ui| {
                        if ui.add_enabled(state.can_undo, egui::Button::new("Undo")).clicked() {
                            events.push(Event::Undo);
                            ui.close_menu();
                        }
                        if ui.add_enabled(state.can_redo, egui::Button::new("Redo")).clicked() {
                            events.push(Event::Redo);
                            ui.close_menu();
                        }
                    });

                    ui.menu_button("View", |ui| {
                        let zoom = self.config.zoom;
                        if ui.button("Zoom In").clicked() {
                            events.push(Event::SetZoom(state.zoom + zoom.step));
                            ui.close_menu();
                        }
                        if ui.button("Zoom Out").clicked() {
                            events.push(Event::SetZoom(state.zoom - zoom.step));
                            ui.close_menu();
                        }
                        if ui.button("Reset Zoom").clicked() {
                            events.push(Event::SetZoom(zoom.initial));
                            ui.close_menu();
                        }
                    });
                }
            });
        });

        let Some(state) = state else {
            egui::CentralPanel::default().show(ctx, |ui| {
                show_welcome(ui, self.loading_message.as_deref(), self.status.as_deref());
            });
            return;
        };

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            events.extend(toolbar::show(ui, &state, &self.config.zoom));
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some((width, height)) = self.image_size {
                    ui.label(format!("{}x{} px", width, height));
                    ui.separator();
                }
                ui.label(format!("Zoom {:.0}%", state.zoom * 100.0));
                if let Some(ref status) = self.status {
                    ui.separator();
                    ui.label(status);
                }
            });
        });

        let properties_action = egui::SidePanel::right("properties")
            .default_width(250.0)
            .show(ctx, |ui| properties::show(ui, &state))
            .inner;

        let canvas_events = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| ui.spinner().on_hover_text(message));
                    Vec::new()
                } else {
                    canvas::show(ui, &state, &self.image_texture)
                }
            })
            .inner;
        events.extend(canvas_events);

        self.dispatch(events);

        if let Some(ref mut annotator) = self.annotator {
            match properties_action {
                properties::PropertiesAction::SelectBox(idx) => annotator.select_box(idx),
                properties::PropertiesAction::EditLabel(idx) => annotator.open_label_editor(idx),
                properties::PropertiesAction::None => {}
            }
        }

        self.poll_host_messages(ctx);
    }
}

/// Welcome message shown before any image is loaded.
fn show_welcome(ui: &mut egui::Ui, loading: Option<&str>, status: Option<&str>) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new("Bounding Box Annotator")
                    .size(32.0)
                    .color(egui::Color32::from_gray(200)),
            );
            ui.add_space(20.0);
            if let Some(message) = loading {
                ui.spinner();
                ui.label(message);
            } else {
                ui.label(
                    egui::RichText::new("Open an image to begin annotating")
                        .color(egui::Color32::from_gray(180)),
                );
                ui.label(
                    egui::RichText::new("File → Open Image...")
                        .weak()
                        .color(egui::Color32::from_gray(130)),
                );
            }
            if let Some(status) = status {
                ui.add_space(10.0);
                ui.label(egui::RichText::new(status).color(egui::Color32::from_rgb(200, 80, 60)));
            }
        });
    });
}
