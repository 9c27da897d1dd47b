// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with zoom, history and save controls.

use bbox_annotator::annotator::{Event, RenderState};
use bbox_annotator::config::ZoomConfig;

/// Display the toolbar and return any events it produced.
pub fn show(ui: &mut egui::Ui, state: &RenderState, zoom: &ZoomConfig) -> Vec<Event> {
    let mut events = Vec::new();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Zoom:");
        let mut value = state.zoom;
        let slider = egui::Slider::new(&mut value, zoom.min..=zoom.max)
            .step_by(zoom.step)
            .fixed_decimals(1);
        if ui.add(slider).changed() {
            events.push(Event::SetZoom(value));
        }

        ui.separator();

        if ui.add_enabled(state.can_undo, egui::Button::new("⟲ Undo")).clicked() {
            events.push(Event::Undo);
        }
        if ui.add_enabled(state.can_redo, egui::Button::new("⟳ Redo")).clicked() {
            events.push(Event::Redo);
        }

        ui.separator();

        if ui
            .add_enabled(state.can_save, egui::Button::new("Save Annotations"))
            .clicked()
        {
            events.push(Event::Save);
        }
        if ui.button("Cancel").clicked() {
            events.push(Event::Cancel);
        }

        ui.separator();
        ui.label(egui::RichText::new(hint(state)).italics().weak());
    });

    events
}

fn hint(state: &RenderState) -> &'static str {
    if state.in_progress.is_some() {
        "Release to finish the box"
    } else if state.boxes.is_empty() {
        "Drag on the image to draw a box"
    } else if state.boxes.iter().any(|b| b.annotation.is_unassigned()) {
        "Click a box's label to assign a class"
    } else if state.boxes.iter().any(|b| b.selected) {
        "Drag a corner handle to resize"
    } else {
        "Ready to save"
    }
}
