// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Box list panel.
//!
//! Lists every committed box with its label and size, and lets the
//! user select a box or open its label picker from the list.

use bbox_annotator::annotator::RenderState;

/// Result of properties panel interaction.
pub enum PropertiesAction {
    None,
    SelectBox(usize),
    EditLabel(usize),
}

/// Display the box list.
pub fn show(ui: &mut egui::Ui, state: &RenderState) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.heading("Boxes");
    ui.separator();

    if state.boxes.is_empty() {
        ui.label(egui::RichText::new("No boxes yet").weak());
        return action;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (i, view) in state.boxes.iter().enumerate() {
            let annotation = &view.annotation;
            ui.horizontal(|ui| {
                let text = format!(
                    "#{} {:.0}×{:.0} at ({:.0}, {:.0})",
                    i + 1,
                    annotation.width,
                    annotation.height,
                    annotation.x,
                    annotation.y
                );
                if ui.selectable_label(view.selected, text).clicked() {
                    action = PropertiesAction::SelectBox(i);
                }

                let label = if annotation.is_unassigned() {
                    egui::RichText::new(&annotation.label).color(egui::Color32::from_rgb(200, 80, 60))
                } else {
                    egui::RichText::new(&annotation.label)
                };
                if ui.link(label).clicked() {
                    action = PropertiesAction::EditLabel(i);
                }
            });
        }
    });

    ui.separator();
    let unassigned = state
        .boxes
        .iter()
        .filter(|v| v.annotation.is_unassigned())
        .count();
    ui.label(format!(
        "{} boxes, {} unassigned",
        state.boxes.len(),
        unassigned
    ));

    action
}
