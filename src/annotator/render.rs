// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Snapshot of everything the presentation layer needs to draw.

use crate::models::annotation::{Annotation, ImageSize};

/// A committed box with its visibility flags.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxView {
    pub annotation: Annotation,
    pub selected: bool,
    pub show_handles: bool,
    pub label_editor_open: bool,
    /// Boxes are dimmed while a new one is being drawn
    pub dimmed: bool,
}

/// Render state of an annotator.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub boxes: Vec<BoxView>,
    /// Box being drawn, drawn distinctly from the committed ones
    pub in_progress: Option<Annotation>,
    pub zoom: f64,
    pub image_size: ImageSize,
    pub can_undo: bool,
    pub can_redo: bool,
    pub can_save: bool,
    pub label_choices: Vec<String>,
}

impl RenderState {
    /// The box whose label picker is open, with its index.
    pub fn label_editor(&self) -> Option<(usize, &BoxView)> {
        self.boxes
            .iter()
            .enumerate()
            .find(|(_, view)| view.label_editor_open)
    }
}
