// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Selection and label-editor state.

/// Which box is selected and which has its label picker open.
///
/// The label editor can only be open on the selected box; every
/// transition below keeps that true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<usize>,
    editing_label: Option<usize>,
}

impl Selection {
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn editing_label(&self) -> Option<usize> {
        self.editing_label
    }

    /// Select a box body; closes any label picker.
    pub fn select(&mut self, index: usize) {
        self.selected = Some(index);
        self.editing_label = None;
    }

    /// Select a box and open its label picker.
    pub fn open_label_editor(&mut self, index: usize) {
        self.selected = Some(index);
        self.editing_label = Some(index);
    }

    pub fn close_label_editor(&mut self) {
        self.editing_label = None;
    }

    /// Clear both selection and label editor.
    pub fn clear(&mut self) {
        self.selected = None;
        self.editing_label = None;
    }
}
