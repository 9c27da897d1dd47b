// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Undo/redo history over snapshots of the box sequence.
//!
//! The log is linear: committing while the cursor is behind the tail
//! discards everything after the cursor.

use crate::models::annotation::Annotation;

/// History system for undo/redo functionality.
#[derive(Debug, Clone)]
pub struct History {
    /// Committed snapshots, oldest first. Never empty.
    log: Vec<Vec<Annotation>>,
    /// Index of the snapshot matching the committed state
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Start with a single empty snapshot.
    pub fn new() -> Self {
        Self {
            log: vec![Vec::new()],
            cursor: 0,
        }
    }

    /// Record a new snapshot, dropping any redo tail.
    pub fn commit(&mut self, annotations: &[Annotation]) {
        self.log.truncate(self.cursor + 1);
        self.log.push(annotations.to_vec());
        self.cursor = self.log.len() - 1;
    }

    /// Replace the snapshot under the cursor without adding an entry.
    pub fn amend_current(&mut self, annotations: &[Annotation]) {
        self.log[self.cursor] = annotations.to_vec();
    }

    /// Undo: step back and return the snapshot there.
    pub fn undo(&mut self) -> Option<Vec<Annotation>> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.log[self.cursor].clone())
    }

    /// Redo: step forward and return the snapshot there.
    pub fn redo(&mut self) -> Option<Vec<Annotation>> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.log[self.cursor].clone())
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.log.len()
    }

    pub fn current(&self) -> &[Annotation] {
        &self.log[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Always false; the log holds at least the initial snapshot.
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}
