// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Saved annotation documents.
//!
//! An `AnnotationSet` bundles the finished boxes with the image they
//! were drawn on, ready to be handed to persistence.

use super::annotation::Annotation;
use serde::{Deserialize, Serialize};

/// Complete annotation data for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSet {
    pub image: String,
    pub image_width: u32,
    pub image_height: u32,
    pub annotations: Vec<Annotation>,
}

impl AnnotationSet {
    /// Create a document for the given image and boxes.
    pub fn new(
        image: String,
        image_width: u32,
        image_height: u32,
        annotations: Vec<Annotation>,
    ) -> Self {
        Self {
            image,
            image_width,
            image_height,
            annotations,
        }
    }

    /// Distinct labels used in this document, in first-use order.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for annotation in &self.annotations {
            if !labels.contains(&annotation.label.as_str()) {
                labels.push(&annotation.label);
            }
        }
        labels
    }
}
