// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the labeled bounding box and the natural image
//! size that all box coordinates are expressed in.

use serde::{Deserialize, Serialize};

/// Label carried by a box before the user has chosen a class.
pub const UNASSIGNED_LABEL: &str = "(Unassigned)";

/// Natural pixel dimensions of the annotated image.
///
/// Zero until the image has loaded; clamping degenerates to the origin
/// while the size is unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

impl ImageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Check whether the image dimensions are known.
    pub fn is_known(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

impl From<(u32, u32)> for ImageSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width as f64, height as f64)
    }
}

/// A labeled, axis-aligned box in image-pixel space.
///
/// Boxes have no identity beyond their position in the annotation sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AnnotationRecord", into = "AnnotationRecord")]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
}

impl Annotation {
    /// Create a new annotation with the given geometry and label.
    pub fn new(x: f64, y: f64, width: f64, height: f64, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            label: label.into(),
        }
    }

    /// Create an annotation that has not been assigned a class yet.
    pub fn unassigned(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, width, height, UNASSIGNED_LABEL)
    }

    /// Check if the user still has to pick a class for this box.
    pub fn is_unassigned(&self) -> bool {
        self.label == UNASSIGNED_LABEL
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// On-disk shape of an annotation: `{ "box": [x, y, w, h], "label": ... }`.
#[derive(Serialize, Deserialize)]
struct AnnotationRecord {
    #[serde(rename = "box")]
    bbox: [f64; 4],
    label: String,
}

impl From<AnnotationRecord> for Annotation {
    fn from(record: AnnotationRecord) -> Self {
        let [x, y, width, height] = record.bbox;
        Self::new(x, y, width, height, record.label)
    }
}

impl From<Annotation> for AnnotationRecord {
    fn from(annotation: Annotation) -> Self {
        Self {
            bbox: [
                annotation.x,
                annotation.y,
                annotation.width,
                annotation.height,
            ],
            label: annotation.label,
        }
    }
}
