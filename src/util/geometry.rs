// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module maps pointer-device coordinates into image space and
//! provides the rectangle helpers used for box creation and hit testing.
//! Everything here is pure.

use crate::models::annotation::{Annotation, ImageSize};
use serde::{Deserialize, Serialize};

/// Side length of a resize handle, in image pixels.
pub const HANDLE_SIZE: f64 = 10.0;

/// Height of the label chip drawn along the top edge of a box, in image pixels.
pub const LABEL_CHIP_HEIGHT: f64 = 18.0;

/// A 2D point. Device or image space depending on context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One of the four corner affordances on a selected box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Handle {
    pub const ALL: [Handle; 4] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];

    pub fn is_left(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::BottomLeft)
    }

    pub fn is_top(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::TopRight)
    }

    /// Corner of `annotation` this handle sits on.
    pub fn anchor(self, annotation: &Annotation) -> Point {
        let x = if self.is_left() {
            annotation.x
        } else {
            annotation.right()
        };
        let y = if self.is_top() {
            annotation.y
        } else {
            annotation.bottom()
        };
        Point::new(x, y)
    }
}

/// Convert a device point into image space.
///
/// `zoom` must be positive.
pub fn to_image_space(device: Point, container_origin: Point, zoom: f64) -> Point {
    Point {
        x: (device.x - container_origin.x) / zoom,
        y: (device.y - container_origin.y) / zoom,
    }
}

/// Convert an image-space point back to device coordinates.
pub fn to_device_space(image: Point, container_origin: Point, zoom: f64) -> Point {
    Point {
        x: image.x * zoom + container_origin.x,
        y: image.y * zoom + container_origin.y,
    }
}

/// Clamp each axis of `point` to `[0, size]`.
pub fn clamp_to_image(point: Point, size: ImageSize) -> Point {
    Point {
        x: point.x.min(size.width).max(0.0),
        y: point.y.min(size.height).max(0.0),
    }
}

/// Axis-aligned rectangle spanned by two corners, as `(x, y, width, height)`.
pub fn span_rect(a: Point, b: Point) -> (f64, f64, f64, f64) {
    (
        a.x.min(b.x),
        a.y.min(b.y),
        (b.x - a.x).abs(),
        (b.y - a.y).abs(),
    )
}

fn within(point: Point, x: f64, y: f64, width: f64, height: f64) -> bool {
    point.x >= x && point.x <= x + width && point.y >= y && point.y <= y + height
}

/// Check whether `point` lies inside the box body (edges inclusive).
pub fn box_contains(annotation: &Annotation, point: Point) -> bool {
    within(
        point,
        annotation.x,
        annotation.y,
        annotation.width,
        annotation.height,
    )
}

/// Check whether `point` lies on the given resize handle of `annotation`.
pub fn handle_contains(annotation: &Annotation, handle: Handle, point: Point) -> bool {
    let anchor = handle.anchor(annotation);
    let half = HANDLE_SIZE / 2.0;
    within(point, anchor.x - half, anchor.y - half, HANDLE_SIZE, HANDLE_SIZE)
}

/// Check whether `point` lies on the label chip along the box's top edge.
pub fn label_chip_contains(annotation: &Annotation, point: Point) -> bool {
    let height = LABEL_CHIP_HEIGHT.min(annotation.height);
    within(point, annotation.x, annotation.y, annotation.width, height)
}
