// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Draw and resize gestures.
//!
//! A gesture is either drawing a new box or dragging a corner handle of
//! an existing one. Only one can be active at a time.

use crate::models::annotation::{Annotation, ImageSize};
use crate::util::geometry::{clamp_to_image, span_rect, Handle, Point};

/// Boxes narrower or shorter than this are discarded when drawn.
pub const MIN_DRAW_SIZE: f64 = 5.0;

/// Resizes that would bring either side to this size or below are rejected.
pub const MIN_RESIZE_SIZE: f64 = 5.0;

/// Gesture currently in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Drawing a new box. `live` is not part of the committed sequence.
    Drawing { origin: Point, live: Annotation },
    /// Dragging `handle` of the committed box at `index`.
    Resizing { index: usize, handle: Handle },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::Resizing { .. })
    }

    /// The ephemeral box being drawn, if any.
    pub fn live_box(&self) -> Option<&Annotation> {
        match self {
            Self::Drawing { live, .. } => Some(live),
            _ => None,
        }
    }
}

/// Begin drawing at an already clamped image-space origin.
pub fn begin_draw(origin: Point) -> InteractionState {
    InteractionState::Drawing {
        origin,
        live: Annotation::unassigned(origin.x, origin.y, 0.0, 0.0),
    }
}

/// Rectangle spanned by the draw origin and the clamped pointer.
///
/// The label of `live` carries over to the new candidate.
pub fn drawn_box(origin: Point, pointer: Point, size: ImageSize, live: &Annotation) -> Annotation {
    let current = clamp_to_image(pointer, size);
    let (x, y, width, height) = span_rect(origin, current);
    Annotation::new(x, y, width, height, live.label.clone())
}

/// Check whether a finished draw is large enough to keep.
pub fn is_keepable(candidate: &Annotation) -> bool {
    candidate.width >= MIN_DRAW_SIZE && candidate.height >= MIN_DRAW_SIZE
}

/// Apply a corner drag to `target`.
///
/// Returns `None`, leaving the caller's box untouched, when the result would
/// collapse to `MIN_RESIZE_SIZE` or below on either axis.
pub fn resized_box(
    target: &Annotation,
    handle: Handle,
    pointer: Point,
    size: ImageSize,
) -> Option<Annotation> {
    let p = clamp_to_image(pointer, size);
    let mut next = target.clone();

    if handle.is_left() {
        next.width += next.x - p.x;
        next.x = p.x;
    } else {
        next.width = p.x - next.x;
    }

    if handle.is_top() {
        next.height += next.y - p.y;
        next.y = p.y;
    } else {
        next.height = p.y - next.y;
    }

    (next.width > MIN_RESIZE_SIZE && next.height > MIN_RESIZE_SIZE).then_some(next)
}
