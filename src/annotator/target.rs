// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! What a pointer press landed on.

use crate::models::annotation::Annotation;
use crate::util::geometry::{box_contains, handle_contains, label_chip_contains, Handle, Point};

/// Identity of the element under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty canvas area
    Background,
    /// Body of the box at this index
    Box(usize),
    /// Corner handle of the box at this index
    Handle(usize, Handle),
    /// Label chip of the box at this index
    LabelChip(usize),
}

/// Resolve an image-space point to the element drawn there.
///
/// Later boxes are drawn on top of earlier ones, so boxes are visited
/// topmost first. Handles are only shown on the selected box and sit above
/// its own chip and body, but below any box stacked over it.
pub fn hit_test(boxes: &[Annotation], selected: Option<usize>, point: Point) -> PointerTarget {
    for (index, annotation) in boxes.iter().enumerate().rev() {
        if selected == Some(index) {
            if let Some(handle) = Handle::ALL
                .into_iter()
                .find(|&handle| handle_contains(annotation, handle, point))
            {
                return PointerTarget::Handle(index, handle);
            }
        }
        if label_chip_contains(annotation, point) {
            return PointerTarget::LabelChip(index);
        }
        if box_contains(annotation, point) {
            return PointerTarget::Box(index);
        }
    }

    PointerTarget::Background
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxes() -> Vec<Annotation> {
        vec![
            Annotation::unassigned(10.0, 10.0, 100.0, 150.0),
            Annotation::unassigned(60.0, 60.0, 100.0, 100.0),
        ]
    }

    #[test]
    fn test_background_outside_boxes() {
        assert_eq!(
            hit_test(&boxes(), None, Point::new(400.0, 400.0)),
            PointerTarget::Background
        );
    }

    #[test]
    fn test_topmost_box_wins() {
        assert_eq!(hit_test(&boxes(), None, Point::new(80.0, 100.0)), PointerTarget::Box(1));
        assert_eq!(hit_test(&boxes(), None, Point::new(20.0, 100.0)), PointerTarget::Box(0));
    }

    #[test]
    fn test_label_chip_before_body() {
        assert_eq!(
            hit_test(&boxes(), None, Point::new(100.0, 65.0)),
            PointerTarget::LabelChip(1)
        );
    }

    #[test]
    fn test_handles_only_on_selected_box() {
        let corner = Point::new(160.0, 160.0);
        assert_eq!(hit_test(&boxes(), None, corner), PointerTarget::Box(1));
        assert_eq!(hit_test(&boxes(), Some(0), corner), PointerTarget::Box(1));
        assert_eq!(
            hit_test(&boxes(), Some(1), corner),
            PointerTarget::Handle(1, Handle::BottomRight)
        );
    }

    #[test]
    fn test_handle_beats_own_label_chip() {
        assert_eq!(
            hit_test(&boxes(), Some(0), Point::new(12.0, 12.0)),
            PointerTarget::Handle(0, Handle::TopLeft)
        );
        assert_eq!(
            hit_test(&boxes(), None, Point::new(12.0, 12.0)),
            PointerTarget::LabelChip(0)
        );
    }

    #[test]
    fn test_covered_handle_yields_to_upper_box() {
        // Bottom-right corner of box 0 lies inside box 1.
        let corner = Point::new(110.0, 160.0);
        assert_eq!(hit_test(&boxes(), Some(0), corner), PointerTarget::Box(1));

        // Outside box 1 the same handle is reachable.
        let corner = Point::new(10.0, 160.0);
        assert_eq!(
            hit_test(&boxes(), Some(0), corner),
            PointerTarget::Handle(0, Handle::BottomLeft)
        );
    }

    #[test]
    fn test_selected_index_out_of_range() {
        assert_eq!(
            hit_test(&boxes(), Some(7), Point::new(400.0, 400.0)),
            PointerTarget::Background
        );
    }
}
