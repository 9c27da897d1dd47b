// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The annotator controller.
//!
//! Owns the committed boxes, the undo history, the current gesture and the
//! selection for one image. Every event is handled synchronously; invalid
//! input is ignored rather than reported, and the presentation layer reads
//! a [`RenderState`] back after each event.

pub mod interaction;
pub mod render;
pub mod selection;
pub mod target;

pub use interaction::InteractionState;
pub use render::{BoxView, RenderState};
pub use selection::Selection;
pub use target::{hit_test, PointerTarget};

use crate::config::AnnotatorConfig;
use crate::history::History;
use crate::models::annotation::{Annotation, ImageSize};
use crate::util::geometry::{clamp_to_image, to_image_space, Point};

/// Receives the outcome of an annotation session.
pub trait AnnotatorHost {
    /// Called with the finished boxes when the user saves.
    fn on_save(&mut self, annotations: &[Annotation]);

    /// Called when the user abandons editing.
    fn on_cancel(&mut self);
}

/// Input delivered by the presentation layer.
///
/// `device` points are raw pointer coordinates; `origin` is the device
/// position of the image's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    PointerDown {
        device: Point,
        origin: Point,
        target: PointerTarget,
    },
    PointerMove {
        device: Point,
        origin: Point,
    },
    PointerUp,
    /// Press outside the image area; deselects without starting a draw
    ClearSelection,
    ChooseLabel(String),
    SetZoom(f64),
    Undo,
    Redo,
    Save,
    Cancel,
    ImageLoaded(ImageSize),
}

/// Interactive bounding-box annotator for a single image.
pub struct Annotator {
    config: AnnotatorConfig,
    host: Box<dyn AnnotatorHost>,
    image_size: ImageSize,
    /// Committed boxes in creation order
    boxes: Vec<Annotation>,
    history: History,
    interaction: InteractionState,
    selection: Selection,
    zoom: f64,
}

impl Annotator {
    /// Mount a fresh annotator. The image size is unknown until
    /// [`Annotator::set_image_size`] is called.
    pub fn new(config: AnnotatorConfig, host: Box<dyn AnnotatorHost>) -> Self {
        let zoom = config.zoom.clamp(config.zoom.initial).unwrap_or(1.0);
        Self {
            config,
            host,
            image_size: ImageSize::default(),
            boxes: Vec::new(),
            history: History::new(),
            interaction: InteractionState::Idle,
            selection: Selection::default(),
            zoom,
        }
    }

    /// Dispatch an event to the matching handler.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::PointerDown {
                device,
                origin,
                target,
            } => self.pointer_down(device, origin, target),
            Event::PointerMove { device, origin } => self.pointer_move(device, origin),
            Event::PointerUp => self.pointer_up(),
            Event::ClearSelection => self.clear_selection(),
            Event::ChooseLabel(label) => {
                self.choose_label(&label);
            }
            Event::SetZoom(zoom) => self.set_zoom(zoom),
            Event::Undo => {
                self.undo();
            }
            Event::Redo => {
                self.redo();
            }
            Event::Save => {
                self.save();
            }
            Event::Cancel => self.cancel(),
            Event::ImageLoaded(size) => self.set_image_size(size),
        }
    }

    /// Record the natural size of the image once it has loaded.
    pub fn set_image_size(&mut self, size: ImageSize) {
        log::info!("Image size set to {}x{}", size.width, size.height);
        self.image_size = size;
    }

    /// Handle a pointer press on `target`.
    pub fn pointer_down(&mut self, device: Point, origin: Point, target: PointerTarget) {
        if !self.interaction.is_idle() {
            log::debug!("Ignoring pointer down during {:?}", self.interaction);
            return;
        }

        match target {
            PointerTarget::Background => {
                self.selection.clear();
                let point = to_image_space(device, origin, self.zoom);
                let start = clamp_to_image(point, self.image_size);
                self.interaction = interaction::begin_draw(start);
                log::debug!("Started drawing at ({:.1}, {:.1})", start.x, start.y);
            }
            PointerTarget::Box(index) => self.select_box(index),
            PointerTarget::LabelChip(index) => self.open_label_editor(index),
            PointerTarget::Handle(index, handle)
                if index < self.boxes.len() && self.selection.selected() == Some(index) =>
            {
                self.selection.close_label_editor();
                self.interaction = InteractionState::Resizing { index, handle };
                log::debug!("Started resizing box {} from {:?}", index, handle);
            }
            other => log::debug!("Ignoring pointer down on {:?}", other),
        }
    }

    /// Select a box, closing any open label editor.
    pub fn select_box(&mut self, index: usize) {
        if !self.interaction.is_idle() || index >= self.boxes.len() {
            log::debug!("Ignoring selection of box {}", index);
            return;
        }
        self.selection.select(index);
        log::info!("Selected box {}", index);
    }

    /// Select a box and open its label editor.
    pub fn open_label_editor(&mut self, index: usize) {
        if !self.interaction.is_idle() || index >= self.boxes.len() {
            log::debug!("Ignoring label editor for box {}", index);
            return;
        }
        self.selection.open_label_editor(index);
        log::info!("Editing label of box {}", index);
    }

    /// Deselect every box and close the label editor.
    pub fn clear_selection(&mut self) {
        if !self.interaction.is_idle() {
            log::debug!("Ignoring clear selection during {:?}", self.interaction);
            return;
        }
        if self.selection.selected().is_some() {
            log::info!("Cleared selection");
        }
        self.selection.clear();
    }

    /// Update the active gesture with a new pointer position.
    pub fn pointer_move(&mut self, device: Point, origin: Point) {
        let point = to_image_space(device, origin, self.zoom);
        match &mut self.interaction {
            InteractionState::Idle => {}
            InteractionState::Drawing { origin, live } => {
                *live = interaction::drawn_box(*origin, point, self.image_size, live);
            }
            InteractionState::Resizing { index, handle } => {
                let Some(target) = self.boxes.get_mut(*index) else {
                    return;
                };
                match interaction::resized_box(target, *handle, point, self.image_size) {
                    Some(next) => *target = next,
                    None => log::debug!("Rejected resize of box {} below minimum size", index),
                }
            }
        }
    }

    /// Finish the active gesture.
    pub fn pointer_up(&mut self) {
        match std::mem::take(&mut self.interaction) {
            InteractionState::Idle => {}
            InteractionState::Drawing { live, .. } => {
                if interaction::is_keepable(&live) {
                    self.boxes.push(live);
                    self.history.commit(&self.boxes);
                    log::info!("Added box, total: {}", self.boxes.len());
                } else {
                    log::debug!(
                        "Discarded {:.1}x{:.1} box below minimum size",
                        live.width,
                        live.height
                    );
                }
            }
            InteractionState::Resizing { index, .. } => {
                if self.boxes.as_slice() != self.history.current() {
                    self.history.commit(&self.boxes);
                    log::info!("Resized box {}", index);
                } else {
                    log::debug!("Resize of box {} left geometry unchanged", index);
                }
            }
        }
    }

    /// Apply a label picked in the open label editor.
    ///
    /// Label changes amend the current history entry instead of adding one.
    /// Returns false when no editor is open or the label is not offered.
    pub fn choose_label(&mut self, label: &str) -> bool {
        let Some(index) = self.selection.editing_label() else {
            log::debug!("Ignoring label {:?} with no label editor open", label);
            return false;
        };
        if !self.config.accepts_label(label) {
            log::debug!("Ignoring unknown label {:?}", label);
            return false;
        }
        let Some(annotation) = self.boxes.get_mut(index) else {
            self.selection.close_label_editor();
            return false;
        };

        annotation.label = label.to_string();
        self.history.amend_current(&self.boxes);
        self.selection.close_label_editor();
        log::info!("Labeled box {} as {:?}", index, label);
        true
    }

    /// Set the zoom factor, clamped to the configured range.
    pub fn set_zoom(&mut self, zoom: f64) {
        match self.config.zoom.clamp(zoom) {
            Some(zoom) => self.zoom = zoom,
            None => log::debug!("Ignoring invalid zoom {}", zoom),
        }
    }

    /// Step back one history entry. No-op at the start or mid-gesture.
    pub fn undo(&mut self) -> bool {
        if !self.interaction.is_idle() {
            return false;
        }
        match self.history.undo() {
            Some(previous) => {
                self.boxes = previous;
                self.selection.clear();
                log::info!("Undo, total: {}", self.boxes.len());
                true
            }
            None => false,
        }
    }

    /// Step forward one history entry. No-op at the tail or mid-gesture.
    pub fn redo(&mut self) -> bool {
        if !self.interaction.is_idle() {
            return false;
        }
        match self.history.redo() {
            Some(next) => {
                self.boxes = next;
                self.selection.clear();
                log::info!("Redo, total: {}", self.boxes.len());
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.interaction.is_idle() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.interaction.is_idle() && self.history.can_redo()
    }

    /// At least one box exists and every box has a class.
    pub fn can_save(&self) -> bool {
        !self.boxes.is_empty() && !self.boxes.iter().any(Annotation::is_unassigned)
    }

    /// Hand the committed boxes to the host. Returns false when saving is
    /// not currently allowed.
    pub fn save(&mut self) -> bool {
        if !self.can_save() {
            log::debug!("Save requested while disabled");
            return false;
        }
        log::info!("Saving {} boxes", self.boxes.len());
        self.host.on_save(&self.boxes);
        true
    }

    /// Tell the host the user abandoned editing.
    pub fn cancel(&mut self) {
        log::info!("Annotation cancelled");
        self.host.on_cancel();
    }

    pub fn boxes(&self) -> &[Annotation] {
        &self.boxes
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn image_size(&self) -> ImageSize {
        self.image_size
    }

    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    /// Build the state the presentation layer draws from.
    pub fn render_state(&self) -> RenderState {
        let drawing = self.interaction.is_drawing();
        let selected = self.selection.selected();
        let editing = self.selection.editing_label();

        let boxes = self
            .boxes
            .iter()
            .enumerate()
            .map(|(i, annotation)| BoxView {
                annotation: annotation.clone(),
                selected: selected == Some(i),
                show_handles: selected == Some(i),
                label_editor_open: editing == Some(i),
                dimmed: drawing,
            })
            .collect();

        RenderState {
            boxes,
            in_progress: self.interaction.live_box().cloned(),
            zoom: self.zoom,
            image_size: self.image_size,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            can_save: self.can_save(),
            label_choices: self.config.label_choices(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::UNASSIGNED_LABEL;
    use crate::util::geometry::Handle;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorded {
        saves: Vec<Vec<Annotation>>,
        cancels: usize,
    }

    struct RecordingHost(Rc<RefCell<Recorded>>);

    impl AnnotatorHost for RecordingHost {
        fn on_save(&mut self, annotations: &[Annotation]) {
            self.0.borrow_mut().saves.push(annotations.to_vec());
        }

        fn on_cancel(&mut self) {
            self.0.borrow_mut().cancels += 1;
        }
    }

    const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    fn annotator() -> (Annotator, Rc<RefCell<Recorded>>) {
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let config = AnnotatorConfig::with_classes(["cat", "dog"]);
        let mut annotator = Annotator::new(config, Box::new(RecordingHost(recorded.clone())));
        annotator.set_image_size(ImageSize::new(800.0, 600.0));
        (annotator, recorded)
    }

    fn draw(annotator: &mut Annotator, from: (f64, f64), to: (f64, f64)) {
        annotator.pointer_down(Point::new(from.0, from.1), ORIGIN, PointerTarget::Background);
        annotator.pointer_move(Point::new(to.0, to.1), ORIGIN);
        annotator.pointer_up();
    }

    fn resize(annotator: &mut Annotator, index: usize, handle: Handle, to: (f64, f64)) {
        annotator.pointer_down(ORIGIN, ORIGIN, PointerTarget::Handle(index, handle));
        annotator.pointer_move(Point::new(to.0, to.1), ORIGIN);
        annotator.pointer_up();
    }

    fn label(annotator: &mut Annotator, index: usize, value: &str) -> bool {
        annotator.pointer_down(ORIGIN, ORIGIN, PointerTarget::LabelChip(index));
        annotator.choose_label(value)
    }

    #[test]
    fn test_end_to_end_scenario() {
        let (mut annotator, recorded) = annotator();

        draw(&mut annotator, (10.0, 10.0), (110.0, 160.0));
        assert_eq!(
            annotator.boxes(),
            &[Annotation::unassigned(10.0, 10.0, 100.0, 150.0)]
        );
        assert_eq!(annotator.history().len(), 2);
        assert_eq!(annotator.history().cursor(), 1);

        annotator.pointer_down(Point::new(50.0, 80.0), ORIGIN, PointerTarget::Box(0));
        annotator.pointer_up();
        resize(&mut annotator, 0, Handle::BottomRight, (200.0, 260.0));
        assert_eq!(
            annotator.boxes(),
            &[Annotation::unassigned(10.0, 10.0, 190.0, 250.0)]
        );
        assert_eq!(annotator.history().len(), 3);

        assert!(annotator.undo());
        assert_eq!(annotator.boxes()[0].width, 100.0);
        assert_eq!(annotator.boxes()[0].height, 150.0);

        assert!(label(&mut annotator, 0, "cat"));
        assert_eq!(annotator.boxes()[0].label, "cat");
        assert_eq!(annotator.history().len(), 3);
        assert_eq!(annotator.history().cursor(), 1);

        assert!(annotator.can_save());
        assert!(annotator.save());
        let recorded = recorded.borrow();
        assert_eq!(
            recorded.saves,
            vec![vec![Annotation::new(10.0, 10.0, 100.0, 150.0, "cat")]]
        );
    }

    #[test]
    fn test_degenerate_draw_not_committed() {
        let (mut annotator, _) = annotator();
        draw(&mut annotator, (10.0, 10.0), (14.0, 200.0));
        draw(&mut annotator, (10.0, 10.0), (200.0, 14.9));
        draw(&mut annotator, (10.0, 10.0), (10.0, 10.0));

        assert!(annotator.boxes().is_empty());
        assert_eq!(annotator.history().cursor(), 0);
        assert_eq!(annotator.history().len(), 1);
        assert!(annotator.interaction().is_idle());
    }

    #[test]
    fn test_draw_corrects_for_zoom_and_origin() {
        let (mut annotator, _) = annotator();
        annotator.set_zoom(2.0);
        let origin = Point::new(100.0, 50.0);

        annotator.pointer_down(Point::new(120.0, 70.0), origin, PointerTarget::Background);
        annotator.pointer_move(Point::new(320.0, 370.0), origin);
        let live = annotator.render_state().in_progress.unwrap();
        assert_eq!(live, Annotation::unassigned(10.0, 10.0, 100.0, 150.0));
        annotator.pointer_up();

        assert_eq!(annotator.boxes(), &[live]);
    }

    #[test]
    fn test_draw_clamped_to_image_bounds() {
        let (mut annotator, _) = annotator();
        draw(&mut annotator, (-40.0, 500.0), (900.0, 1000.0));
        assert_eq!(
            annotator.boxes(),
            &[Annotation::unassigned(0.0, 500.0, 800.0, 100.0)]
        );
    }

    #[test]
    fn test_in_progress_box_is_not_committed() {
        let (mut annotator, _) = annotator();
        annotator.pointer_down(Point::new(10.0, 10.0), ORIGIN, PointerTarget::Background);
        annotator.pointer_move(Point::new(60.0, 60.0), ORIGIN);

        let state = annotator.render_state();
        assert!(annotator.boxes().is_empty());
        assert!(state.in_progress.is_some());
        assert!(!state.can_undo);
    }

    #[test]
    fn test_pointer_down_on_box_does_not_draw() {
        let (mut annotator, _) = annotator();
        draw(&mut annotator, (10.0, 10.0), (110.0, 160.0));

        annotator.pointer_down(Point::new(50.0, 80.0), ORIGIN, PointerTarget::Box(0));
        assert!(annotator.interaction().is_idle());
        assert_eq!(annotator.selection().selected(), Some(0));

        annotator.pointer_down(Point::new(15.0, 15.0), ORIGIN, PointerTarget::LabelChip(0));
        assert!(annotator.interaction().is_idle());
        assert_eq!(annotator.selection().editing_label(), Some(0));
    }

    #[test]
    fn test_background_click_clears_selection_and_editor() {
        let (mut annotator, _) = annotator();
        draw(&mut annotator, (10.0, 10.0), (110.0, 160.0));
        annotator.pointer_down(ORIGIN, ORIGIN, PointerTarget::LabelChip(0));

        annotator.pointer_down(Point::new(500.0, 500.0), ORIGIN, PointerTarget::Background);
        assert_eq!(annotator.selection(), Selection::default());
        assert!(annotator.interaction().is_drawing());
        assert!(annotator.render_state().boxes.iter().all(|b| b.dimmed));
    }

    #[test]
    fn test_clear_selection_does_not_draw() {
        let (mut annotator, _) = annotator();
        draw(&mut annotator, (10.0, 10.0), (110.0, 160.0));
        annotator.pointer_down(ORIGIN, ORIGIN, PointerTarget::LabelChip(0));

        annotator.handle(Event::ClearSelection);
        assert_eq!(annotator.selection(), Selection::default());
        assert!(annotator.interaction().is_idle());
        assert!(annotator.render_state().in_progress.is_none());
        assert_eq!(annotator.history().len(), 2);
    }

    #[test]
    fn test_clear_selection_ignored_mid_gesture() {
        let (mut annotator, _) = annotator();
        draw(&mut annotator, (10.0, 10.0), (110.0, 160.0));
        annotator.pointer_down(ORIGIN, ORIGIN, PointerTarget::Box(0));
        annotator.pointer_down(ORIGIN, ORIGIN, PointerTarget::Handle(0, Handle::TopLeft));

        annotator.clear_selection();
        assert!(annotator.interaction().is_resizing());
        assert_eq!(annotator.selection().selected(), Some(0));
    }

    #[test]
    fn test_handle_requires_selected_box() {
        let (mut annotator, _) = annotator();
        draw(&mut annotator, (10.0, 10.0), (110.0, 160.0));

        annotator.pointer_down(ORIGIN, ORIGIN, PointerTarget::Handle(0, Handle::TopLeft));
        assert!(annotator.interaction().is_idle());

        annotator.pointer_down(ORIGIN, ORIGIN, PointerTarget::Box(0));
        annotator.pointer_down(ORIGIN, ORIGIN, PointerTarget::Handle(0, Handle::TopLeft));
        assert!(annotator.interaction().is_resizing());
    }

    #[test]
    fn test_resize_closes_label_editor() {
        let (mut annotator, _) = annotator();
        draw(&mut annotator, (10.0, 10.0), (110.0, 160.0));
        annotator.pointer_down(ORIGIN, ORIGIN, PointerTarget::LabelChip(0));

        annotator.pointer_down(ORIGIN, ORIGIN, PointerTarget::Handle(0, Handle::BottomRight));
        assert_eq!(annotator.selection().editing_label(), None);
        assert_eq!(annotator.selection().selected(), Some(0));
        assert!(!annotator.choose_label("cat"));
    }

    #[test]
    fn test_resize_floor_holds_over_gesture() {
        let (mut annotator, _) = annotator();
        draw(&mut annotator, (100.0, 100.0), (200.0, 200.0));
        annotator.pointer_down(ORIGIN, ORIGIN, PointerTarget::Box(0));
        annotator.pointer_down(ORIGIN, ORIGIN, PointerTarget::Handle(0, Handle::TopLeft));

        for step in 0..40 {
            let p = 90.0 + step as f64 * 5.0;
            annotator.pointer_move(Point::new(p, 300.0 - p), ORIGIN);
            let b = &annotator.boxes()[0];
            assert!(b.width > 5.0 && b.height > 5.0, "collapsed at step {}: {:?}", step, b);
        }
        annotator.pointer_up();
    }

    #[test]
    fn test_rejected_resize_keeps_prior_geometry() {
        let (mut annotator, _) = annotator();
        draw(&mut annotator, (100.0, 100.0), (200.0, 200.0));
        annotator.pointer_down(ORIGIN, ORIGIN, PointerTarget::Box(0));
        annotator.pointer_down(ORIGIN, ORIGIN, PointerTarget::Handle(0, Handle::BottomRight));

        annotator.pointer_move(Point::new(150.0, 150.0), ORIGIN);
        annotator.pointer_move(Point::new(103.0, 300.0), ORIGIN);
        assert_eq!(
            annotator.boxes()[0],
            Annotation::unassigned(100.0, 100.0, 50.0, 50.0)
        );
        annotator.pointer_up();
        assert_eq!(annotator.history().len(), 3);
    }

    #[test]
    fn test_unchanged_resize_records_nothing() {
        let (mut annotator, _) = annotator();
        draw(&mut annotator, (100.0, 100.0), (200.0, 200.0));
        annotator.pointer_down(ORIGIN, ORIGIN, PointerTarget::Box(0));
        annotator.pointer_down(ORIGIN, ORIGIN, PointerTarget::Handle(0, Handle::BottomRight));
        annotator.pointer_up();

        assert_eq!(annotator.history().len(), 2);
        assert!(annotator.interaction().is_idle());
    }

    #[test]
    fn test_commit_after_undo_discards_redo() {
        let (mut annotator, _) = annotator();
        for i in 0..4 {
            let offset = i as f64 * 50.0;
            draw(&mut annotator, (offset, offset), (offset + 30.0, offset + 30.0));
        }
        annotator.undo();
        annotator.undo();
        assert!(annotator.can_redo());

        draw(&mut annotator, (400.0, 400.0), (450.0, 450.0));
        let history = annotator.history();
        assert_eq!(history.len(), history.cursor() + 1);
        assert!(!annotator.redo());
        assert_eq!(annotator.boxes().len(), 3);
    }

    #[test]
    fn test_undo_redo_restores_exact_boxes() {
        let (mut annotator, _) = annotator();
        draw(&mut annotator, (10.0, 10.0), (110.0, 160.0));
        draw(&mut annotator, (300.0, 300.0), (400.0, 420.0));
        assert!(label(&mut annotator, 1, "dog"));
        annotator.pointer_down(ORIGIN, ORIGIN, PointerTarget::Box(0));
        resize(&mut annotator, 0, Handle::TopLeft, (0.0, 5.0));

        let before = annotator.boxes().to_vec();
        assert!(annotator.undo());
        assert_ne!(annotator.boxes(), before.as_slice());
        assert!(annotator.redo());
        assert_eq!(annotator.boxes(), before.as_slice());

        assert!(annotator.undo());
        assert!(annotator.undo());
        let middle = annotator.boxes().to_vec();
        assert!(annotator.redo());
        assert!(annotator.undo());
        assert_eq!(annotator.boxes(), middle.as_slice());
    }

    #[test]
    fn test_undo_redo_noop_at_ends() {
        let (mut annotator, _) = annotator();
        assert!(!annotator.undo());
        assert!(!annotator.redo());

        draw(&mut annotator, (10.0, 10.0), (110.0, 160.0));
        assert!(!annotator.redo());
        assert!(annotator.undo());
        assert!(!annotator.undo());
        assert!(annotator.boxes().is_empty());
    }

    #[test]
    fn test_undo_ignored_mid_gesture() {
        let (mut annotator, _) = annotator();
        draw(&mut annotator, (10.0, 10.0), (110.0, 160.0));
        annotator.pointer_down(Point::new(300.0, 300.0), ORIGIN, PointerTarget::Background);

        assert!(!annotator.can_undo());
        annotator.handle(Event::Undo);
        assert_eq!(annotator.boxes().len(), 1);
        annotator.pointer_up();
        assert!(annotator.can_undo());
    }

    #[test]
    fn test_label_edit_adds_no_history_entry() {
        let (mut annotator, _) = annotator();
        draw(&mut annotator, (10.0, 10.0), (110.0, 160.0));

        assert!(label(&mut annotator, 0, "cat"));
        assert_eq!(annotator.history().len(), 2);
        assert_eq!(annotator.history().cursor(), 1);
        assert_eq!(annotator.selection().selected(), Some(0));
        assert_eq!(annotator.selection().editing_label(), None);

        assert!(annotator.undo());
        assert!(annotator.boxes().is_empty());
        assert!(annotator.redo());
        assert_eq!(annotator.boxes()[0].label, "cat");
    }

    #[test]
    fn test_label_must_be_offered() {
        let (mut annotator, _) = annotator();
        draw(&mut annotator, (10.0, 10.0), (110.0, 160.0));

        assert!(!annotator.choose_label("cat"));
        assert!(!label(&mut annotator, 0, "bird"));
        assert_eq!(annotator.selection().editing_label(), Some(0));
        assert!(annotator.choose_label(UNASSIGNED_LABEL));
        assert!(annotator.boxes()[0].is_unassigned());
    }

    #[test]
    fn test_save_gating() {
        let (mut annotator, recorded) = annotator();
        assert!(!annotator.can_save());
        assert!(!annotator.save());

        draw(&mut annotator, (10.0, 10.0), (110.0, 160.0));
        draw(&mut annotator, (300.0, 300.0), (400.0, 420.0));
        assert!(!annotator.can_save());

        label(&mut annotator, 0, "cat");
        assert!(!annotator.can_save());
        label(&mut annotator, 1, "dog");
        assert!(annotator.can_save());
        assert!(annotator.render_state().can_save);

        label(&mut annotator, 1, UNASSIGNED_LABEL);
        assert!(!annotator.save());
        assert!(recorded.borrow().saves.is_empty());
    }

    #[test]
    fn test_cancel_leaves_state_untouched() {
        let (mut annotator, recorded) = annotator();
        draw(&mut annotator, (10.0, 10.0), (110.0, 160.0));
        let boxes = annotator.boxes().to_vec();

        annotator.handle(Event::Cancel);
        assert_eq!(recorded.borrow().cancels, 1);
        assert_eq!(annotator.boxes(), boxes.as_slice());
        assert_eq!(annotator.history().len(), 2);
    }

    #[test]
    fn test_zoom_clamped_and_boxes_unaffected() {
        let (mut annotator, _) = annotator();
        draw(&mut annotator, (10.0, 10.0), (110.0, 160.0));

        annotator.handle(Event::SetZoom(9.0));
        assert_eq!(annotator.zoom(), 5.0);
        annotator.handle(Event::SetZoom(0.0));
        assert_eq!(annotator.zoom(), 0.2);
        annotator.handle(Event::SetZoom(f64::INFINITY));
        assert_eq!(annotator.zoom(), 0.2);

        assert_eq!(
            annotator.boxes(),
            &[Annotation::unassigned(10.0, 10.0, 100.0, 150.0)]
        );
    }

    #[test]
    fn test_unknown_image_size_collapses_draws() {
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let mut annotator = Annotator::new(
            AnnotatorConfig::default(),
            Box::new(RecordingHost(recorded)),
        );
        draw(&mut annotator, (10.0, 10.0), (110.0, 160.0));
        assert!(annotator.boxes().is_empty());

        annotator.handle(Event::ImageLoaded(ImageSize::new(800.0, 600.0)));
        draw(&mut annotator, (10.0, 10.0), (110.0, 160.0));
        assert_eq!(annotator.boxes().len(), 1);
    }

    #[test]
    fn test_render_state_flags() {
        let (mut annotator, _) = annotator();
        draw(&mut annotator, (10.0, 10.0), (110.0, 160.0));
        draw(&mut annotator, (300.0, 300.0), (400.0, 420.0));
        annotator.pointer_down(ORIGIN, ORIGIN, PointerTarget::LabelChip(1));

        let state = annotator.render_state();
        assert_eq!(state.boxes.len(), 2);
        assert!(!state.boxes[0].selected && !state.boxes[0].show_handles);
        assert!(state.boxes[1].selected && state.boxes[1].show_handles);
        assert_eq!(state.label_editor().map(|(i, _)| i), Some(1));
        assert!(state.can_undo);
        assert!(!state.can_redo);
        assert_eq!(state.label_choices, vec![UNASSIGNED_LABEL, "cat", "dog"]);
    }

    #[test]
    fn test_modes_stay_consistent_over_event_stream() {
        let (mut annotator, _) = annotator();
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move |bound: u64| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed % bound
        };

        for _ in 0..2000 {
            let point = Point::new(next(900) as f64 - 50.0, next(700) as f64 - 50.0);
            let count = annotator.boxes().len() as u64 + 1;
            let index = next(count) as usize;
            let event = match next(9) {
                0 => Event::PointerDown {
                    device: point,
                    origin: ORIGIN,
                    target: PointerTarget::Background,
                },
                1 => Event::PointerDown {
                    device: point,
                    origin: ORIGIN,
                    target: PointerTarget::Box(index),
                },
                2 => Event::PointerDown {
                    device: point,
                    origin: ORIGIN,
                    target: PointerTarget::LabelChip(index),
                },
                3 => Event::PointerDown {
                    device: point,
                    origin: ORIGIN,
                    target: PointerTarget::Handle(index, Handle::ALL[next(4) as usize]),
                },
                4 | 5 => Event::PointerMove {
                    device: point,
                    origin: ORIGIN,
                },
                6 => {
                    if next(4) == 0 {
                        Event::ClearSelection
                    } else {
                        Event::PointerUp
                    }
                }
                7 => Event::ChooseLabel("cat".to_string()),
                _ => {
                    if next(2) == 0 {
                        Event::Undo
                    } else {
                        Event::Redo
                    }
                }
            };
            let resizing = annotator.interaction().is_resizing();
            annotator.handle(event);

            let selection = annotator.selection();
            if let Some(editing) = selection.editing_label() {
                assert_eq!(selection.selected(), Some(editing));
            }
            if let Some(selected) = selection.selected() {
                assert!(selected < annotator.boxes().len());
            }
            if resizing {
                for b in annotator.boxes() {
                    assert!(b.width >= 5.0 && b.height >= 5.0);
                }
            }
            let history = annotator.history();
            assert!(history.cursor() < history.len());
            if annotator.interaction().is_idle() {
                assert_eq!(annotator.boxes(), history.current());
            }
        }
    }
}
