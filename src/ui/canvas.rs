// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for image display and box annotation.
//!
//! This module paints the image, the committed boxes and the box being
//! drawn, and converts mouse input into annotator events.

use bbox_annotator::annotator::{hit_test, BoxView, Event, PointerTarget, RenderState};
use bbox_annotator::models::annotation::Annotation;
use bbox_annotator::util::geometry::{
    to_device_space, to_image_space, Handle, Point, HANDLE_SIZE, LABEL_CHIP_HEIGHT,
};

const BOX_COLOR: egui::Color32 = egui::Color32::from_rgb(13, 158, 202);
const SELECTED_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(3, 32, 40, 51);

/// Display the canvas area and collect events from mouse interaction.
pub fn show(
    ui: &mut egui::Ui,
    state: &RenderState,
    image_texture: &Option<egui::TextureHandle>,
) -> Vec<Event> {
    let mut events = Vec::new();
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(240);

    let (Some(texture), true) = (image_texture, state.image_size.is_known()) else {
        ui.centered_and_justified(|ui| {
            ui.label(egui::RichText::new("Loading image...").color(egui::Color32::GRAY));
        });
        return events;
    };

    let zoom = state.zoom as f32;
    let display_size = egui::vec2(
        state.image_size.width as f32 * zoom,
        state.image_size.height as f32 * zoom,
    );

    // Registered first so the image, scrollbars and popups all sit above it.
    let background = ui.interact(
        ui.max_rect(),
        ui.id().with("canvas_background"),
        egui::Sense::click(),
    );

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .drag_to_scroll(false)
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(display_size, egui::Sense::click_and_drag());
            let image_rect = response.rect;
            let origin = Point::new(image_rect.min.x as f64, image_rect.min.y as f64);

            painter.image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );

            for view in &state.boxes {
                draw_box(&painter, view, image_rect, zoom);
            }
            if let Some(live) = &state.in_progress {
                draw_in_progress(&painter, live, image_rect, zoom);
            }

            collect_pointer_events(ui, &response, state, origin, &mut events);

            if let Some((_, view)) = state.label_editor() {
                let anchor = to_screen(&view.annotation, image_rect, zoom).left_top();
                show_label_picker(ui.ctx(), anchor, view, &state.label_choices, &mut events);
            }
        });

    let pressed = ui.input(|i| i.pointer.primary_pressed());
    if pressed && background.is_pointer_button_down_on() {
        events.push(Event::ClearSelection);
    }

    events
}

/// Turn this frame's pointer input into annotator events.
fn collect_pointer_events(
    ui: &egui::Ui,
    response: &egui::Response,
    state: &RenderState,
    origin: Point,
    events: &mut Vec<Event>,
) {
    let (pos, pressed, released, moved) = ui.input(|i| {
        (
            i.pointer.interact_pos(),
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.delta() != egui::Vec2::ZERO,
        )
    });

    let boxes: Vec<Annotation> = state.boxes.iter().map(|v| v.annotation.clone()).collect();
    let selected = state.boxes.iter().position(|v| v.selected);
    let target_at = |pos: egui::Pos2| {
        let device = Point::new(pos.x as f64, pos.y as f64);
        hit_test(&boxes, selected, to_image_space(device, origin, state.zoom))
    };

    if state.in_progress.is_some() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
    } else if let Some(hover) = response.hover_pos() {
        ui.ctx().set_cursor_icon(cursor_for(target_at(hover)));
    }

    if let Some(pos) = pos {
        let device = Point::new(pos.x as f64, pos.y as f64);
        if pressed && response.hovered() {
            let target = target_at(pos);
            events.push(Event::PointerDown {
                device,
                origin,
                target,
            });
        } else if moved {
            events.push(Event::PointerMove { device, origin });
        }
    }

    if released {
        events.push(Event::PointerUp);
    }
}

/// Cursor shown while hovering `target`.
fn cursor_for(target: PointerTarget) -> egui::CursorIcon {
    match target {
        PointerTarget::Background => egui::CursorIcon::Crosshair,
        PointerTarget::Box(_) | PointerTarget::LabelChip(_) => egui::CursorIcon::PointingHand,
        PointerTarget::Handle(_, handle) => match handle {
            Handle::TopLeft => egui::CursorIcon::ResizeNorthWest,
            Handle::TopRight => egui::CursorIcon::ResizeNorthEast,
            Handle::BottomLeft => egui::CursorIcon::ResizeSouthWest,
            Handle::BottomRight => egui::CursorIcon::ResizeSouthEast,
        },
    }
}

fn to_screen(annotation: &Annotation, image_rect: egui::Rect, zoom: f32) -> egui::Rect {
    let origin = Point::new(image_rect.min.x as f64, image_rect.min.y as f64);
    let min = to_device_space(Point::new(annotation.x, annotation.y), origin, zoom as f64);
    egui::Rect::from_min_size(
        egui::pos2(min.x as f32, min.y as f32),
        egui::vec2(annotation.width as f32 * zoom, annotation.height as f32 * zoom),
    )
}

/// Draw a committed box with its label chip and, when selected, its handles.
fn draw_box(painter: &egui::Painter, view: &BoxView, image_rect: egui::Rect, zoom: f32) {
    let rect = to_screen(&view.annotation, image_rect, zoom);
    let opacity = if view.dimmed { 0.5 } else { 1.0 };
    let color = BOX_COLOR.gamma_multiply(opacity);

    if view.selected {
        painter.rect_filled(rect, 0.0, SELECTED_FILL);
    }
    painter.rect_stroke(rect, 0.0, egui::Stroke::new(2.0, color));

    let chip_height = (LABEL_CHIP_HEIGHT as f32 * zoom).min(rect.height());
    let chip = egui::Rect::from_min_size(rect.min, egui::vec2(rect.width(), chip_height));
    painter.rect_filled(chip, 0.0, color);
    painter.with_clip_rect(chip).text(
        chip.left_center() + egui::vec2(2.0, 0.0),
        egui::Align2::LEFT_CENTER,
        &view.annotation.label,
        egui::FontId::proportional(12.0 * zoom.min(1.5)),
        egui::Color32::WHITE.gamma_multiply(opacity),
    );

    if view.show_handles {
        let size = egui::vec2(HANDLE_SIZE as f32 * zoom, HANDLE_SIZE as f32 * zoom);
        for handle in Handle::ALL {
            let anchor = handle.anchor(&view.annotation);
            let center = image_rect.min + egui::vec2(anchor.x as f32 * zoom, anchor.y as f32 * zoom);
            let handle_rect = egui::Rect::from_center_size(center, size);
            painter.rect_filled(handle_rect, 0.0, egui::Color32::WHITE);
            painter.rect_stroke(handle_rect, 0.0, egui::Stroke::new(1.0, egui::Color32::BLACK));
        }
    }
}

/// Draw the box being dragged out as a dashed outline.
fn draw_in_progress(painter: &egui::Painter, live: &Annotation, image_rect: egui::Rect, zoom: f32) {
    let rect = to_screen(live, image_rect, zoom);
    let outline = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ];
    painter.extend(egui::Shape::dashed_line(
        &outline,
        egui::Stroke::new(2.0, egui::Color32::RED),
        6.0,
        4.0,
    ));
}

/// Popup listing the label choices for the box being edited.
fn show_label_picker(
    ctx: &egui::Context,
    anchor: egui::Pos2,
    view: &BoxView,
    choices: &[String],
    events: &mut Vec<Event>,
) {
    egui::Area::new(egui::Id::new("label_picker"))
        .fixed_pos(anchor - egui::vec2(0.0, 4.0))
        .pivot(egui::Align2::LEFT_BOTTOM)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                for choice in choices {
                    let current = *choice == view.annotation.label;
                    if ui.selectable_label(current, choice).clicked() {
                        events.push(Event::ChooseLabel(choice.clone()));
                    }
                }
            });
        });
}
