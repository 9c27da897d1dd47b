// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Interactive bounding-box annotation.
//!
//! The core of this crate is [`annotator::Annotator`], a state machine that
//! turns pointer gestures into labeled boxes over an image, with linear
//! undo/redo and zoom-corrected coordinate mapping. Rendering is left to the
//! caller, which reads an [`annotator::RenderState`] after each event.

pub mod annotator;
pub mod config;
pub mod history;
pub mod io;
pub mod models;
pub mod util;

pub use annotator::{Annotator, AnnotatorHost, Event, PointerTarget, RenderState};
pub use config::AnnotatorConfig;
pub use models::annotation::{Annotation, ImageSize, UNASSIGNED_LABEL};
