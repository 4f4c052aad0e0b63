// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host editor services.
//!
//! The engine never talks to the host editor through globals; every call
//! that needs a host service receives a [`HostEditor`] context. The trait
//! covers the full surface the engine consumes: repaint scheduling, undo
//! recording, dirty/save marking, cursor-rect registration, and the couple
//! of draw primitives the group handler needs.

use egui::{CursorIcon, Rect};

/// Services supplied by the host editor.
///
/// All methods are fire-and-forget; the engine never inspects host state
/// through this trait.
pub trait HostEditor {
    /// Schedule a repaint of the editor window
    fn request_repaint(&mut self);

    /// Record an undo step with the given label before a mutation
    fn record_undo(&mut self, label: &str);

    /// Mark the open graph asset as modified
    fn mark_dirty(&mut self);

    /// Flush modified assets to disk
    fn save_assets(&mut self);

    /// Register a window-space rectangle that changes the mouse cursor
    fn add_cursor_rect(&mut self, rect: Rect, cursor: CursorIcon);

    /// Draw the resize corner icon in node-local space
    fn draw_corner_icon(&mut self, rect: Rect, color: egui::Color32);
}

/// A host that ignores every request. Useful for headless processing of
/// graphs outside a live editor session.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl HostEditor for NullHost {
    fn request_repaint(&mut self) {}
    fn record_undo(&mut self, _label: &str) {}
    fn mark_dirty(&mut self) {}
    fn save_assets(&mut self) {}
    fn add_cursor_rect(&mut self, _rect: Rect, _cursor: CursorIcon) {}
    fn draw_corner_icon(&mut self, _rect: Rect, _color: egui::Color32) {}
}

/// Test host recording what the engine asked for.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub repaints: usize,
    pub undo_labels: Vec<String>,
    pub dirty_marks: usize,
    pub saves: usize,
    pub cursor_rects: Vec<(Rect, CursorIcon)>,
    pub corner_icons: Vec<Rect>,
}

#[cfg(test)]
impl HostEditor for RecordingHost {
    fn request_repaint(&mut self) {
        self.repaints += 1;
    }

    fn record_undo(&mut self, label: &str) {
        self.undo_labels.push(label.to_owned());
    }

    fn mark_dirty(&mut self) {
        self.dirty_marks += 1;
    }

    fn save_assets(&mut self) {
        self.saves += 1;
    }

    fn add_cursor_rect(&mut self, rect: Rect, cursor: CursorIcon) {
        self.cursor_rects.push((rect, cursor));
    }

    fn draw_corner_icon(&mut self, rect: Rect, _color: egui::Color32) {
        self.corner_icons.push(rect);
    }
}
