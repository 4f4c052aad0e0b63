// SPDX-License-Identifier: MIT OR Apache-2.0
//! View state and the grid ↔ window coordinate transform.
//!
//! Grid space is the infinite, zoom-independent canvas graph entities live
//! in; window space is pixels inside the current viewport. The transform is
//! deliberately asymmetric: the pan offset is zoom-compensated while point
//! translation is not, so panning pulls the canvas at a constant screen rate
//! at any zoom while content scales toward the viewport center.
//!
//! `window_to_grid` is the exact algebraic inverse of `grid_to_window`. The
//! "no clip" variant exists only for forward placement of fixed-size
//! overlays (resize cursor rects); it is never used for reverse mapping.

use crate::host::HostEditor;
use crate::settings::EditorSettings;
use egui::{Pos2, Rect, Vec2};

/// Pan/zoom state of one editor window.
///
/// Every pan or zoom mutation requests a repaint through the host context;
/// reading never does.
#[derive(Debug, Clone)]
pub struct ViewState {
    viewport_size: Vec2,
    pan_offset: Vec2,
    zoom: f32,
    min_zoom: f32,
    max_zoom: f32,
}

impl ViewState {
    /// Create a view with no pan and unit zoom
    pub fn new(settings: &EditorSettings) -> Self {
        Self {
            viewport_size: Vec2::ZERO,
            pan_offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: settings.min_zoom,
            max_zoom: settings.max_zoom,
        }
    }

    /// Current viewport size in window pixels
    pub fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    /// Update the viewport size (host window resized)
    pub fn set_viewport_size(&mut self, size: Vec2) {
        self.viewport_size = size;
    }

    /// Current pan offset
    pub fn pan_offset(&self) -> Vec2 {
        self.pan_offset
    }

    /// Set the pan offset and request a repaint
    pub fn set_pan_offset(&mut self, offset: Vec2, host: &mut dyn HostEditor) {
        self.pan_offset = offset;
        host.request_repaint();
    }

    /// Current zoom factor
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the zoom factor, clamped to the configured range, and request a
    /// repaint. Out-of-range input yields the boundary value.
    pub fn set_zoom(&mut self, zoom: f32, host: &mut dyn HostEditor) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        host.request_repaint();
    }

    /// Map a window-space point to grid space
    pub fn window_to_grid(&self, window_pos: Pos2) -> Pos2 {
        let center = self.viewport_size * 0.5;
        ((window_pos.to_vec2() - center - self.pan_offset / self.zoom) * self.zoom).to_pos2()
    }

    /// Map a grid-space point to window space
    pub fn grid_to_window(&self, grid_pos: Pos2) -> Pos2 {
        let center = self.viewport_size * 0.5;
        (center + self.pan_offset / self.zoom + grid_pos.to_vec2() / self.zoom).to_pos2()
    }

    /// Forward-only placement variant: the viewport center is zoom-scaled
    /// and the point is translated unscaled. Used for overlays whose size
    /// must not shrink with zoom.
    pub fn grid_to_window_no_clipped(&self, grid_pos: Pos2) -> Pos2 {
        let center = self.viewport_size * 0.5;
        (center * self.zoom + self.pan_offset + grid_pos.to_vec2()).to_pos2()
    }

    /// Map a grid-space rect to window space, scaling its size by zoom
    pub fn grid_to_window_rect(&self, grid_rect: Rect) -> Rect {
        Rect::from_min_size(self.grid_to_window(grid_rect.min), grid_rect.size() / self.zoom)
    }

    /// Map a grid-space rect to window space without touching its size
    pub fn grid_to_window_rect_no_clipped(&self, grid_rect: Rect) -> Rect {
        Rect::from_min_size(self.grid_to_window_no_clipped(grid_rect.min), grid_rect.size())
    }
}
