//! Scroll offsets for overflow containers
//!
//! Only the vertical axis is tracked. Offsets follow the DOM convention:
//! `0` is the top edge and positive values reveal content further down.

/// Vertical scroll position of one container
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    /// Current offset (0 = top edge)
    pub offset_y: f32,
    /// Height of the visible area
    pub viewport_height: f32,
    /// Height of everything inside the container
    pub content_height: f32,
}

impl ScrollState {
    /// Maximum vertical scroll offset (bottom edge)
    pub fn max_offset_y(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Total scrollable height, never smaller than the viewport
    pub fn scroll_height(&self) -> f32 {
        self.content_height.max(self.viewport_height)
    }

    /// Set the offset, clamped to the scrollable range
    pub fn set_offset_y(&mut self, offset: f32) {
        let clamped = offset.clamp(0.0, self.max_offset_y());
        tracing::trace!(
            "scroll offset {:.1} -> {:.1} (requested {:.1}, max {:.1})",
            self.offset_y,
            clamped,
            offset,
            self.max_offset_y()
        );
        self.offset_y = clamped;
    }

    /// Update measured sizes after layout, re-clamping the offset
    pub fn resize(&mut self, viewport_height: f32, content_height: f32) {
        self.viewport_height = viewport_height;
        self.content_height = content_height;
        self.offset_y = self.offset_y.clamp(0.0, self.max_offset_y());
    }
}
