//! Overlay configuration snapshots and change classification.

use bitflags::bitflags;
use glam::IVec2;
use inscribe_geometry::{FrameGeometry, OverlayShape, ShapeParams};
use inscribe_render::{CombineMode, OverlayColor};

bitflags! {
    /// What changed in an overlay slot since the previous frame.
    ///
    /// Any non-empty set forces the slot's offsets to be rebuilt.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ChangeFlags: u8 {
        /// Shape, position, size or line width.
        const PLACEMENT = 1 << 0;
        /// Color or combine mode.
        const STYLE     = 1 << 1;
        /// Display text, font, timestamp format, or the rendered string.
        const TEXT      = 1 << 2;
        /// Frame dimensions or color layout.
        const FRAME     = 1 << 3;
        /// No usable offsets are cached for the slot.
        const STALE     = 1 << 4;
    }
}

impl ChangeFlags {
    /// Whether cached offsets must be discarded.
    #[inline]
    pub fn needs_rebuild(self) -> bool {
        !self.is_empty()
    }
}

/// Every user-settable field of one overlay slot, as read from the host.
///
/// Two snapshots are compared to decide whether the slot's cached offsets
/// can be reused. `name` is informational and does not take part in the
/// comparison.
#[derive(Debug, Clone, Default)]
pub struct OverlayParams {
    pub enabled: bool,
    pub name: String,
    pub shape: OverlayShape,
    pub position: IVec2,
    pub size: IVec2,
    pub width: IVec2,
    pub combine: CombineMode,
    pub color: OverlayColor,
    /// strftime pattern appended to `text` for Text overlays; empty disables it.
    pub timestamp_format: String,
    pub font: i32,
    pub text: String,
}

impl PartialEq for OverlayParams {
    fn eq(&self, other: &Self) -> bool {
        self.enabled == other.enabled && self.changes_from(other).is_empty()
    }
}

impl OverlayParams {
    /// An enabled overlay of `shape` with a one pixel line width.
    pub fn new(shape: OverlayShape) -> Self {
        Self {
            enabled: true,
            shape,
            width: IVec2::ONE,
            ..Default::default()
        }
    }

    pub fn cross(center: IVec2, arm: IVec2) -> Self {
        Self::new(OverlayShape::Cross).with_position(center).with_size(arm)
    }

    pub fn rectangle(corner: IVec2, size: IVec2) -> Self {
        Self::new(OverlayShape::Rectangle).with_position(corner).with_size(size)
    }

    pub fn ellipse(corner: IVec2, size: IVec2) -> Self {
        Self::new(OverlayShape::Ellipse).with_position(corner).with_size(size)
    }

    pub fn text(corner: IVec2, size: IVec2, text: impl Into<String>) -> Self {
        let mut params = Self::new(OverlayShape::Text).with_position(corner).with_size(size);
        params.text = text.into();
        params
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_position(mut self, position: IVec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_size(mut self, size: IVec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_width(mut self, width: IVec2) -> Self {
        self.width = width;
        self
    }

    pub fn with_combine(mut self, combine: CombineMode) -> Self {
        self.combine = combine;
        self
    }

    pub fn with_color(mut self, color: OverlayColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_font(mut self, font: i32) -> Self {
        self.font = font;
        self
    }

    pub fn with_timestamp_format(mut self, pattern: impl Into<String>) -> Self {
        self.timestamp_format = pattern.into();
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn shape_params(&self) -> ShapeParams {
        ShapeParams::new(self.position, self.size, self.width)
    }

    /// Copy with position and size clamped into the frame.
    pub fn clamped_to(&self, geometry: &FrameGeometry) -> Self {
        let clamped = self.shape_params().clamped_to(geometry.width, geometry.height);
        Self {
            position: clamped.position,
            size: clamped.size,
            ..self.clone()
        }
    }

    /// Classify the differences between `self` and an older snapshot.
    pub fn changes_from(&self, previous: &Self) -> ChangeFlags {
        let mut flags = ChangeFlags::empty();
        if self.shape != previous.shape
            || self.position != previous.position
            || self.size != previous.size
            || self.width != previous.width
        {
            flags |= ChangeFlags::PLACEMENT;
        }
        if self.combine != previous.combine || self.color != previous.color {
            flags |= ChangeFlags::STYLE;
        }
        if self.text != previous.text
            || self.font != previous.font
            || self.timestamp_format != previous.timestamp_format
        {
            flags |= ChangeFlags::TEXT;
        }
        flags
    }
}
