//! Overlay shape kinds and their placement parameters.

use glam::IVec2;

/// The closed set of shapes an overlay slot can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverlayShape {
    /// A "+" centred on the position.
    #[default]
    Cross,
    /// A hollow rectangle anchored at its top-left corner.
    Rectangle,
    /// An ellipse outline inscribed in the box anchored at the position.
    Ellipse,
    /// Text rendered with a bitmap font.
    Text,
}

impl OverlayShape {
    /// Map a host selector value to a shape. Unknown selectors yield `None`.
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Self::Cross),
            1 => Some(Self::Rectangle),
            2 => Some(Self::Ellipse),
            3 => Some(Self::Text),
            _ => None,
        }
    }

    pub fn index(self) -> i32 {
        match self {
            Self::Cross => 0,
            Self::Rectangle => 1,
            Self::Ellipse => 2,
            Self::Text => 3,
        }
    }
}

/// Placement of a shape in pixel coordinates.
///
/// For a cross `size` is the arm length on each side of `position`; for the
/// other shapes it is the extent of the bounding box whose top-left corner is
/// `position`. `width` is the stroke width along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShapeParams {
    pub position: IVec2,
    pub size: IVec2,
    pub width: IVec2,
}

impl ShapeParams {
    pub fn new(position: IVec2, size: IVec2, width: IVec2) -> Self {
        Self {
            position,
            size,
            width,
        }
    }

    /// Return a copy clamped to a frame of the given dimensions.
    ///
    /// The position lands in `[0, width) x [0, height)`; the size lands in
    /// `[0, width] x [0, height]` so a box can still span the whole frame.
    pub fn clamped_to(self, frame_width: usize, frame_height: usize) -> Self {
        let extent = IVec2::new(to_coord(frame_width as i64), to_coord(frame_height as i64));
        let last = (extent - IVec2::ONE).max(IVec2::ZERO);
        Self {
            position: self.position.clamp(IVec2::ZERO, last),
            size: self.size.clamp(IVec2::ZERO, extent),
            width: self.width,
        }
    }
}

fn to_coord(value: i64) -> i32 {
    value.clamp(0, i32::MAX as i64) as i32
}
