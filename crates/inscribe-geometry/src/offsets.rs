//! Offset accumulation shared by every resolver.

use crate::FrameGeometry;

/// Appends linear pixel offsets for a frame, dropping coordinates that fall
/// outside it.
///
/// Offsets address the first color channel of a pixel; the compositor adds
/// the channel stride for green and blue.
pub struct OffsetWriter<'a> {
    geometry: &'a FrameGeometry,
    out: &'a mut Vec<usize>,
    clipped: usize,
}

impl<'a> OffsetWriter<'a> {
    pub fn new(geometry: &'a FrameGeometry, out: &'a mut Vec<usize>) -> Self {
        Self {
            geometry,
            out,
            clipped: 0,
        }
    }

    pub fn geometry(&self) -> &FrameGeometry {
        self.geometry
    }

    /// Emit pixel `(x, y)` if it lies inside the frame.
    #[inline]
    pub fn push(&mut self, x: i64, y: i64) {
        if self.geometry.contains(x, y) {
            self.out.push(self.geometry.offset(x as usize, y as usize));
        } else {
            self.clipped += 1;
        }
    }

    /// Emit the pixels `x_start..x_end` of row `y`.
    #[inline]
    pub fn push_span(&mut self, y: i64, x_start: i64, x_end: i64) {
        if y < 0 || y >= self.geometry.height_i64() {
            self.clipped += (x_end - x_start).max(0) as usize;
            return;
        }
        let lo = x_start.max(0);
        let hi = x_end.min(self.geometry.width_i64());
        self.clipped += ((x_end - x_start).max(0) - (hi - lo).max(0)) as usize;
        for x in lo..hi {
            self.out.push(self.geometry.offset(x as usize, y as usize));
        }
    }

    /// Number of pixels dropped because they fell outside the frame.
    pub fn clipped(&self) -> usize {
        self.clipped
    }

    /// Number of offsets held by the underlying buffer.
    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }
}
