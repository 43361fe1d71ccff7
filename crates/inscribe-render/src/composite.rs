//! Writing overlay colors into pixel buffers.

use inscribe_core::profiling::profile_function;
use inscribe_geometry::FrameGeometry;

use crate::{PixelData, PixelKind};

/// How an overlay color combines with the pixels underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CombineMode {
    /// Replace the pixel with the color value.
    #[default]
    Overwrite,
    /// Bitwise XOR of the pixel (as an integer) with the color value.
    Xor,
}

impl CombineMode {
    /// Map the host's integer code (0 = overwrite, 1 = XOR).
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(CombineMode::Overwrite),
            1 => Some(CombineMode::Xor),
            _ => None,
        }
    }

    pub fn index(self) -> i32 {
        match self {
            CombineMode::Overwrite => 0,
            CombineMode::Xor => 1,
        }
    }
}

/// Overlay color. Mono and Bayer frames use only the green component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OverlayColor {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
}

impl OverlayColor {
    pub const fn new(red: i32, green: i32, blue: i32) -> Self {
        Self { red, green, blue }
    }

    /// A color usable on mono frames.
    pub const fn gray(value: i32) -> Self {
        Self::new(value, value, value)
    }

    pub const fn channels(self) -> [i32; 3] {
        [self.red, self.green, self.blue]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CompositeError {
    #[error("overlays cannot be drawn on {0} pixels")]
    UnsupportedPixelType(PixelKind),
}

/// Element types the compositor can write into.
///
/// Conversions follow numeric `as` casts: integers wrap, floats truncate
/// toward zero and saturate.
trait Channel: Copy {
    fn from_value(value: i32) -> Self;
    fn to_value(self) -> i32;
}

macro_rules! impl_channel {
    ($($ty:ty),*) => {
        $(
            impl Channel for $ty {
                #[inline]
                fn from_value(value: i32) -> Self {
                    value as $ty
                }

                #[inline]
                fn to_value(self) -> i32 {
                    self as i32
                }
            }
        )*
    };
}

impl_channel!(i8, u8, i16, u16, i32, u32, f32, f64);

#[inline]
fn combine<T: Channel>(mode: CombineMode, current: T, value: i32) -> T {
    match mode {
        CombineMode::Overwrite => T::from_value(value),
        CombineMode::Xor => T::from_value(current.to_value() ^ value),
    }
}

fn apply<T: Channel>(
    buf: &mut [T],
    offsets: &[usize],
    mode: CombineMode,
    color: OverlayColor,
    geometry: &FrameGeometry,
) -> usize {
    let mut written = 0;
    if geometry.color_mode.is_rgb() {
        let channels = color.channels();
        for &offset in offsets {
            for (k, &value) in channels.iter().enumerate() {
                if let Some(px) = buf.get_mut(offset + k * geometry.color_stride) {
                    *px = combine(mode, *px, value);
                    written += 1;
                }
            }
        }
    } else {
        for &offset in offsets {
            if let Some(px) = buf.get_mut(offset) {
                *px = combine(mode, *px, color.green);
                written += 1;
            }
        }
    }
    written
}

/// Write `color` at each base offset in `offsets`.
///
/// On RGB layouts each offset addresses the red sample, and green and blue
/// are found `color_stride` and `2 * color_stride` elements further on.
/// Returns the number of samples written. 64-bit integer buffers are
/// rejected before anything is touched.
pub fn composite(
    offsets: &[usize],
    mode: CombineMode,
    color: OverlayColor,
    data: &mut PixelData,
    geometry: &FrameGeometry,
) -> Result<usize, CompositeError> {
    profile_function!();
    tracing::trace!(kind = %data.kind(), ?mode, offsets = offsets.len(), "compositing");
    let written = match data {
        PixelData::I8(buf) => apply(buf, offsets, mode, color, geometry),
        PixelData::U8(buf) => apply(buf, offsets, mode, color, geometry),
        PixelData::I16(buf) => apply(buf, offsets, mode, color, geometry),
        PixelData::U16(buf) => apply(buf, offsets, mode, color, geometry),
        PixelData::I32(buf) => apply(buf, offsets, mode, color, geometry),
        PixelData::U32(buf) => apply(buf, offsets, mode, color, geometry),
        PixelData::F32(buf) => apply(buf, offsets, mode, color, geometry),
        PixelData::F64(buf) => apply(buf, offsets, mode, color, geometry),
        PixelData::I64(_) | PixelData::U64(_) => {
            return Err(CompositeError::UnsupportedPixelType(data.kind()));
        }
    };
    Ok(written)
}
