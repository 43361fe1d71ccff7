//! Frame dimensions, strides and color layout.

use std::fmt;

/// How color channels are arranged in a frame's pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMode {
    /// Single intensity, dims `[x, y]`.
    #[default]
    Mono,
    /// Raw Bayer mosaic. Stored like [`ColorMode::Mono`].
    Bayer,
    /// Pixel-interleaved RGB, dims `[3, x, y]`.
    Rgb1,
    /// Row-interleaved RGB, dims `[x, 3, y]`.
    Rgb2,
    /// Planar RGB, dims `[x, y, 3]`.
    Rgb3,
}

impl ColorMode {
    /// Whether pixels in this layout carry three color channels.
    pub fn is_rgb(self) -> bool {
        matches!(self, ColorMode::Rgb1 | ColorMode::Rgb2 | ColorMode::Rgb3)
    }

    /// Number of dimensions a frame in this layout must have.
    pub fn ndims(self) -> usize {
        if self.is_rgb() { 3 } else { 2 }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorMode::Mono => "Mono",
            ColorMode::Bayer => "Bayer",
            ColorMode::Rgb1 => "RGB1",
            ColorMode::Rgb2 => "RGB2",
            ColorMode::Rgb3 => "RGB3",
        };
        f.write_str(name)
    }
}

/// Errors raised when dimensions do not describe a valid frame layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("{mode} frames need {expected} dimensions, got {actual}")]
    DimensionCount {
        mode: ColorMode,
        expected: usize,
        actual: usize,
    },

    #[error("{mode} frames need a color dimension of 3 at axis {axis}, got {size}")]
    ColorDimension {
        mode: ColorMode,
        axis: usize,
        size: usize,
    },
}

/// Layout information derived from a frame.
///
/// Strides are in elements of the pixel storage type, not bytes. Two
/// geometries compare equal only when every field matches, which is what the
/// overlay caches use to detect a dimension or layout change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FrameGeometry {
    pub width: usize,
    pub height: usize,
    /// Distance between horizontally adjacent pixels.
    pub x_stride: usize,
    /// Distance between vertically adjacent pixels.
    pub y_stride: usize,
    /// Distance between the red, green and blue samples of one pixel.
    /// Zero for single-intensity layouts.
    pub color_stride: usize,
    pub color_mode: ColorMode,
    /// Total number of elements in the buffer.
    pub n_elements: usize,
}

impl FrameGeometry {
    /// Derive the geometry of a frame with the given dimensions and layout.
    pub fn from_dims(dims: &[usize], color_mode: ColorMode) -> Result<Self, GeometryError> {
        let expected = color_mode.ndims();
        if dims.len() != expected {
            return Err(GeometryError::DimensionCount {
                mode: color_mode,
                expected,
                actual: dims.len(),
            });
        }

        let color_axis = match color_mode {
            ColorMode::Mono | ColorMode::Bayer => None,
            ColorMode::Rgb1 => Some(0),
            ColorMode::Rgb2 => Some(1),
            ColorMode::Rgb3 => Some(2),
        };
        if let Some(axis) = color_axis {
            if dims[axis] != 3 {
                return Err(GeometryError::ColorDimension {
                    mode: color_mode,
                    axis,
                    size: dims[axis],
                });
            }
        }

        let n_elements = dims.iter().product();
        let geometry = match color_mode {
            ColorMode::Mono | ColorMode::Bayer => Self {
                width: dims[0],
                height: dims[1],
                x_stride: 1,
                y_stride: dims[0],
                color_stride: 0,
                color_mode,
                n_elements,
            },
            ColorMode::Rgb1 => Self {
                width: dims[1],
                height: dims[2],
                x_stride: 3,
                y_stride: 3 * dims[1],
                color_stride: 1,
                color_mode,
                n_elements,
            },
            ColorMode::Rgb2 => Self {
                width: dims[0],
                height: dims[2],
                x_stride: 1,
                y_stride: 3 * dims[0],
                color_stride: dims[0],
                color_mode,
                n_elements,
            },
            ColorMode::Rgb3 => Self {
                width: dims[0],
                height: dims[1],
                x_stride: 1,
                y_stride: dims[0],
                color_stride: dims[0] * dims[1],
                color_mode,
                n_elements,
            },
        };
        Ok(geometry)
    }

    /// Convenience constructor for a single-intensity frame.
    pub fn mono(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            x_stride: 1,
            y_stride: width,
            color_stride: 0,
            color_mode: ColorMode::Mono,
            n_elements: width * height,
        }
    }

    /// Whether `(x, y)` addresses a pixel inside the frame.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64
    }

    /// Linear offset of the first channel of pixel `(x, y)`.
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        y * self.y_stride + x * self.x_stride
    }

    /// Inverse of [`FrameGeometry::offset`] for offsets produced by a resolver.
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let y = if self.y_stride == 0 { 0 } else { offset / self.y_stride };
        let rem = offset - y * self.y_stride;
        let x = if self.x_stride == 0 { 0 } else { rem / self.x_stride };
        (x, y)
    }

    /// Width as a signed coordinate.
    #[inline]
    pub fn width_i64(&self) -> i64 {
        self.width as i64
    }

    /// Height as a signed coordinate.
    #[inline]
    pub fn height_i64(&self) -> i64 {
        self.height as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mono_strides() {
        let g = FrameGeometry::from_dims(&[10, 4], ColorMode::Mono).unwrap();
        assert_eq!((g.width, g.height), (10, 4));
        assert_eq!((g.x_stride, g.y_stride, g.color_stride), (1, 10, 0));
        assert_eq!(g.n_elements, 40);
        assert_eq!(g, FrameGeometry::mono(10, 4));
    }

    #[test]
    fn test_rgb_layouts() {
        let rgb1 = FrameGeometry::from_dims(&[3, 8, 5], ColorMode::Rgb1).unwrap();
        assert_eq!((rgb1.width, rgb1.height), (8, 5));
        assert_eq!((rgb1.x_stride, rgb1.y_stride, rgb1.color_stride), (3, 24, 1));

        let rgb2 = FrameGeometry::from_dims(&[8, 3, 5], ColorMode::Rgb2).unwrap();
        assert_eq!((rgb2.width, rgb2.height), (8, 5));
        assert_eq!((rgb2.x_stride, rgb2.y_stride, rgb2.color_stride), (1, 24, 8));

        let rgb3 = FrameGeometry::from_dims(&[8, 5, 3], ColorMode::Rgb3).unwrap();
        assert_eq!((rgb3.width, rgb3.height), (8, 5));
        assert_eq!((rgb3.x_stride, rgb3.y_stride, rgb3.color_stride), (1, 8, 40));
    }

    #[test]
    fn test_bad_dimensions() {
        assert_eq!(
            FrameGeometry::from_dims(&[4, 4, 4], ColorMode::Mono),
            Err(GeometryError::DimensionCount {
                mode: ColorMode::Mono,
                expected: 2,
                actual: 3
            })
        );
        assert_eq!(
            FrameGeometry::from_dims(&[4, 4, 4], ColorMode::Rgb1),
            Err(GeometryError::ColorDimension {
                mode: ColorMode::Rgb1,
                axis: 0,
                size: 4
            })
        );
    }

    #[test]
    fn test_offset_position_inverse() {
        let g = FrameGeometry::from_dims(&[3, 7, 6], ColorMode::Rgb1).unwrap();
        for y in 0..6 {
            for x in 0..7 {
                assert_eq!(g.position(g.offset(x, y)), (x, y));
            }
        }
    }

    #[test]
    fn test_contains() {
        let g = FrameGeometry::mono(5, 3);
        assert!(g.contains(0, 0));
        assert!(g.contains(4, 2));
        assert!(!g.contains(5, 0));
        assert!(!g.contains(0, 3));
        assert!(!g.contains(-1, 1));
    }
}
