//! Image frames passed through the overlay pipeline.
//!
//! A [`Frame`] owns its pixel buffer. Cloning a frame deep-copies the pixels,
//! which is how the engine obtains the buffer it draws into.

use std::fmt;

use chrono::{DateTime, Utc};
use inscribe_core::alloc::HashMap;
use inscribe_geometry::{ColorMode, FrameGeometry, GeometryError};

/// Numeric storage type of a frame's pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl PixelKind {
    /// Size of one element in bytes.
    pub fn bytes_per_element(self) -> usize {
        match self {
            PixelKind::I8 | PixelKind::U8 => 1,
            PixelKind::I16 | PixelKind::U16 => 2,
            PixelKind::I32 | PixelKind::U32 | PixelKind::F32 => 4,
            PixelKind::I64 | PixelKind::U64 | PixelKind::F64 => 8,
        }
    }
}

impl fmt::Display for PixelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PixelKind::I8 => "Int8",
            PixelKind::U8 => "UInt8",
            PixelKind::I16 => "Int16",
            PixelKind::U16 => "UInt16",
            PixelKind::I32 => "Int32",
            PixelKind::U32 => "UInt32",
            PixelKind::I64 => "Int64",
            PixelKind::U64 => "UInt64",
            PixelKind::F32 => "Float32",
            PixelKind::F64 => "Float64",
        };
        f.write_str(name)
    }
}

/// Pixel buffer, one variant per storage type.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    I8(Vec<i8>),
    U8(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    I64(Vec<i64>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl PixelData {
    /// A zero-filled buffer of `len` elements.
    pub fn zeroed(kind: PixelKind, len: usize) -> Self {
        match kind {
            PixelKind::I8 => PixelData::I8(vec![0; len]),
            PixelKind::U8 => PixelData::U8(vec![0; len]),
            PixelKind::I16 => PixelData::I16(vec![0; len]),
            PixelKind::U16 => PixelData::U16(vec![0; len]),
            PixelKind::I32 => PixelData::I32(vec![0; len]),
            PixelKind::U32 => PixelData::U32(vec![0; len]),
            PixelKind::I64 => PixelData::I64(vec![0; len]),
            PixelKind::U64 => PixelData::U64(vec![0; len]),
            PixelKind::F32 => PixelData::F32(vec![0.0; len]),
            PixelKind::F64 => PixelData::F64(vec![0.0; len]),
        }
    }

    pub fn kind(&self) -> PixelKind {
        match self {
            PixelData::I8(_) => PixelKind::I8,
            PixelData::U8(_) => PixelKind::U8,
            PixelData::I16(_) => PixelKind::I16,
            PixelData::U16(_) => PixelKind::U16,
            PixelData::I32(_) => PixelKind::I32,
            PixelData::U32(_) => PixelKind::U32,
            PixelData::I64(_) => PixelKind::I64,
            PixelData::U64(_) => PixelKind::U64,
            PixelData::F32(_) => PixelKind::F32,
            PixelData::F64(_) => PixelKind::F64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PixelData::I8(v) => v.len(),
            PixelData::U8(v) => v.len(),
            PixelData::I16(v) => v.len(),
            PixelData::U16(v) => v.len(),
            PixelData::I32(v) => v.len(),
            PixelData::U32(v) => v.len(),
            PixelData::I64(v) => v.len(),
            PixelData::U64(v) => v.len(),
            PixelData::F32(v) => v.len(),
            PixelData::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read element `index` widened to `f64`, for inspection and tests.
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        match self {
            PixelData::I8(v) => v.get(index).map(|&x| x as f64),
            PixelData::U8(v) => v.get(index).map(|&x| x as f64),
            PixelData::I16(v) => v.get(index).map(|&x| x as f64),
            PixelData::U16(v) => v.get(index).map(|&x| x as f64),
            PixelData::I32(v) => v.get(index).map(|&x| x as f64),
            PixelData::U32(v) => v.get(index).map(|&x| x as f64),
            PixelData::I64(v) => v.get(index).map(|&x| x as f64),
            PixelData::U64(v) => v.get(index).map(|&x| x as f64),
            PixelData::F32(v) => v.get(index).map(|&x| x as f64),
            PixelData::F64(v) => v.get(index).copied(),
        }
    }
}

/// Errors raised when constructing a frame.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("pixel buffer holds {actual} elements, dimensions need {expected}")]
    DataLength { expected: usize, actual: usize },
}

/// Metadata value attached to a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Int(i64),
    Float(f64),
    String(String),
}

/// An image frame: dimensions, color layout, pixels and metadata.
#[derive(Debug, Clone)]
pub struct Frame {
    dims: Vec<usize>,
    geometry: FrameGeometry,
    data: PixelData,
    /// Sequence number assigned by the acquisition driver.
    pub unique_id: i32,
    /// Acquisition time, used for timestamp substitution in text overlays.
    pub timestamp: DateTime<Utc>,
    pub attributes: HashMap<String, AttributeValue>,
}

impl Frame {
    /// Build a frame, checking that `dims` fit `color_mode` and that `data`
    /// holds exactly one element per sample.
    pub fn new(dims: Vec<usize>, color_mode: ColorMode, data: PixelData) -> Result<Self, FrameError> {
        let geometry = FrameGeometry::from_dims(&dims, color_mode)?;
        if data.len() != geometry.n_elements {
            return Err(FrameError::DataLength {
                expected: geometry.n_elements,
                actual: data.len(),
            });
        }
        Ok(Self {
            dims,
            geometry,
            data,
            unique_id: 0,
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            attributes: HashMap::new(),
        })
    }

    pub fn with_unique_id(mut self, unique_id: i32) -> Self {
        self.unique_id = unique_id;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn color_mode(&self) -> ColorMode {
        self.geometry.color_mode
    }

    /// Dimensions, strides and layout of this frame.
    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    pub fn pixel_kind(&self) -> PixelKind {
        self.data.kind()
    }

    pub fn data(&self) -> &PixelData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut PixelData {
        &mut self.data
    }

    /// Total size of the pixel buffer in bytes.
    pub fn total_bytes(&self) -> usize {
        self.data.len() * self.data.kind().bytes_per_element()
    }
}
