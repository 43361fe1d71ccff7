//! Inscribe Text - bitmap font text for overlays
//!
//! This crate provides:
//! - [`FontBitmap`] and the built-in [`FontTable`]
//! - Timestamp substitution with strftime patterns ([`compose_text`])
//! - The glyph rasterizer, emitting pixel offsets through the same
//!   [`OffsetWriter`](inscribe_geometry::OffsetWriter) the shape resolvers use
//!
//! ## Quick Start
//!
//! ```
//! use inscribe_geometry::{FrameGeometry, IVec2, OffsetWriter, ShapeParams};
//! use inscribe_text::{FontTable, rasterize_with};
//!
//! let geometry = FrameGeometry::mono(64, 16);
//! let params = ShapeParams::new(IVec2::ZERO, IVec2::new(64, 16), IVec2::ONE);
//!
//! let mut offsets = Vec::new();
//! let mut writer = OffsetWriter::new(&geometry, &mut offsets);
//! rasterize_with(FontTable::builtin(), 0, "Hi", &params, &mut writer).unwrap();
//! assert!(!offsets.is_empty());
//! ```

mod error;
pub mod font;
pub mod rasterize;
pub mod timestamp;

pub use error::{TextError, TextResult};
pub use font::{BUILTIN_FONTS, FontBitmap, FontTable};
pub use rasterize::{rasterize, rasterize_with};
pub use timestamp::{TimestampFormatter, compose_text};
