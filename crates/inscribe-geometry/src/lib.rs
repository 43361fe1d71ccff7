//! Inscribe Geometry - pixel address resolution for overlay shapes
//!
//! This crate provides:
//! - [`FrameGeometry`]: dimensions, strides and color layout of a frame
//! - [`OverlayShape`] and [`ShapeParams`]: what to draw and where
//! - Resolvers turning a cross, rectangle or ellipse into linear pixel offsets
//! - [`OffsetCache`]: offsets kept across frames until the shape changes
//!
//! # Example
//!
//! ```
//! use inscribe_geometry::*;
//! use glam::IVec2;
//!
//! let geometry = FrameGeometry::mono(10, 10);
//! let params = ShapeParams::new(IVec2::new(2, 2), IVec2::new(4, 4), IVec2::ONE);
//!
//! let mut offsets = Vec::new();
//! let mut writer = OffsetWriter::new(&geometry, &mut offsets);
//! resolve(OverlayShape::Rectangle, &params, &mut writer);
//!
//! assert_eq!(offsets.len(), 12);
//! ```

mod cache;
mod frame_geometry;
mod offsets;
mod resolve;
mod shape;

pub use cache::*;
pub use frame_geometry::*;
pub use offsets::*;
pub use resolve::{cross, ellipse, rectangle, resolve};
pub use shape::*;

pub use glam::IVec2;
