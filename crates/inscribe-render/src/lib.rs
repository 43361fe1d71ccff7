//! Inscribe Render - frames and pixel compositing
//!
//! [`Frame`] carries an image in one of ten storage types ([`PixelData`]).
//! [`composite`] writes an [`OverlayColor`] at a list of pixel offsets,
//! either overwriting or XOR-ing the samples already there.
//!
//! ```
//! use inscribe_geometry::ColorMode;
//! use inscribe_render::*;
//!
//! let mut frame = Frame::new(vec![4, 4], ColorMode::Mono, PixelData::zeroed(PixelKind::U8, 16)).unwrap();
//! let geometry = frame.geometry();
//! composite(&[0, 5], CombineMode::Overwrite, OverlayColor::gray(255), frame.data_mut(), &geometry).unwrap();
//! assert_eq!(frame.data().get_f64(5), Some(255.0));
//! ```

mod composite;
mod frame;

pub use composite::{CombineMode, CompositeError, OverlayColor, composite};
pub use frame::{AttributeValue, Frame, FrameError, PixelData, PixelKind};
