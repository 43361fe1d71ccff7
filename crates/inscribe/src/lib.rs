//! Inscribe - overlays burned into image frames
//!
//! An [`OverlayEngine`] owns a fixed number of overlay slots. For each frame
//! it reads every slot's configuration from a [`ParamSource`], works out the
//! pixel offsets of the slot's cross, rectangle, ellipse or text, and writes
//! the slot's color at those offsets in a copy of the frame. Offsets are
//! cached per slot and replayed until the configuration or the frame
//! geometry changes.
//!
//! ```
//! use std::sync::Arc;
//!
//! use inscribe::prelude::*;
//! use parking_lot::Mutex;
//!
//! let table = Arc::new(Mutex::new(ParamTable::new(8)));
//! table
//!     .lock()
//!     .set(0, OverlayParams::rectangle(IVec2::new(2, 2), IVec2::new(4, 4)).with_color(OverlayColor::gray(255)))
//!     .unwrap();
//!
//! let mut engine = OverlayEngine::new(EngineConfig::default(), table).unwrap();
//! let frame = Frame::new(vec![10, 10], ColorMode::Mono, PixelData::zeroed(PixelKind::U8, 100)).unwrap();
//!
//! let report = engine.process_frame(&frame);
//! assert!(report.is_ok());
//! assert_eq!(report.slots[0].outcome.offsets, 12);
//! ```

mod descriptor;
mod engine;
mod error;
mod params;
mod sink;
mod source;

pub use descriptor::{DrawOutcome, OverlayDescriptor};
pub use engine::{FrameReport, OverlayEngine, SlotReport, SlotStats};
pub use error::{OverlayError, OverlayResult};
pub use params::{ChangeFlags, OverlayParams};
pub use sink::FrameSink;
pub use source::{ParamSource, ParamTable};

pub use inscribe_core as core;
pub use inscribe_geometry as geometry;
pub use inscribe_render as render;
pub use inscribe_text as text;

pub mod prelude {
    pub use crate::{
        ChangeFlags, FrameReport, FrameSink, OverlayEngine, OverlayError, OverlayParams, ParamSource, ParamTable,
    };
    pub use glam::IVec2;
    pub use inscribe_core::{EngineConfig, TimestampZone};
    pub use inscribe_geometry::{ColorMode, FrameGeometry, OverlayShape};
    pub use inscribe_render::{AttributeValue, CombineMode, Frame, OverlayColor, PixelData, PixelKind};
    pub use inscribe_text::FontTable;
}
