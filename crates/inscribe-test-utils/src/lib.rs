//! Test utilities for the Inscribe overlay engine.
//!
//! - [`RecordingSink`] - a [`FrameSink`] that keeps every frame it receives
//! - Frame builders for mono, Bayer and RGB test images
//! - Pixel inspection helpers
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use inscribe::prelude::*;
//! use inscribe_test_utils::{RecordingSink, mono_frame};
//! use parking_lot::Mutex;
//!
//! let table = Arc::new(Mutex::new(ParamTable::new(1)));
//! let mut engine = OverlayEngine::new(EngineConfig::default().with_max_overlays(1), table).unwrap();
//! let sink = RecordingSink::new();
//! engine.add_sink(sink.clone());
//!
//! engine.process_frame(&mono_frame(4, 4, 0));
//! assert_eq!(sink.count(), 1);
//! ```

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use inscribe::FrameSink;
use inscribe_geometry::ColorMode;
use inscribe_render::{Frame, PixelData};
use parking_lot::Mutex;

/// Sink that records every frame it is handed.
///
/// Methods take `&self`; the frame list sits behind a `parking_lot::Mutex`
/// so the sink can be shared with the engine as `Arc<dyn FrameSink>`.
#[derive(Debug, Default)]
pub struct RecordingSink {
    frames: Mutex<Vec<Arc<Frame>>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self) -> usize {
        self.frames.lock().len()
    }

    pub fn frames(&self) -> Vec<Arc<Frame>> {
        self.frames.lock().clone()
    }

    pub fn last(&self) -> Option<Arc<Frame>> {
        self.frames.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.frames.lock().clear();
    }
}

impl FrameSink for RecordingSink {
    fn on_frame(&self, frame: Arc<Frame>) {
        self.frames.lock().push(frame);
    }
}

/// A fixed, recognisable acquisition time.
pub fn test_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 17, 8, 30, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// An 8-bit mono frame filled with `fill`.
pub fn mono_frame(width: usize, height: usize, fill: u8) -> Frame {
    frame_with(vec![width, height], ColorMode::Mono, PixelData::U8(vec![fill; width * height]))
}

/// An 8-bit mono frame whose pixel `i` holds `i % 251`, so every overwrite
/// is visible.
pub fn gradient_frame(width: usize, height: usize) -> Frame {
    let data = (0..width * height).map(|i| (i % 251) as u8).collect();
    frame_with(vec![width, height], ColorMode::Mono, PixelData::U8(data))
}

/// An 8-bit Bayer mosaic frame filled with `fill`.
pub fn bayer_frame(width: usize, height: usize, fill: u8) -> Frame {
    frame_with(vec![width, height], ColorMode::Bayer, PixelData::U8(vec![fill; width * height]))
}

/// An 8-bit RGB frame in `mode` (which must be an RGB layout), zero filled.
pub fn rgb_frame(width: usize, height: usize, mode: ColorMode) -> Frame {
    let dims = match mode {
        ColorMode::Rgb1 => vec![3, width, height],
        ColorMode::Rgb2 => vec![width, 3, height],
        _ => vec![width, height, 3],
    };
    let mode = if mode.is_rgb() { mode } else { ColorMode::Rgb3 };
    frame_with(dims, mode, PixelData::U8(vec![0; 3 * width * height]))
}

/// A mono frame of arbitrary pixel storage.
pub fn typed_frame(width: usize, height: usize, data: PixelData) -> Frame {
    frame_with(vec![width, height], ColorMode::Mono, data)
}

fn frame_with(dims: Vec<usize>, mode: ColorMode, data: PixelData) -> Frame {
    match Frame::new(dims, mode, data) {
        Ok(frame) => frame.with_timestamp(test_timestamp()),
        Err(err) => panic!("invalid test frame: {err}"),
    }
}

/// Coordinates of every pixel of a mono frame that differs between `a` and `b`.
pub fn changed_pixels(a: &Frame, b: &Frame) -> Vec<(usize, usize)> {
    let geometry = a.geometry();
    (0..geometry.height)
        .flat_map(|y| (0..geometry.width).map(move |x| (x, y)))
        .filter(|&(x, y)| {
            let offset = geometry.offset(x, y);
            a.data().get_f64(offset) != b.data().get_f64(offset)
        })
        .collect()
}

/// Value of mono pixel `(x, y)`.
pub fn pixel(frame: &Frame, x: usize, y: usize) -> Option<f64> {
    frame.data().get_f64(frame.geometry().offset(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.on_frame(Arc::new(mono_frame(2, 2, 0).with_unique_id(1)));
        sink.on_frame(Arc::new(mono_frame(2, 2, 0).with_unique_id(2)));
        let ids: Vec<_> = sink.frames().iter().map(|f| f.unique_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(sink.last().unwrap().unique_id, 2);
        sink.clear();
        assert_eq!(sink.count(), 0);
    }

    #[test]
    fn test_rgb_frame_layouts() {
        for mode in [ColorMode::Rgb1, ColorMode::Rgb2, ColorMode::Rgb3] {
            let frame = rgb_frame(5, 4, mode);
            assert_eq!(frame.geometry().width, 5);
            assert_eq!(frame.geometry().height, 4);
            assert_eq!(frame.color_mode(), mode);
        }
    }

    #[test]
    fn test_bayer_frame_is_two_dimensional() {
        let frame = bayer_frame(6, 4, 9);
        assert_eq!(frame.color_mode(), ColorMode::Bayer);
        assert_eq!(frame.data().len(), 24);
        assert_eq!(pixel(&frame, 5, 3), Some(9.0));
    }

    #[test]
    fn test_changed_pixels() {
        let a = mono_frame(3, 3, 0);
        let mut b = a.clone();
        if let PixelData::U8(v) = b.data_mut() {
            v[4] = 1;
        }
        assert_eq!(changed_pixels(&a, &b), vec![(1, 1)]);
        assert_eq!(pixel(&b, 1, 1), Some(1.0));
    }
}
