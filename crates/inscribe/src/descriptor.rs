//! Per-slot overlay state kept between frames.

use inscribe_geometry::{FrameGeometry, OffsetCache, OverlayShape, resolve};
use inscribe_render::{PixelData, composite};
use inscribe_text::{FontTable, TextError, rasterize_with};

use crate::{ChangeFlags, OverlayParams, OverlayResult};

/// Result of drawing one slot into a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawOutcome {
    /// Offsets were rebuilt rather than replayed from the cache.
    pub rebuilt: bool,
    /// Number of pixel offsets drawn.
    pub offsets: usize,
    /// Number of samples written (three per offset on RGB frames).
    pub samples: usize,
}

/// One overlay slot: the last snapshot drawn and the offsets it produced.
#[derive(Debug, Clone, Default)]
pub struct OverlayDescriptor {
    params: Option<OverlayParams>,
    rendered_text: String,
    cache: OffsetCache,
    changed: bool,
    text_error: Option<TextError>,
}

impl OverlayDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The snapshot used for the most recent draw.
    pub fn params(&self) -> Option<&OverlayParams> {
        self.params.as_ref()
    }

    /// Text drawn by the most recent draw, timestamp included.
    pub fn rendered_text(&self) -> &str {
        &self.rendered_text
    }

    pub fn cache(&self) -> &OffsetCache {
        &self.cache
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Font error from the most recent rebuild of a Text overlay.
    pub fn text_error(&self) -> Option<&TextError> {
        self.text_error.as_ref()
    }

    /// Drop the cached offsets so the next draw rebuilds them.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// Install a new snapshot and decide whether the offsets must be rebuilt.
    ///
    /// `params` must already be clamped to the frame.
    pub fn refresh(&mut self, params: OverlayParams, rendered_text: String, frame_changed: bool) -> ChangeFlags {
        let mut flags = match &self.params {
            Some(previous) => params.changes_from(previous),
            None => ChangeFlags::STALE,
        };
        if rendered_text != self.rendered_text {
            flags |= ChangeFlags::TEXT;
        }
        if frame_changed {
            flags |= ChangeFlags::FRAME;
        }
        if !self.cache.is_valid() {
            flags |= ChangeFlags::STALE;
        }

        self.changed = flags.needs_rebuild();
        self.params = Some(params);
        self.rendered_text = rendered_text;
        flags
    }

    /// Resolve (or replay) this slot's offsets and composite them into `data`.
    pub fn draw(&mut self, fonts: &FontTable, geometry: &FrameGeometry, data: &mut PixelData) -> OverlayResult<DrawOutcome> {
        let Some(params) = &self.params else {
            return Ok(DrawOutcome::default());
        };
        let shape = params.shape;
        let shape_params = params.shape_params();
        let text = &self.rendered_text;

        let mut text_result = None;
        let (offsets, rebuilt) = self.cache.get_or_rebuild(self.changed, geometry, |writer| {
            if shape == OverlayShape::Text {
                text_result = Some(rasterize_with(fonts, params.font, text, &shape_params, writer));
            } else {
                resolve(shape, &shape_params, writer);
            }
        });

        if rebuilt {
            self.text_error = match text_result {
                Some(Err(err)) => {
                    tracing::warn!(%err, "text overlay skipped");
                    Some(err)
                }
                _ => None,
            };
            tracing::trace!(?shape, offsets = offsets.len(), "resolved overlay");
        }
        self.changed = false;

        let samples = composite(offsets, params.combine, params.color, data, geometry)?;
        Ok(DrawOutcome {
            rebuilt,
            offsets: offsets.len(),
            samples,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    fn draw_once(descriptor: &mut OverlayDescriptor, data: &mut PixelData, geometry: &FrameGeometry) -> DrawOutcome {
        descriptor.draw(FontTable::builtin(), geometry, data).unwrap()
    }

    #[test]
    fn test_first_refresh_is_stale() {
        let mut descriptor = OverlayDescriptor::new();
        let flags = descriptor.refresh(OverlayParams::new(OverlayShape::Cross), String::new(), false);
        assert!(flags.contains(ChangeFlags::STALE));
        assert!(descriptor.changed());
    }

    #[test]
    fn test_unchanged_snapshot_reuses_offsets() {
        let geometry = FrameGeometry::mono(10, 10);
        let mut data = PixelData::U8(vec![0; 100]);
        let params = OverlayParams::rectangle(IVec2::new(2, 2), IVec2::new(4, 4));
        let mut descriptor = OverlayDescriptor::new();

        descriptor.refresh(params.clone(), String::new(), true);
        let first = draw_once(&mut descriptor, &mut data, &geometry);
        assert!(first.rebuilt);
        assert_eq!(first.offsets, 12);

        let flags = descriptor.refresh(params, String::new(), false);
        assert!(flags.is_empty());
        let second = draw_once(&mut descriptor, &mut data, &geometry);
        assert!(!second.rebuilt);
        assert_eq!(second.offsets, 12);
        assert_eq!(descriptor.cache().recomputes, 1);
        assert_eq!(descriptor.cache().reuses, 1);
    }

    #[test]
    fn test_invalidate_forces_rebuild() {
        let geometry = FrameGeometry::mono(10, 10);
        let mut data = PixelData::U8(vec![0; 100]);
        let params = OverlayParams::cross(IVec2::new(5, 5), IVec2::new(2, 2));
        let mut descriptor = OverlayDescriptor::new();
        descriptor.refresh(params.clone(), String::new(), false);
        draw_once(&mut descriptor, &mut data, &geometry);

        descriptor.invalidate();
        let flags = descriptor.refresh(params, String::new(), false);
        assert_eq!(flags, ChangeFlags::STALE);
        assert!(draw_once(&mut descriptor, &mut data, &geometry).rebuilt);
    }

    #[test]
    fn test_invalid_font_records_error() {
        let geometry = FrameGeometry::mono(20, 20);
        let mut data = PixelData::U8(vec![0; 400]);
        let params = OverlayParams::text(IVec2::ZERO, IVec2::new(20, 20), "A").with_font(42);
        let mut descriptor = OverlayDescriptor::new();
        descriptor.refresh(params, "A".to_string(), false);

        let outcome = draw_once(&mut descriptor, &mut data, &geometry);
        assert_eq!(outcome.offsets, 0);
        assert!(matches!(descriptor.text_error(), Some(TextError::InvalidFont { index: 42, .. })));
        assert_eq!(data, PixelData::U8(vec![0; 400]));
    }

    #[test]
    fn test_rendered_text_change_triggers_rebuild() {
        let params = OverlayParams::text(IVec2::ZERO, IVec2::new(20, 20), "t");
        let mut descriptor = OverlayDescriptor::new();
        descriptor.refresh(params.clone(), "t1".to_string(), false);
        let flags = descriptor.refresh(params, "t2".to_string(), false);
        assert!(flags.contains(ChangeFlags::TEXT));
    }
}
