//! Offset caching across frames.
//!
//! Resolving a shape is the expensive part of drawing an overlay, and most
//! overlays stay put from one frame to the next. [`OffsetCache`] keeps the
//! offsets from the last resolution together with an explicit validity flag
//! so they can be replayed until something relevant changes.

use crate::{FrameGeometry, OffsetWriter};

/// Owned offset buffer plus the flag saying whether it may be reused.
#[derive(Debug, Clone, Default)]
pub struct OffsetCache {
    offsets: Vec<usize>,
    valid: bool,
    /// Number of times the offsets were rebuilt.
    pub recomputes: u64,
    /// Number of times the cached offsets were reused.
    pub reuses: u64,
}

impl OffsetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the cached offsets describe the current configuration.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Mark the cached offsets stale. They are kept until the next rebuild.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// The offsets produced by the last rebuild.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Return the cached offsets, rebuilding them first if the cache is stale
    /// or `changed` is set.
    ///
    /// The second element is `true` when a rebuild happened.
    pub fn get_or_rebuild<F>(&mut self, changed: bool, geometry: &FrameGeometry, build: F) -> (&[usize], bool)
    where
        F: FnOnce(&mut OffsetWriter<'_>),
    {
        if self.valid && !changed {
            self.reuses += 1;
            return (&self.offsets, false);
        }

        self.offsets.clear();
        let mut writer = OffsetWriter::new(geometry, &mut self.offsets);
        build(&mut writer);
        let clipped = writer.clipped();
        if clipped > 0 {
            tracing::trace!(clipped, "dropped offsets outside the frame");
        }
        self.valid = true;
        self.recomputes += 1;
        (&self.offsets, true)
    }
}
