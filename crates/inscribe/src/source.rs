//! The host-side parameter seam.
//!
//! The engine never holds configuration of its own between frames. Each
//! frame it takes the shared lock on a [`ParamSource`], copies out one
//! overlay snapshot, and drops the lock again before doing any drawing.

use crate::{OverlayError, OverlayParams, OverlayResult};

/// Host storage the engine reads overlay configuration from and publishes
/// frame information to.
pub trait ParamSource: Send {
    /// Snapshot of slot `slot`, or `None` if the host has nothing there.
    fn overlay(&self, slot: usize) -> Option<OverlayParams>;

    /// Receive the dimensions of the frame just processed.
    fn publish_frame_size(&mut self, width: usize, height: usize);

    /// Set the host's "forward frames downstream" flag.
    fn set_array_callbacks(&mut self, enabled: bool);
}

/// In-memory [`ParamSource`] with a fixed number of slots.
#[derive(Debug, Clone, Default)]
pub struct ParamTable {
    slots: Vec<OverlayParams>,
    max_size: (usize, usize),
    array_callbacks: bool,
}

impl ParamTable {
    /// A table of `count` disabled slots.
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![OverlayParams::default(); count],
            max_size: (0, 0),
            array_callbacks: false,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&OverlayParams> {
        self.slots.get(slot)
    }

    /// Replace the configuration of `slot`.
    pub fn set(&mut self, slot: usize, params: OverlayParams) -> OverlayResult<()> {
        *self.slot_mut(slot)? = params;
        Ok(())
    }

    /// Edit the configuration of `slot` in place.
    pub fn update<F>(&mut self, slot: usize, edit: F) -> OverlayResult<()>
    where
        F: FnOnce(&mut OverlayParams),
    {
        edit(self.slot_mut(slot)?);
        Ok(())
    }

    /// Enable or disable `slot` without touching its other fields.
    pub fn set_enabled(&mut self, slot: usize, enabled: bool) -> OverlayResult<()> {
        self.update(slot, |params| params.enabled = enabled)
    }

    /// Frame dimensions last published by the engine.
    pub fn max_size(&self) -> (usize, usize) {
        self.max_size
    }

    pub fn array_callbacks(&self) -> bool {
        self.array_callbacks
    }

    fn slot_mut(&mut self, slot: usize) -> OverlayResult<&mut OverlayParams> {
        let count = self.slots.len();
        self.slots
            .get_mut(slot)
            .ok_or(OverlayError::SlotOutOfRange { slot, count })
    }
}

impl ParamSource for ParamTable {
    fn overlay(&self, slot: usize) -> Option<OverlayParams> {
        self.slots.get(slot).cloned()
    }

    fn publish_frame_size(&mut self, width: usize, height: usize) {
        self.max_size = (width, height);
    }

    fn set_array_callbacks(&mut self, enabled: bool) {
        self.array_callbacks = enabled;
    }
}
