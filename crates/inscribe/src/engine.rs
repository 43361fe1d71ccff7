//! The frame orchestrator.

use std::sync::Arc;

use inscribe_core::EngineConfig;
use inscribe_core::profiling::{self, profile_function, profile_scope};
use inscribe_geometry::{FrameGeometry, OverlayShape};
use inscribe_render::Frame;
use inscribe_text::{FontTable, TextError, TimestampFormatter, compose_text};
use parking_lot::Mutex;

use crate::{ChangeFlags, DrawOutcome, FrameSink, OverlayDescriptor, OverlayError, OverlayResult, ParamSource};

/// What happened to one enabled slot during a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotReport {
    pub slot: usize,
    pub flags: ChangeFlags,
    pub outcome: DrawOutcome,
    /// Set when a Text overlay's font could not be used.
    pub text_error: Option<TextError>,
}

/// Summary of one [`OverlayEngine::process_frame`] call.
#[derive(Debug, Default)]
pub struct FrameReport {
    pub unique_id: i32,
    pub geometry_changed: bool,
    /// Enabled slots that were drawn, in slot order.
    pub slots: Vec<SlotReport>,
    /// Set when drawing was abandoned part way through the frame. The frame
    /// is still forwarded.
    pub error: Option<OverlayError>,
}

impl FrameReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn slot(&self, slot: usize) -> Option<&SlotReport> {
        self.slots.iter().find(|report| report.slot == slot)
    }
}

/// Cumulative cache counters for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotStats {
    pub slot: usize,
    pub recomputes: u64,
    pub reuses: u64,
    /// Offsets currently cached.
    pub offsets: usize,
}

/// Draws the configured overlays into each frame and forwards the result.
///
/// Configuration lives in a host-owned [`ParamSource`] behind a mutex. The
/// lock is held only while a slot's snapshot is copied out or frame
/// information is published; resolution and compositing run unlocked.
pub struct OverlayEngine<P: ParamSource> {
    config: EngineConfig,
    params: Arc<Mutex<P>>,
    fonts: &'static FontTable,
    formatter: TimestampFormatter,
    descriptors: Vec<OverlayDescriptor>,
    geometry: Option<FrameGeometry>,
    last_frame: Option<Arc<Frame>>,
    sinks: Vec<Arc<dyn FrameSink>>,
    frames_processed: u64,
}

impl<P: ParamSource> OverlayEngine<P> {
    /// Create an engine with the built-in fonts.
    pub fn new(config: EngineConfig, params: Arc<Mutex<P>>) -> OverlayResult<Self> {
        Self::with_fonts(config, params, FontTable::builtin())
    }

    pub fn with_fonts(config: EngineConfig, params: Arc<Mutex<P>>, fonts: &'static FontTable) -> OverlayResult<Self> {
        config.validate()?;
        profiling::apply_benchmark_mode(config.benchmark);

        params.lock().set_array_callbacks(true);
        tracing::debug!(
            max_overlays = config.max_overlays,
            fonts = fonts.len(),
            "overlay engine created"
        );

        Ok(Self {
            formatter: TimestampFormatter::new(config.timestamp_zone, config.max_timestamp_len),
            descriptors: vec![OverlayDescriptor::new(); config.max_overlays],
            config,
            params,
            fonts,
            geometry: None,
            last_frame: None,
            sinks: Vec::new(),
            frames_processed: 0,
        })
    }

    pub fn add_sink(&mut self, sink: Arc<dyn FrameSink>) {
        self.sinks.push(sink);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn params(&self) -> &Arc<Mutex<P>> {
        &self.params
    }

    pub fn descriptor(&self, slot: usize) -> Option<&OverlayDescriptor> {
        self.descriptors.get(slot)
    }

    /// Geometry of the last processed frame.
    pub fn geometry(&self) -> Option<FrameGeometry> {
        self.geometry
    }

    /// The most recent annotated frame.
    pub fn last_frame(&self) -> Option<Arc<Frame>> {
        self.last_frame.clone()
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    pub fn stats(&self) -> Vec<SlotStats> {
        self.descriptors
            .iter()
            .enumerate()
            .map(|(slot, descriptor)| SlotStats {
                slot,
                recomputes: descriptor.cache().recomputes,
                reuses: descriptor.cache().reuses,
                offsets: descriptor.cache().len(),
            })
            .collect()
    }

    /// Copy `input`, draw every enabled overlay into the copy in slot order,
    /// and hand the copy to the sinks.
    pub fn process_frame(&mut self, input: &Frame) -> FrameReport {
        profiling::new_frame();
        profile_function!();

        self.last_frame = None;
        let mut output = input.clone();
        let geometry = output.geometry();

        let geometry_changed = self.geometry != Some(geometry);
        if geometry_changed {
            tracing::debug!(
                width = geometry.width,
                height = geometry.height,
                color_mode = %geometry.color_mode,
                "frame geometry changed"
            );
            for descriptor in &mut self.descriptors {
                descriptor.invalidate();
            }
            self.geometry = Some(geometry);
        }
        self.params
            .lock()
            .publish_frame_size(geometry.width, geometry.height);

        let mut report = FrameReport {
            unique_id: input.unique_id,
            geometry_changed,
            ..Default::default()
        };

        for slot in 0..self.descriptors.len() {
            profile_scope!("overlay");

            let Some(params) = self.params.lock().overlay(slot) else {
                continue;
            };
            if !params.enabled {
                continue;
            }

            let params = params.clamped_to(&geometry);
            let rendered_text = if params.shape == OverlayShape::Text {
                compose_text(
                    &params.text,
                    &params.timestamp_format,
                    output.timestamp,
                    &self.formatter,
                    self.config.max_text_len,
                )
            } else {
                String::new()
            };

            let descriptor = &mut self.descriptors[slot];
            let flags = descriptor.refresh(params, rendered_text, geometry_changed);
            tracing::debug!(slot, ?flags, rebuild = flags.needs_rebuild(), "overlay refreshed");

            match descriptor.draw(self.fonts, &geometry, output.data_mut()) {
                Ok(outcome) => report.slots.push(SlotReport {
                    slot,
                    flags,
                    outcome,
                    text_error: descriptor.text_error().cloned(),
                }),
                Err(err) => {
                    tracing::error!(slot, %err, "abandoning overlays for this frame");
                    report.error = Some(err);
                    break;
                }
            }
        }

        let output = Arc::new(output);
        self.last_frame = Some(Arc::clone(&output));
        self.frames_processed += 1;

        for sink in &self.sinks {
            sink.on_frame(Arc::clone(&output));
        }
        report
    }
}

impl<P: ParamSource> std::fmt::Debug for OverlayEngine<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayEngine")
            .field("config", &self.config)
            .field("geometry", &self.geometry)
            .field("sinks", &self.sinks.len())
            .field("frames_processed", &self.frames_processed)
            .finish_non_exhaustive()
    }
}
