//! Annotating a stream of frames.
//!
//! This example shows:
//! - Loading engine settings from TOML
//! - Configuring overlay slots through a shared `ParamTable`
//! - Processing frames and reading back the last annotated frame
//! - Moving an overlay between frames and watching the cache react
//!
//! Run with `RUST_LOG=inscribe=debug` to see recompute/reuse decisions.

use std::sync::Arc;

use chrono::{Duration, Utc};
use inscribe::prelude::*;
use parking_lot::Mutex;

const SETTINGS: &str = r#"
max_overlays = 4
timestamp_zone = "utc"
log_filter = "info"
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::from_toml_str(SETTINGS)?;
    inscribe::core::logging::init_with_filter(&config.log_filter);

    let table = Arc::new(Mutex::new(ParamTable::new(config.max_overlays)));
    {
        let mut table = table.lock();
        table.set(
            0,
            OverlayParams::cross(IVec2::new(32, 24), IVec2::new(6, 6))
                .with_name("beam")
                .with_color(OverlayColor::gray(255)),
        )?;
        table.set(
            1,
            OverlayParams::rectangle(IVec2::new(8, 8), IVec2::new(20, 12))
                .with_width(IVec2::new(2, 2))
                .with_combine(CombineMode::Xor)
                .with_color(OverlayColor::gray(0xFF)),
        )?;
        table.set(
            2,
            OverlayParams::ellipse(IVec2::new(36, 4), IVec2::new(24, 16)).with_color(OverlayColor::gray(128)),
        )?;
        table.set(
            3,
            OverlayParams::text(IVec2::new(0, 52), IVec2::new(64, 12), "")
                .with_timestamp_format("%H:%M:%S")
                .with_color(OverlayColor::gray(255)),
        )?;
    }

    let mut engine = OverlayEngine::new(config, Arc::clone(&table))?;
    engine.add_sink(Arc::new(|frame: Arc<Frame>| {
        tracing::info!(unique_id = frame.unique_id, "frame forwarded");
    }));

    let start = Utc::now();
    for i in 0..5 {
        if i == 3 {
            table.lock().update(0, |p| p.position = IVec2::new(40, 24))?;
        }

        let frame = Frame::new(vec![64, 64], ColorMode::Mono, PixelData::zeroed(PixelKind::U8, 64 * 64))?
            .with_unique_id(i)
            .with_timestamp(start + Duration::seconds(i as i64));

        let report = engine.process_frame(&frame);
        for slot in &report.slots {
            println!(
                "frame {i} slot {}: {:?} rebuilt={} offsets={}",
                slot.slot, slot.flags, slot.outcome.rebuilt, slot.outcome.offsets
            );
        }
    }

    if let Some(frame) = engine.last_frame() {
        let lit = (0..frame.data().len())
            .filter(|&i| frame.data().get_f64(i).is_some_and(|v| v > 0.0))
            .count();
        println!("last frame: {} pixels lit", lit);
    }
    for stats in engine.stats() {
        println!(
            "slot {}: {} recomputes, {} reuses",
            stats.slot, stats.recomputes, stats.reuses
        );
    }
    Ok(())
}
