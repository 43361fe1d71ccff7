//! End-to-end behaviour of the overlay engine.

use std::sync::Arc;

use chrono::Duration;
use inscribe::prelude::*;
use inscribe::render::CompositeError;
use inscribe_test_utils::{
    RecordingSink, bayer_frame, changed_pixels, gradient_frame, mono_frame, pixel, rgb_frame, typed_frame,
};
use parking_lot::Mutex;

fn setup(slots: usize) -> (Arc<Mutex<ParamTable>>, OverlayEngine<ParamTable>) {
    let table = Arc::new(Mutex::new(ParamTable::new(slots)));
    let engine = OverlayEngine::new(EngineConfig::default().with_max_overlays(slots), Arc::clone(&table)).unwrap();
    (table, engine)
}

fn outline_square() -> OverlayParams {
    OverlayParams::rectangle(IVec2::new(2, 2), IVec2::new(4, 4)).with_color(OverlayColor::new(0, 255, 0))
}

#[test]
fn test_rectangle_outline_on_mono_frame() {
    let (table, mut engine) = setup(8);
    table.lock().set(0, outline_square()).unwrap();

    let input = mono_frame(10, 10, 0);
    let report = engine.process_frame(&input);
    assert!(report.is_ok());

    let output = engine.last_frame().unwrap();
    for y in 0..10 {
        for x in 0..10 {
            let inside = (2..6).contains(&x) && (2..6).contains(&y);
            let on_edge = inside && (x == 2 || x == 5 || y == 2 || y == 5);
            let expected = if on_edge { 255.0 } else { 0.0 };
            assert_eq!(pixel(&output, x, y), Some(expected), "pixel ({x}, {y})");
        }
    }
    assert_eq!(changed_pixels(&input, &output).len(), 12);
}

#[test]
fn test_second_frame_reuses_offsets() {
    let (table, mut engine) = setup(8);
    table.lock().set(0, outline_square()).unwrap();
    let input = gradient_frame(10, 10);

    let first = engine.process_frame(&input);
    let first_frame = engine.last_frame().unwrap();
    let second = engine.process_frame(&input);
    let second_frame = engine.last_frame().unwrap();

    assert!(first.slot(0).unwrap().outcome.rebuilt);
    let reused = second.slot(0).unwrap();
    assert!(!reused.outcome.rebuilt);
    assert!(reused.flags.is_empty());
    assert_eq!(first_frame.data(), second_frame.data());

    let stats = engine.stats();
    assert_eq!(stats[0].recomputes, 1);
    assert_eq!(stats[0].reuses, 1);
    assert_eq!(stats[0].offsets, 12);
}

#[test]
fn test_invalid_font_leaves_frame_unchanged() {
    let (table, mut engine) = setup(2);
    table
        .lock()
        .set(
            0,
            OverlayParams::text(IVec2::ZERO, IVec2::new(40, 16), "HELLO")
                .with_font(17)
                .with_color(OverlayColor::gray(200)),
        )
        .unwrap();
    table.lock().set(1, outline_square()).unwrap();

    let input = mono_frame(40, 16, 3);
    let report = engine.process_frame(&input);
    assert!(report.is_ok());

    let text = report.slot(0).unwrap();
    assert_eq!(text.outcome.offsets, 0);
    assert!(text.text_error.is_some());
    // The other overlay still draws.
    assert_eq!(report.slot(1).unwrap().outcome.offsets, 12);
    assert_eq!(changed_pixels(&input, &engine.last_frame().unwrap()).len(), 12);
}

#[test]
fn test_text_overlay_draws_inside_its_box() {
    let (table, mut engine) = setup(1);
    table
        .lock()
        .set(
            0,
            OverlayParams::text(IVec2::new(4, 2), IVec2::new(30, 20), "A1").with_color(OverlayColor::gray(255)),
        )
        .unwrap();

    let input = mono_frame(64, 32, 0);
    let report = engine.process_frame(&input);
    let drawn = changed_pixels(&input, &engine.last_frame().unwrap());
    assert!(!drawn.is_empty());
    assert_eq!(drawn.len(), report.slot(0).unwrap().outcome.offsets);
    assert!(drawn.iter().all(|&(x, y)| (4..34).contains(&x) && (2..10).contains(&y)));
}

#[test]
fn test_xor_twice_restores_frame() {
    let (table, mut engine) = setup(1);
    table
        .lock()
        .set(
            0,
            OverlayParams::ellipse(IVec2::new(1, 1), IVec2::new(12, 8))
                .with_width(IVec2::new(2, 2))
                .with_combine(CombineMode::Xor)
                .with_color(OverlayColor::gray(0x5A)),
        )
        .unwrap();

    let input = gradient_frame(16, 12);
    engine.process_frame(&input);
    let once = engine.last_frame().unwrap();
    assert_ne!(once.data(), input.data());

    engine.process_frame(&once);
    let twice = engine.last_frame().unwrap();
    assert_eq!(twice.data(), input.data());
}

#[test]
fn test_mono_ignores_red_and_blue() {
    let run = |color: OverlayColor| {
        let (table, mut engine) = setup(1);
        table
            .lock()
            .set(0, OverlayParams::cross(IVec2::new(5, 5), IVec2::new(3, 3)).with_color(color))
            .unwrap();
        engine.process_frame(&mono_frame(11, 11, 0));
        engine.last_frame().unwrap()
    };

    let plain = run(OverlayColor::new(0, 77, 0));
    let noisy = run(OverlayColor::new(200, 77, 13));
    assert_eq!(plain.data(), noisy.data());
}

#[test]
fn test_bayer_frame_takes_green_only() {
    let run = |color: OverlayColor| {
        let (table, mut engine) = setup(1);
        table
            .lock()
            .set(0, OverlayParams::cross(IVec2::new(5, 5), IVec2::new(3, 3)).with_color(color))
            .unwrap();
        let report = engine.process_frame(&bayer_frame(11, 11, 0));
        assert!(report.error.is_none());
        engine.last_frame().unwrap()
    };

    let plain = run(OverlayColor::new(0, 77, 0));
    let noisy = run(OverlayColor::new(200, 77, 13));
    assert_eq!(noisy.color_mode(), ColorMode::Bayer);
    assert_eq!(plain.data(), noisy.data());
    assert_eq!(noisy.data().len(), 121);

    let drawn = changed_pixels(&bayer_frame(11, 11, 0), &noisy);
    assert!(!drawn.is_empty());
    for (x, y) in drawn {
        assert_eq!(pixel(&noisy, x, y), Some(77.0));
    }
}

#[test]
fn test_rgb_frame_gets_three_channels() {
    let (table, mut engine) = setup(1);
    table
        .lock()
        .set(0, OverlayParams::cross(IVec2::new(2, 2), IVec2::new(1, 1)).with_color(OverlayColor::new(10, 20, 30)))
        .unwrap();

    let input = rgb_frame(5, 5, ColorMode::Rgb1);
    let report = engine.process_frame(&input);
    let outcome = report.slot(0).unwrap().outcome;
    assert_eq!(outcome.samples, 3 * outcome.offsets);

    let output = engine.last_frame().unwrap();
    let geometry = output.geometry();
    let center = geometry.offset(2, 2);
    let channels: Vec<_> = (0..3)
        .map(|k| output.data().get_f64(center + k * geometry.color_stride))
        .collect();
    assert_eq!(channels, vec![Some(10.0), Some(20.0), Some(30.0)]);
}

#[test]
fn test_unsupported_pixel_type_still_forwards_frame() {
    let (table, mut engine) = setup(2);
    table.lock().set(0, outline_square()).unwrap();
    table.lock().set(1, outline_square()).unwrap();
    let sink = RecordingSink::new();
    engine.add_sink(sink.clone());

    let input = typed_frame(10, 10, PixelData::I64(vec![7; 100])).with_unique_id(41);
    let report = engine.process_frame(&input);

    assert!(matches!(
        report.error,
        Some(OverlayError::Composite(CompositeError::UnsupportedPixelType(PixelKind::I64)))
    ));
    assert!(report.slots.is_empty());
    assert_eq!(sink.count(), 1);
    let forwarded = sink.last().unwrap();
    assert_eq!(forwarded.unique_id, 41);
    assert_eq!(forwarded.data(), input.data());

    // The next supported frame is drawn normally.
    let report = engine.process_frame(&mono_frame(10, 10, 0));
    assert!(report.is_ok());
    assert_eq!(report.slots.len(), 2);
}

#[test]
fn test_later_slots_win() {
    let (table, mut engine) = setup(3);
    table.lock().set(0, outline_square().with_color(OverlayColor::gray(10))).unwrap();
    table.lock().set(2, outline_square().with_color(OverlayColor::gray(20))).unwrap();

    engine.process_frame(&mono_frame(10, 10, 0));
    let output = engine.last_frame().unwrap();
    assert_eq!(pixel(&output, 2, 2), Some(20.0));
    assert_eq!(pixel(&output, 5, 3), Some(20.0));
}

#[test]
fn test_configuration_change_rebuilds() {
    let (table, mut engine) = setup(1);
    table.lock().set(0, outline_square()).unwrap();
    let input = mono_frame(10, 10, 0);
    engine.process_frame(&input);

    table.lock().update(0, |p| p.position = IVec2::new(3, 3)).unwrap();
    let report = engine.process_frame(&input);
    let slot = report.slot(0).unwrap();
    assert!(slot.flags.contains(ChangeFlags::PLACEMENT));
    assert!(slot.outcome.rebuilt);
    assert_eq!(pixel(&engine.last_frame().unwrap(), 2, 2), Some(0.0));

    // Renaming alone is not a change.
    table.lock().update(0, |p| p.name = "roi".to_string()).unwrap();
    let report = engine.process_frame(&input);
    assert!(!report.slot(0).unwrap().outcome.rebuilt);
}

#[test]
fn test_timestamp_text_follows_frame_clock() {
    let (table, mut engine) = setup(1);
    table
        .lock()
        .set(
            0,
            OverlayParams::text(IVec2::ZERO, IVec2::new(64, 8), "t=")
                .with_timestamp_format("%S")
                .with_color(OverlayColor::gray(255)),
        )
        .unwrap();

    let frame = mono_frame(64, 8, 0);
    engine.process_frame(&frame);
    assert_eq!(engine.descriptor(0).unwrap().rendered_text(), "t=00");

    let same = engine.process_frame(&frame);
    assert!(!same.slot(0).unwrap().outcome.rebuilt);

    let later = frame.clone().with_timestamp(frame.timestamp + Duration::seconds(1));
    let report = engine.process_frame(&later);
    let slot = report.slot(0).unwrap();
    assert!(slot.flags.contains(ChangeFlags::TEXT));
    assert!(slot.outcome.rebuilt);
    assert_eq!(engine.descriptor(0).unwrap().rendered_text(), "t=01");
}

#[test]
fn test_geometry_change_rebuilds_every_slot() {
    let (table, mut engine) = setup(2);
    table.lock().set(0, outline_square()).unwrap();
    table
        .lock()
        .set(1, OverlayParams::cross(IVec2::new(4, 4), IVec2::new(2, 2)))
        .unwrap();

    engine.process_frame(&mono_frame(10, 10, 0));
    let report = engine.process_frame(&mono_frame(12, 10, 0));
    assert!(report.geometry_changed);
    for slot in &report.slots {
        assert!(slot.flags.contains(ChangeFlags::FRAME));
        assert!(slot.outcome.rebuilt);
    }
    assert_eq!(table.lock().max_size(), (12, 10));
}

#[test]
fn test_out_of_frame_overlay_is_clamped() {
    let (table, mut engine) = setup(1);
    table
        .lock()
        .set(
            0,
            OverlayParams::rectangle(IVec2::new(50, -5), IVec2::new(100, 100)).with_color(OverlayColor::gray(1)),
        )
        .unwrap();

    let input = mono_frame(8, 6, 0);
    let report = engine.process_frame(&input);
    assert!(report.is_ok());
    let params = engine.descriptor(0).unwrap().params().unwrap();
    assert_eq!(params.position, IVec2::new(7, 0));
    assert_eq!(params.size, IVec2::new(8, 6));
    for (x, y) in changed_pixels(&input, &engine.last_frame().unwrap()) {
        assert!(x < 8 && y < 6);
    }
}

#[test]
fn test_metadata_is_forwarded() {
    let (_table, mut engine) = setup(1);
    let sink = RecordingSink::new();
    engine.add_sink(sink.clone());

    let input = mono_frame(4, 4, 0)
        .with_unique_id(9)
        .with_attribute("exposure", AttributeValue::Float(0.25));
    engine.process_frame(&input);

    let output = sink.last().unwrap();
    assert_eq!(output.unique_id, 9);
    assert_eq!(output.timestamp, input.timestamp);
    assert_eq!(output.attributes.get("exposure"), Some(&AttributeValue::Float(0.25)));
    assert!(Arc::ptr_eq(&output, &engine.last_frame().unwrap()));
}

#[test]
fn test_sinks_run_without_the_parameter_lock() {
    let (table, mut engine) = setup(1);
    let seen = Arc::new(Mutex::new(Vec::new()));

    let host = Arc::clone(&table);
    let record = Arc::clone(&seen);
    engine.add_sink(Arc::new(move |frame: Arc<Frame>| {
        // Deadlocks if the engine still holds the lock.
        let size = host.lock().max_size();
        record.lock().push((frame.unique_id, size));
    }));

    engine.process_frame(&mono_frame(6, 5, 0).with_unique_id(3));
    assert_eq!(*seen.lock(), vec![(3, (6, 5))]);
}
