//! Pixel address resolution for the geometric overlay shapes.
//!
//! Each resolver walks its shape row by row (or angle by angle for the
//! ellipse) and hands pixel coordinates to an [`OffsetWriter`], which turns
//! them into linear offsets and drops anything outside the frame. The order
//! of the emitted offsets is deterministic for a given input.

use std::f64::consts::FRAC_PI_2;

use inscribe_core::profiling::profile_function;

use crate::{OffsetWriter, OverlayShape, ShapeParams};

/// Resolve a geometric shape into `writer`.
///
/// Returns `false` for [`OverlayShape::Text`], which is rasterized from a
/// font rather than resolved from geometry.
pub fn resolve(shape: OverlayShape, params: &ShapeParams, writer: &mut OffsetWriter<'_>) -> bool {
    match shape {
        OverlayShape::Cross => cross(params, writer),
        OverlayShape::Rectangle => rectangle(params, writer),
        OverlayShape::Ellipse => ellipse(params, writer),
        OverlayShape::Text => return false,
    }
    true
}

/// A "+" centred on the position with arms `size` long.
///
/// Rows inside the horizontal bar (`position.y ± width.y / 2`, inclusive) are
/// drawn across the full arm span; every other row only gets the vertical
/// bar (`position.x ± width.x / 2`, inclusive). A width of 1 means a
/// single-pixel bar. The far end of each arm is exclusive.
pub fn cross(params: &ShapeParams, writer: &mut OffsetWriter<'_>) {
    profile_function!();
    let (px, py) = (params.position.x as i64, params.position.y as i64);
    let (sx, sy) = (params.size.x as i64, params.size.y as i64);
    let geometry = writer.geometry();
    let (frame_w, frame_h) = (geometry.width_i64(), geometry.height_i64());

    let xmin = if px > sx { px - sx } else { 0 };
    let xmax = (px + sx).min(frame_w - 1);
    let ymin = if py > sy { py - sy } else { 0 };
    let ymax = (py + sy).min(frame_h - 1);

    let xwide = half_width(params.width.x as i64).min(sx - 1);
    let ywide = half_width(params.width.y as i64).min(sy - 1);

    for iy in ymin..ymax {
        if iy >= py - ywide && iy <= py + ywide {
            writer.push_span(iy, xmin, xmax);
        } else {
            for ix in (px - xwide)..=(px + xwide) {
                writer.push(ix, iy);
            }
        }
    }
}

fn half_width(width: i64) -> i64 {
    if width == 1 { 0 } else { width / 2 }
}

/// A hollow rectangle with `position` as its top-left corner.
///
/// The top `width.y` rows and the bottom `width.y` rows are filled across the
/// whole box; rows in between only get the left `width.x` and right
/// `width.x` columns. Bands are grown towards the centre and never overlap,
/// so each covered pixel is emitted once.
pub fn rectangle(params: &ShapeParams, writer: &mut OffsetWriter<'_>) {
    profile_function!();
    let geometry = writer.geometry();
    let (xmin, xmax, ymin, ymax) = clamped_box(params, geometry.width_i64(), geometry.height_i64());
    if xmin >= xmax || ymin >= ymax {
        return;
    }

    let xwide = (params.width.x as i64).min(params.size.x as i64 - 1).max(0);
    let ywide = (params.width.y as i64).min(params.size.y as i64).max(0);

    let top_end = ymin + ywide;
    let bottom_start = (ymax - ywide).max(top_end);
    let left_end = (xmin + xwide).min(xmax);
    let right_start = (xmax - xwide).max(left_end);

    for iy in ymin..ymax {
        if iy < top_end || iy >= bottom_start {
            writer.push_span(iy, xmin, xmax);
        } else {
            writer.push_span(iy, xmin, left_end);
            writer.push_span(iy, right_start, xmax);
        }
    }
}

/// An ellipse outline inscribed in the box anchored at `position`.
///
/// The quarter arc from 0 to π/2 is sampled at `2 * (x_half + y_half)` angular
/// steps and mirrored into the other three quadrants. `width.x` concentric
/// rings are drawn from the boundary inwards. Samples may coincide, most
/// visibly at θ = 0 and θ = π/2.
pub fn ellipse(params: &ShapeParams, writer: &mut OffsetWriter<'_>) {
    profile_function!();
    let geometry = writer.geometry();
    let (xmin, xmax, ymin, ymax) = clamped_box(params, geometry.width_i64(), geometry.height_i64());
    if xmin >= xmax || ymin >= ymax {
        return;
    }

    let rings = (params.width.x as i64).min(params.size.x as i64 - 1);
    let x_half = (xmax - xmin) / 2;
    let y_half = (ymax - ymin) / 2;
    let x_cent = xmax - x_half;
    let y_cent = ymax - y_half;

    let n_steps = 2 * (x_half + y_half);
    for step in 0..=n_steps {
        let theta = if n_steps == 0 {
            0.0
        } else {
            FRAC_PI_2 * step as f64 / n_steps as f64
        };
        let (sin, cos) = theta.sin_cos();
        for ring in 0..rings {
            let ix = ((x_half - ring) as f64 * cos).round() as i64;
            let iy = ((y_half - ring) as f64 * sin).round() as i64;
            writer.push(x_cent + ix, y_cent + iy);
            writer.push(x_cent - ix, y_cent + iy);
            writer.push(x_cent + ix, y_cent - iy);
            writer.push(x_cent - ix, y_cent - iy);
        }
    }
}

/// Box anchored at the position, clipped to the frame: `(xmin, xmax, ymin, ymax)`
/// with exclusive maxima.
fn clamped_box(params: &ShapeParams, frame_w: i64, frame_h: i64) -> (i64, i64, i64, i64) {
    let (px, py) = (params.position.x as i64, params.position.y as i64);
    let (sx, sy) = (params.size.x as i64, params.size.y as i64);
    (px.max(0), (px + sx).min(frame_w), py.max(0), (py + sy).min(frame_h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FrameGeometry;
    use glam::IVec2;
    use std::collections::BTreeSet;

    fn run(
        f: fn(&ShapeParams, &mut OffsetWriter<'_>),
        geometry: &FrameGeometry,
        params: ShapeParams,
    ) -> Vec<usize> {
        let mut out = Vec::new();
        let mut writer = OffsetWriter::new(geometry, &mut out);
        f(&params, &mut writer);
        out
    }

    fn pixels(geometry: &FrameGeometry, offsets: &[usize]) -> BTreeSet<(usize, usize)> {
        offsets.iter().map(|&o| geometry.position(o)).collect()
    }

    fn params(pos: (i32, i32), size: (i32, i32), width: (i32, i32)) -> ShapeParams {
        ShapeParams::new(
            IVec2::new(pos.0, pos.1),
            IVec2::new(size.0, size.1),
            IVec2::new(width.0, width.1),
        )
    }

    #[test]
    fn test_rectangle_outline() {
        let geometry = FrameGeometry::mono(10, 10);
        let offsets = run(rectangle, &geometry, params((2, 2), (4, 4), (1, 1)));

        let mut expected = BTreeSet::new();
        for i in 2..6 {
            expected.insert((i, 2));
            expected.insert((i, 5));
            expected.insert((2, i));
            expected.insert((5, i));
        }
        assert_eq!(pixels(&geometry, &offsets), expected);
        assert_eq!(offsets.len(), expected.len(), "no duplicates");
    }

    #[test]
    fn test_rectangle_thick_bands() {
        let geometry = FrameGeometry::mono(10, 10);
        let offsets = run(rectangle, &geometry, params((0, 0), (6, 6), (2, 2)));
        let covered = pixels(&geometry, &offsets);

        // Inner hole is 2x2 at (2..4, 2..4).
        assert_eq!(covered.len(), 36 - 4);
        assert!(!covered.contains(&(2, 2)));
        assert!(!covered.contains(&(3, 3)));
        assert!(covered.contains(&(1, 3)));
        assert!(covered.contains(&(4, 3)));
    }

    #[test]
    fn test_rectangle_zero_size_is_empty() {
        let geometry = FrameGeometry::mono(10, 10);
        assert!(run(rectangle, &geometry, params((3, 3), (0, 5), (1, 1))).is_empty());
        assert!(run(rectangle, &geometry, params((3, 3), (5, 0), (1, 1))).is_empty());
    }

    #[test]
    fn test_rectangle_clipped_by_frame() {
        let geometry = FrameGeometry::mono(8, 8);
        let offsets = run(rectangle, &geometry, params((5, 5), (10, 10), (1, 1)));
        for (x, y) in pixels(&geometry, &offsets) {
            assert!(x >= 5 && x < 8 && y >= 5 && y < 8);
        }
        // Bottom and right bands land on the frame edge.
        let covered = pixels(&geometry, &offsets);
        assert!(covered.contains(&(7, 6)));
        assert!(covered.contains(&(6, 7)));
    }

    #[test]
    fn test_cross_single_pixel() {
        let geometry = FrameGeometry::mono(20, 20);
        let offsets = run(cross, &geometry, params((10, 10), (3, 3), (1, 1)));
        let covered = pixels(&geometry, &offsets);

        // Horizontal arm spans 7..13 (far end exclusive), vertical 7..13.
        let mut expected = BTreeSet::new();
        for x in 7..13 {
            expected.insert((x, 10));
        }
        for y in 7..13 {
            expected.insert((10, y));
        }
        assert_eq!(covered, expected);
        assert_eq!(offsets.len(), expected.len());
    }

    #[test]
    fn test_cross_wide_bars() {
        let geometry = FrameGeometry::mono(20, 20);
        let offsets = run(cross, &geometry, params((10, 10), (5, 5), (3, 3)));
        let covered = pixels(&geometry, &offsets);

        // Half width of 1 on each side.
        for y in 9..=11 {
            assert!(covered.contains(&(5, y)));
            assert!(covered.contains(&(14, y)));
        }
        for x in 9..=11 {
            assert!(covered.contains(&(x, 5)));
        }
        assert!(!covered.contains(&(8, 6)));
        assert_eq!(offsets.len(), covered.len());
    }

    #[test]
    fn test_cross_near_left_edge_is_clipped() {
        let geometry = FrameGeometry::mono(10, 10);
        let offsets = run(cross, &geometry, params((0, 5), (4, 4), (5, 5)));
        assert!(!offsets.is_empty());
        for &o in &offsets {
            assert!(o < geometry.n_elements);
        }
    }

    #[test]
    fn test_ellipse_symmetric() {
        let geometry = FrameGeometry::mono(30, 30);
        let offsets = run(ellipse, &geometry, params((5, 5), (20, 10), (1, 1)));
        let covered = pixels(&geometry, &offsets);
        assert!(!covered.is_empty());

        // Centre at (15, 10); the extreme samples sit on the axes.
        assert!(covered.contains(&(25, 10)) || covered.contains(&(24, 10)));
        assert!(covered.contains(&(5, 10)));
        assert!(covered.contains(&(15, 5)));
        for &(x, y) in &covered {
            let mirrored = (30 - x, y);
            if mirrored.0 < 30 && x != 5 {
                assert!(covered.contains(&mirrored), "missing mirror of {:?}", (x, y));
            }
        }
    }

    #[test]
    fn test_ellipse_rings() {
        let geometry = FrameGeometry::mono(40, 40);
        let thin = run(ellipse, &geometry, params((0, 0), (30, 30), (1, 1)));
        let thick = run(ellipse, &geometry, params((0, 0), (30, 30), (3, 3)));
        assert_eq!(thick.len(), thin.len() * 3);
        assert!(pixels(&geometry, &thick).is_superset(&pixels(&geometry, &thin)));
    }

    #[test]
    fn test_ellipse_full_frame_stays_inside() {
        let geometry = FrameGeometry::mono(10, 10);
        let offsets = run(ellipse, &geometry, params((0, 0), (10, 10), (2, 2)));
        assert!(!offsets.is_empty());
        for &o in &offsets {
            assert!(o < geometry.n_elements);
        }
    }

    #[test]
    fn test_ellipse_degenerate_width() {
        let geometry = FrameGeometry::mono(10, 10);
        assert!(run(ellipse, &geometry, params((2, 2), (1, 1), (1, 1))).is_empty());
        assert!(run(ellipse, &geometry, params((2, 2), (4, 4), (0, 0))).is_empty());
    }

    #[test]
    fn test_resolve_delegates_text() {
        let geometry = FrameGeometry::mono(10, 10);
        let mut out = Vec::new();
        let mut writer = OffsetWriter::new(&geometry, &mut out);
        assert!(!resolve(OverlayShape::Text, &params((0, 0), (5, 5), (1, 1)), &mut writer));
        assert!(resolve(OverlayShape::Cross, &params((5, 5), (2, 2), (1, 1)), &mut writer));
        assert!(!out.is_empty());
    }

    #[test]
    fn test_rgb_offsets_use_pixel_stride() {
        let geometry = FrameGeometry::from_dims(&[3, 10, 10], crate::ColorMode::Rgb1).unwrap();
        let offsets = run(rectangle, &geometry, params((1, 1), (2, 2), (1, 1)));
        assert_eq!(offsets, vec![33, 36, 63, 66]);
    }
}
