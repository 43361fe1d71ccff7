//! Property tests for the glyph rasterizer.

use inscribe_geometry::{FrameGeometry, IVec2, OffsetWriter, ShapeParams};
use inscribe_text::{FontTable, rasterize_with};
use proptest::prelude::*;

proptest! {
    /// Text never lands outside the frame or outside its own box.
    #[test]
    fn test_text_stays_inside_bounds(
        text in "[ -~\t]{0,40}",
        font in 0i32..4,
        width in 1usize..80,
        height in 1usize..40,
        px in 0i32..80,
        py in 0i32..40,
        sx in 0i32..120,
        sy in 0i32..60,
    ) {
        let geometry = FrameGeometry::mono(width, height);
        let params = ShapeParams::new(IVec2::new(px, py), IVec2::new(sx, sy), IVec2::ONE)
            .clamped_to(width, height);
        let mut out = Vec::new();
        let mut writer = OffsetWriter::new(&geometry, &mut out);
        rasterize_with(FontTable::builtin(), font, &text, &params, &mut writer).unwrap();

        let font = FontTable::builtin().get(font).unwrap();
        let (px, py) = (params.position.x as usize, params.position.y as usize);
        for offset in out {
            let (x, y) = geometry.position(offset);
            prop_assert!(x < width && y < height);
            prop_assert!(x >= px && x < px + params.size.x as usize);
            prop_assert!(y >= py && y < py + font.height.min(params.size.y as usize));
        }
    }

    /// Every set pixel is distinct: glyph cells never overlap.
    #[test]
    fn test_text_has_no_duplicates(text in "[ -~]{0,20}", font in 0i32..4) {
        let geometry = FrameGeometry::mono(400, 20);
        let params = ShapeParams::new(IVec2::ZERO, IVec2::new(400, 20), IVec2::ONE);
        let mut out = Vec::new();
        let mut writer = OffsetWriter::new(&geometry, &mut out);
        rasterize_with(FontTable::builtin(), font, &text, &params, &mut writer).unwrap();

        let mut sorted = out.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), out.len());
    }
}
