//! Glyph rasterization into pixel offsets.

use inscribe_core::profiling::profile_function;
use inscribe_geometry::{OffsetWriter, ShapeParams};

use crate::{FontBitmap, FontTable, TextResult};

/// Rasterize `text` with `font` into `writer`.
///
/// Characters advance `font.width` pixels left to right from
/// `params.position`. The drawn area is bounded by `params.size`, by the
/// glyph height and by the frame: a character starting at or past the right
/// bound is dropped, one straddling it is clipped column by column. Control
/// characters and characters without a glyph take up their slot but set no
/// pixels.
pub fn rasterize(text: &str, font: &FontBitmap, params: &ShapeParams, writer: &mut OffsetWriter<'_>) {
    profile_function!();
    let geometry = writer.geometry();
    let (px, py) = (params.position.x as i64, params.position.y as i64);
    let (sx, sy) = (params.size.x as i64, params.size.y as i64);
    let glyph_w = font.width as i64;

    let xmin = px.max(0);
    let xmax = (px + sx).min(geometry.width_i64());
    let ymin = py.max(0);
    let ymax = (py + sy).min(py + font.height as i64).min(geometry.height_i64());

    for iy in ymin..ymax {
        let row = (iy - py) as usize;
        for (slot, ch) in text.bytes().enumerate() {
            if ch < b' ' {
                continue;
            }
            let left = xmin + slot as i64 * glyph_w;
            if left >= xmax {
                break;
            }
            let Some(bits) = font.glyph_row(ch, row) else {
                continue;
            };
            for column in 0..font.width {
                let ix = left + column as i64;
                if ix >= xmax {
                    break;
                }
                if FontBitmap::bit(bits, column) {
                    writer.push(ix, iy);
                }
            }
        }
    }
}

/// Look up font `font_index` in `fonts` and rasterize `text` with it.
///
/// An unknown font produces no offsets and reports
/// [`TextError::InvalidFont`](crate::TextError::InvalidFont).
pub fn rasterize_with(
    fonts: &FontTable,
    font_index: i32,
    text: &str,
    params: &ShapeParams,
    writer: &mut OffsetWriter<'_>,
) -> TextResult<()> {
    let font = fonts.get(font_index)?;
    rasterize(text, font, params, writer);
    Ok(())
}
