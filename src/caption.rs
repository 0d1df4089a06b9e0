//! Caption overlays drawn from the 8x8 bitmap font.
//!
//! Each glyph cell is scaled so that its height equals the requested font
//! size. Overlays have a transparent background, so compositing one onto the
//! canvas only changes the pixels covered by glyph strokes.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba, RgbaImage};

const GLYPH_CELLS: u32 = 8;
const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Caption drawn under the first image.
pub const BEFORE_LABEL: &str = "Before";
/// Caption drawn under the second image.
pub const AFTER_LABEL: &str = "After";

fn glyph_rows(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Width in pixels that `text` occupies at `font_size`.
pub fn text_width(text: &str, font_size: f32) -> u32 {
    (text.chars().count() as f32 * font_size).round() as u32
}

/// Render `text` centered inside a transparent `width` x `height` overlay.
///
/// Text that does not fit is clipped at the overlay edges.
pub fn render_label(text: &str, width: u32, height: u32, font_size: f32) -> RgbaImage {
    let mut overlay = RgbaImage::new(width, height);
    if width == 0 || height == 0 || font_size <= 0.0 {
        return overlay;
    }

    let glyphs: Vec<[u8; 8]> = text.chars().map(glyph_rows).collect();
    let cell = font_size / GLYPH_CELLS as f32;
    let box_width = text_width(text, font_size) as i64;
    let box_height = font_size.round() as i64;

    let origin_x = (width as i64 - box_width) / 2;
    let origin_y = (height as i64 - box_height) / 2;

    for ty in 0..box_height {
        let y = origin_y + ty;
        if y < 0 || y >= height as i64 {
            continue;
        }
        let row = ((ty as f32 / cell) as usize).min(GLYPH_CELLS as usize - 1);

        for tx in 0..box_width {
            let x = origin_x + tx;
            if x < 0 || x >= width as i64 {
                continue;
            }
            let column = (tx as f32 / cell) as usize;
            let Some(glyph) = glyphs.get(column / GLYPH_CELLS as usize) else {
                continue;
            };
            let bit = column % GLYPH_CELLS as usize;
            if glyph[row] & (1 << bit) != 0 {
                overlay.put_pixel(x as u32, y as u32, INK);
            }
        }
    }

    overlay
}
