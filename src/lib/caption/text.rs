//! Module implementing the rendering of caption text.

use image::{Pixel, RgbaImage};

use crate::model::{Color, OUTLINE_COLOR, OUTLINE_WIDTH, TEXT_COLOR};
use crate::resources::Font;


/// Style that the caption text is rendered with.
#[derive(Clone, Copy, Debug)]
pub struct Style<'f> {
    pub font: &'f Font,
    /// Font size in pixels.
    pub size: f32,
}

impl<'f> Style<'f> {
    #[inline]
    pub fn new(font: &'f Font, size: f32) -> Self {
        Style{font, size}
    }
}


/// Draws caption text on the image macro canvas.
pub trait CaptionRenderer {
    /// Render a single line of caption text.
    ///
    /// `anchor_x_center` is the width that the text is centered within,
    /// and `anchor_y` is the top of the text line.
    fn render(&self, canvas: &mut RgbaImage, text: &str,
              anchor_x_center: u32, anchor_y: i32, style: &Style<'_>);
}


/// The classic image macro look:
/// uppercase white text with a thick black outline.
#[derive(Clone, Copy, Debug, Default)]
pub struct OutlineRenderer;

impl CaptionRenderer for OutlineRenderer {
    fn render(&self, canvas: &mut RgbaImage, text: &str,
              anchor_x_center: u32, anchor_y: i32, style: &Style<'_>) {
        if text.is_empty() {
            trace!("Nothing to render at size {}", style.size);
            return;
        }
        let text = text.to_uppercase();

        // Too small for the font to rasterize anything,
        // so fall back to the smallest scale of the built-in one.
        let builtin = Font::Builtin;
        let fallback;
        let style = if style.size > 0.0 { style } else {
            debug!("Font size {} is too small, rendering {:?} with the built-in font",
                style.size, text);
            fallback = Style::new(&builtin, 0.0);
            &fallback
        };

        let text_width = style.font.text_width(&text, style.size);
        let x = horizontal_offset(anchor_x_center, text_width);
        let y = anchor_y as f32;
        trace!("Text {:?} is {}px wide, drawing at ({}, {})", text, text_width, x, y);

        // The outline is the text shifted in every direction within its radius.
        for dx in -OUTLINE_WIDTH..=OUTLINE_WIDTH {
            for dy in -OUTLINE_WIDTH..=OUTLINE_WIDTH {
                draw_text(canvas, &text, x + dx as f32, y + dy as f32, style, OUTLINE_COLOR);
            }
        }
        draw_text(canvas, &text, x, y, style, TEXT_COLOR);
    }
}

/// Horizontal position of text of given width, centered within `anchor_x_center`.
#[inline]
pub fn horizontal_offset(anchor_x_center: u32, text_width: u32) -> f32 {
    (anchor_x_center as f32 - text_width as f32) / 2.0
}

/// Draw the text once, blending it over the canvas.
/// Pixels outside of the canvas are clipped.
fn draw_text(canvas: &mut RgbaImage, text: &str, x: f32, y: f32, style: &Style<'_>, color: Color) {
    let (width, height) = canvas.dimensions();
    style.font.draw(text, style.size, x, y, |px, py, coverage| {
        if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
            return;
        }
        let alpha = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
        if alpha > 0 {
            canvas.get_pixel_mut(px as u32, py as u32).blend(&color.to_rgba(alpha));
        }
    });
}


#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use spectral::prelude::*;

    use crate::resources::Font;
    use super::{horizontal_offset, CaptionRenderer, OutlineRenderer, Style};

    const GRAY: Rgba<u8> = Rgba([0x80, 0x80, 0x80, 0xff]);
    const WHITE: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);
    const BLACK: Rgba<u8> = Rgba([0x0, 0x0, 0x0, 0xff]);

    #[test]
    fn offset_centers_within_width() {
        assert_that!(horizontal_offset(400, 100)).is_equal_to(150.0);
        assert_that!(horizontal_offset(400, 0)).is_equal_to(200.0);
        assert_that!(horizontal_offset(400, 400)).is_equal_to(0.0);
        assert_that!(horizontal_offset(101, 50)).is_equal_to(25.5);
    }

    #[test]
    fn offset_of_overflowing_text_is_negative() {
        assert_that!(horizontal_offset(100, 130)).is_equal_to(-15.0);
    }

    #[test]
    fn white_text_with_black_outline() {
        let font = Font::Builtin;
        let mut canvas = RgbaImage::from_pixel(100, 50, GRAY);
        // At size 8 the glyph is 5px wide, so it's drawn at x = round(47.5) = 48.
        OutlineRenderer.render(&mut canvas, "i", 100, 10, &Style::new(&font, 8.0));

        // Top row of "I" is .XXX.
        assert_eq!(WHITE, *canvas.get_pixel(49, 10));
        assert_eq!(WHITE, *canvas.get_pixel(51, 10));
        assert_eq!(BLACK, *canvas.get_pixel(48, 10));
        assert_eq!(BLACK, *canvas.get_pixel(49, 8));
        assert_eq!(GRAY, *canvas.get_pixel(49, 7));
        assert_eq!(GRAY, *canvas.get_pixel(5, 5));
    }

    #[test]
    fn overflow_is_clipped() {
        let font = Font::Builtin;
        let mut canvas = RgbaImage::from_pixel(20, 20, GRAY);
        OutlineRenderer.render(&mut canvas, "much too long for this", 20, 18,
            &Style::new(&font, 16.0));
        assert!(canvas.pixels().any(|&p| p == BLACK));
    }

    #[test]
    fn empty_text_draws_nothing() {
        let font = Font::Builtin;
        let mut canvas = RgbaImage::from_pixel(20, 20, GRAY);
        OutlineRenderer.render(&mut canvas, "", 20, 2, &Style::new(&font, 8.0));
        assert!(canvas.pixels().all(|&p| p == GRAY));
    }

    #[test]
    fn zero_size_uses_smallest_builtin_scale() {
        let font = Font::Builtin;
        let mut canvas = RgbaImage::from_pixel(60, 9, GRAY);
        // "HI" is 11px wide at one pixel per font unit, so it starts at x = round(24.5) = 25.
        OutlineRenderer.render(&mut canvas, "hi", 60, 0, &Style::new(&font, 0.0));

        // Left stem of "H".
        assert_eq!(WHITE, *canvas.get_pixel(25, 0));
        assert_eq!(WHITE, *canvas.get_pixel(25, 6));
        assert_eq!(BLACK, *canvas.get_pixel(23, 3));
        assert_eq!(GRAY, *canvas.get_pixel(5, 4));
    }

    #[test]
    fn truetype_text_is_centered() {
        let font = match Font::system() {
            Some(font) => font,
            None => return,
        };
        let width = font.text_width("STUDYING", 40.0);
        assert_that!(width).is_greater_than(100);
        assert_that!(width).is_less_than(400);

        // Left bearing of the first glyph, which the ink bounding box leaves out.
        let mut bearing = i32::MAX;
        font.draw("STUDYING", 40.0, 0.0, 0.0, |x, _, coverage| {
            if coverage > 0.0 { bearing = bearing.min(x); }
        });

        let mut canvas = RgbaImage::from_pixel(400, 120, GRAY);
        OutlineRenderer.render(&mut canvas, "studying", 400, 40, &Style::new(&font, 40.0));

        let white_columns: Vec<i32> = canvas.enumerate_pixels()
            .filter(|&(_, _, &p)| p == WHITE)
            .map(|(x, _, _)| x as i32)
            .collect();
        assert!(!white_columns.is_empty());
        let min_x = *white_columns.iter().min().unwrap();
        let max_x = *white_columns.iter().max().unwrap();

        let expected_min_x = horizontal_offset(400, width).floor() as i32 + bearing;
        assert_that!((min_x - expected_min_x).abs()).is_less_than_or_equal_to(2);
        assert_that!((max_x + 1 - (expected_min_x + width as i32)).abs())
            .is_less_than_or_equal_to(2);

        // Outline reaches past the fill, and nothing is drawn above the outlined line.
        assert!(canvas.enumerate_pixels().any(|(x, _, &p)| p == BLACK && (x as i32) < min_x));
        assert!(canvas.enumerate_pixels().all(|(_, y, &p)| y >= 38 || p == GRAY));
    }
}
