//! Built-in 5x7 bitmap font, used when no TrueType font can be loaded.
//!
//! It only covers what captions need after uppercasing:
//! Latin capitals, digits, and common punctuation.
//! Everything else is drawn as an empty box.

/// Width of a glyph in font units.
pub const GLYPH_WIDTH: i32 = 5;
/// Height of a glyph in font units.
pub const GLYPH_HEIGHT: i32 = 7;
/// Horizontal distance between the origins of consecutive glyphs.
pub const ADVANCE: i32 = GLYPH_WIDTH + 1;
/// Height of a line in font units (glyph plus spacing).
pub const LINE_HEIGHT: i32 = GLYPH_HEIGHT + 1;


/// Size of a single font unit in pixels, at given font size.
#[inline]
pub fn unit_for(size: f32) -> i32 {
    ((size / LINE_HEIGHT as f32).round() as i32).max(1)
}

/// Width in pixels that given text occupies, at given font size.
///
/// Saturates at `u32::MAX` for text too long to measure.
pub fn text_width(text: &str, size: f32) -> u32 {
    let count = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
    if count == 0 {
        return 0;
    }
    count.saturating_mul(ADVANCE as u32)
        .saturating_sub(1)
        .saturating_mul(unit_for(size) as u32)
}

/// Rasterize the text with its top-left corner at given position,
/// calling `plot` for every pixel covered.
pub fn draw<F>(text: &str, size: f32, x: i32, y: i32, mut plot: F)
    where F: FnMut(i32, i32)
{
    let unit = unit_for(size);
    let step = ADVANCE.saturating_mul(unit);
    let mut origin_x = x;
    for ch in text.chars() {
        if origin_x == i32::MAX {
            break;
        }
        let rows = glyph(ch);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let px = origin_x.saturating_add(col.saturating_mul(unit));
                let py = y.saturating_add((row as i32).saturating_mul(unit));
                for dy in 0..unit {
                    for dx in 0..unit {
                        plot(px.saturating_add(dx), py.saturating_add(dy));
                    }
                }
            }
        }
        origin_x = origin_x.saturating_add(step);
    }
}

/// Bitmap rows of the glyph for given character, most significant bit on the left.
pub fn glyph(ch: char) -> [u8; GLYPH_HEIGHT as usize] {
    match ch {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ' ' => [0; GLYPH_HEIGHT as usize],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b00100, 0b01000],
        '\'' => [0b01100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000],
        '"' => [0b01010, 0b01010, 0b01010, 0b00000, 0b00000, 0b00000, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        ';' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b00100, 0b01000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '/' => [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        '&' => [0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '=' => [0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000],
        '%' => [0b11000, 0b11001, 0b00010, 0b00100, 0b01000, 0b10011, 0b00011],
        '#' => [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010],
        '*' => [0b00000, 0b00100, 0b10101, 0b01110, 0b10101, 0b00100, 0b00000],
        '_' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111],
        _ => [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111],
    }
}


#[cfg(test)]
mod tests {
    use super::{draw, glyph, text_width, unit_for, GLYPH_HEIGHT};

    const MISSING: [u8; GLYPH_HEIGHT as usize] =
        [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111];

    #[test]
    fn covers_capitals_and_digits() {
        for ch in ('A'..='Z').chain('0'..='9') {
            assert_ne!(MISSING, glyph(ch), "no glyph for {:?}", ch);
        }
    }

    #[test]
    fn unknown_chars_get_a_box() {
        assert_eq!(MISSING, glyph('ж'));
        assert_eq!(MISSING, glyph('a'));
    }

    #[test]
    fn unit_scales_with_size() {
        assert_eq!(1, unit_for(0.0));
        assert_eq!(1, unit_for(8.0));
        assert_eq!(5, unit_for(40.0));
    }

    #[test]
    fn width_excludes_trailing_spacing() {
        assert_eq!(0, text_width("", 40.0));
        assert_eq!(25, text_width("I", 40.0));
        assert_eq!(55, text_width("HI", 40.0));
    }

    #[test]
    fn draw_stays_within_text_box() {
        let (size, x, y) = (16.0, 10, 20);
        let width = text_width("MEME", size) as i32;
        let height = GLYPH_HEIGHT * unit_for(size);
        let mut count = 0;
        draw("MEME", size, x, y, |px, py| {
            assert!(px >= x && px < x + width, "x = {}", px);
            assert!(py >= y && py < y + height, "y = {}", py);
            count += 1;
        });
        assert!(count > 0);
    }

    #[test]
    fn huge_text_saturates() {
        let long = "W".repeat(100_000);
        assert_eq!(u32::MAX, text_width(&long, 1.0e9));
        assert_eq!(599_999, text_width(&long, 8.0));

        let mut max_x = i32::MIN;
        draw("MEME", 8.0, i32::MAX - 20, 0, |px, _| max_x = max_x.max(px));
        assert_eq!(i32::MAX, max_x);
    }
}
