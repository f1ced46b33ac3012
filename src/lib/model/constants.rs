//! Module defining constants relevant to the data model.

use std::time::Duration;

use super::types::Color;


/// Directory where templates are kept unless configured otherwise.
pub const DEFAULT_TEMPLATE_DIRECTORY: &str = "meme_templates";
/// Directory where finished image macros are written unless configured otherwise.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "output";

/// Path to the bold TrueType font that captions are rendered with, if present.
pub const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";

/// Caption font size is the image height divided by this.
pub const FONT_SIZE_DIVISOR: u32 = 10;

/// Color of the caption text.
pub const TEXT_COLOR: Color = Color(0xff, 0xff, 0xff);
/// Color of the caption outline.
/// This should be the inversion of TEXT_COLOR.
pub const OUTLINE_COLOR: Color = Color(0x0, 0x0, 0x0);
/// Radius of the caption outline, in pixels.
pub const OUTLINE_WIDTH: i32 = 2;

/// Prefix of the output file name when none is given explicitly.
pub const OUTPUT_NAME_PREFIX: &str = "meme_";

/// Quality of the generated JPEG images (in %).
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Timeout for fetching remote images.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);


/// Caption font size for an image of given height.
#[inline]
pub fn font_size_for(image_height: u32) -> u32 {
    image_height / FONT_SIZE_DIVISOR
}


#[cfg(test)]
mod tests {
    use super::font_size_for;

    #[test]
    fn font_size_is_tenth_of_height() {
        assert_eq!(40, font_size_for(400));
        assert_eq!(33, font_size_for(339));
        assert_eq!(0, font_size_for(9));
    }
}
