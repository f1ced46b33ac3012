//! Module defining the vertical alignment of captions.


/// Vertical placement of a caption within the image.
///
/// Image macros have exactly two text zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VAlign {
    /// Caption near the top edge.
    Top,
    /// Caption near the bottom edge.
    Bottom,
}

impl VAlign {
    /// Y coordinate of the top of the caption's text line
    /// for an image of given height and a given font size.
    ///
    /// The top caption is pushed down by one line height,
    /// while the bottom one reserves two line heights below it.
    pub fn anchor_y(self, image_height: u32, font_size: u32) -> i32 {
        let font_size = font_size as i32;
        match self {
            VAlign::Top => font_size,
            VAlign::Bottom => image_height as i32 - 2 * font_size,
        }
    }
}
