//! Module with captioning engine configuration.

use crate::model::DEFAULT_JPEG_QUALITY;


/// Structure holding configuration for the `Engine`.
///
/// This is shared with `CaptionTask`s.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Quality of the generated JPEG images (in %).
    pub jpeg_quality: u8,
}

impl Default for Config {
    /// Initialize Config with default values.
    fn default() -> Self {
        Config {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}
