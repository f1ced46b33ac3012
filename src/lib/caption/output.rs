//! Defines the output of a captioning operation.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError, ImageFormat, ImageOutputFormat, RgbaImage};
use mime::{self, Mime};

use crate::resources::{write_atomic_to, DEFAULT_IMAGE_FORMAT};
use super::error::CaptionError;


/// Output of the captioning process: the finished image macro
/// and, once it's been saved, the path of its file.
#[derive(Clone, Debug)]
#[must_use = "unused caption output which must be used"]
pub struct CaptionOutput {
    image: RgbaImage,
    format: ImageFormat,
    jpeg_quality: u8,
    path: Option<PathBuf>,
}

impl CaptionOutput {
    #[inline]
    pub(super) fn new(image: RgbaImage, format: ImageFormat, jpeg_quality: u8) -> Self {
        CaptionOutput{image, format, jpeg_quality, path: None}
    }
}

impl CaptionOutput {
    /// The captioned image.
    #[inline]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    #[inline]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Image format the output is encoded with.
    #[inline]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Path where the output has been saved, if it was.
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The MIME type that matches output's format.
    pub fn mime_type(&self) -> Option<Mime> {
        match self.format {
            ImageFormat::Gif => Some(mime::IMAGE_GIF),
            ImageFormat::Jpeg => Some(mime::IMAGE_JPEG),
            ImageFormat::Png => Some(mime::IMAGE_PNG),
            _ => None,
        }
    }
}

impl CaptionOutput {
    /// Encode the image as bytes of the output's format.
    pub fn encode(&self) -> Result<Vec<u8>, ImageError> {
        let mut result = Cursor::new(Vec::new());
        match self.format {
            ImageFormat::Jpeg => {
                trace!("Writing JPEG with quality {}", self.jpeg_quality);
                // JPEG has no alpha channel.
                let img = DynamicImage::ImageRgba8(self.image.clone()).to_rgb8();
                DynamicImage::ImageRgb8(img)
                    .write_to(&mut result, ImageOutputFormat::Jpeg(self.jpeg_quality))?;
            }
            ImageFormat::Gif => {
                trace!("Writing still GIF");
                DynamicImage::ImageRgba8(self.image.clone())
                    .write_to(&mut result, ImageOutputFormat::Gif)?;
            }
            f => {
                if f != DEFAULT_IMAGE_FORMAT {
                    debug!("Cannot encode {:?}, using {:?} instead", f, DEFAULT_IMAGE_FORMAT);
                }
                trace!("Writing PNG image");
                DynamicImage::ImageRgba8(self.image.clone())
                    .write_to(&mut result, ImageOutputFormat::Png)?;
            }
        }
        Ok(result.into_inner())
    }

    /// Encode the output and write it to a file at given path,
    /// replacing the file whole.
    ///
    /// Returns the path written to, which is also remembered by the output.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<PathBuf, CaptionError> {
        let path = path.as_ref();
        debug!("Encoding final image as {:?}...", self.format);
        let bytes = self.encode()
            .map_err(|error| CaptionError::Encode{format: self.format, error})?;

        trace!("Writing {} bytes to {}", bytes.len(), path.display());
        let path = write_atomic_to(path, &bytes)
            .map_err(|error| CaptionError::Io{path: path.to_owned(), error})?;
        info!("Image macro saved to {}", path.display());

        self.path = Some(path.clone());
        Ok(path)
    }
}
