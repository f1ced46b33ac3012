//! Captioning error.

use std::io;
use std::path::PathBuf;

use image::{ImageError, ImageFormat};
use thiserror::Error;

use crate::resources::{FetchError, TemplateError};


/// Error that may occur while creating an image macro.
#[derive(Debug, Error)]
pub enum CaptionError {
    /// The template couldn't be found or loaded.
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// The remote source image couldn't be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// Source image bytes are not a valid image.
    #[error("cannot decode image from {origin}: {error}")]
    Decode {
        origin: String,
        #[source]
        error: ImageError,
    },
    /// Name of the output file doesn't denote a file in the output directory.
    #[error("invalid output file name `{0}`")]
    OutputName(String),
    /// The final image couldn't be encoded.
    #[error("failed to encode the final image as {format:?}: {error}")]
    Encode {
        format: ImageFormat,
        #[source]
        error: ImageError,
    },
    /// The final image couldn't be written.
    #[error("cannot write {}: {error}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
}

impl CaptionError {
    /// Whether this error means that the requested template doesn't exist.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        match *self {
            CaptionError::Template(ref e) => e.is_not_found(),
            _ => false,
        }
    }
}
