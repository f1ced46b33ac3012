//! Module implementing the builder for `Engine`.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::model::{DEFAULT_FONT_PATH, DEFAULT_HTTP_TIMEOUT,
                   DEFAULT_OUTPUT_DIRECTORY, DEFAULT_TEMPLATE_DIRECTORY};
use crate::resources::{FontLoader, HttpLoader, SharedFetcher, TemplateStore};
use super::super::text::{CaptionRenderer, OutlineRenderer};
use super::config::Config;
use super::{Engine, Inner};


/// Builder for `Engine`.
#[must_use = "unused builder which must be used"]
pub struct Builder<R = OutlineRenderer> {
    errors: Vec<Error>,

    template_directory: Option<PathBuf>,
    output_directory: Option<PathBuf>,
    font_loader: FontLoader,
    fetcher: Option<SharedFetcher>,
    http_timeout: Option<Duration>,

    jpeg_quality: Option<u8>,
    renderer: R,
}

impl Builder<OutlineRenderer> {
    /// Create a new `Builder`.
    #[inline]
    pub fn new() -> Self {
        Builder::default()
    }
}
impl Default for Builder<OutlineRenderer> {
    fn default() -> Self {
        Builder{
            errors: vec![],
            template_directory: None,
            output_directory: None,
            font_loader: FontLoader::new(DEFAULT_FONT_PATH),
            fetcher: None,
            http_timeout: None,
            jpeg_quality: None,
            renderer: OutlineRenderer,
        }
    }
}

// Setters.
impl<R> Builder<R> {
    /// Set the directory where the templates are kept.
    /// It will be created if it doesn't exist.
    #[inline]
    pub fn template_directory<P: AsRef<Path>>(mut self, directory: P) -> Self {
        self.template_directory = Some(directory.as_ref().to_owned()); self
    }

    /// Set the directory where finished image macros are written.
    /// It will be created if it doesn't exist.
    #[inline]
    pub fn output_directory<P: AsRef<Path>>(mut self, directory: P) -> Self {
        self.output_directory = Some(directory.as_ref().to_owned()); self
    }

    /// Set the path to the TrueType/OpenType font to render captions with.
    ///
    /// If the font cannot be loaded, the built-in font is used instead.
    #[inline]
    pub fn font_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.font_loader = FontLoader::new(path); self
    }

    /// Always render captions with the built-in font.
    #[inline]
    pub fn builtin_font(mut self) -> Self {
        self.font_loader = FontLoader::builtin(); self
    }

    /// Set a custom loader for fetching remote images.
    #[inline]
    pub fn fetcher(mut self, fetcher: SharedFetcher) -> Self {
        self.fetcher = Some(fetcher); self
    }

    /// Set the timeout of HTTP requests made by the default fetcher.
    #[inline]
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = Some(timeout); self
    }

    /// Set the quality percentage of JPEG images generated by the `Engine`.
    #[inline]
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        if !(1..=100).contains(&quality) {
            return self.err(Error::JpegQuality(quality));
        }
        self.jpeg_quality = Some(quality); self
    }

    /// Set a custom renderer of caption text.
    pub fn renderer<R2: CaptionRenderer>(self, renderer: R2) -> Builder<R2> {
        Builder{
            errors: self.errors,
            template_directory: self.template_directory,
            output_directory: self.output_directory,
            font_loader: self.font_loader,
            fetcher: self.fetcher,
            http_timeout: self.http_timeout,
            jpeg_quality: self.jpeg_quality,
            renderer,
        }
    }
}

// Validation & building.
impl<R: CaptionRenderer> Builder<R> {
    /// Build the `Engine`.
    ///
    /// This creates the template & output directories if necessary,
    /// and loads the font.
    pub fn build(mut self) -> Result<Engine<R>, Error> {
        self.check_errors()?;
        let config = self.build_config();

        let template_directory = self.template_directory
            .unwrap_or_else(|| DEFAULT_TEMPLATE_DIRECTORY.into());
        let output_directory = self.output_directory
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIRECTORY.into());

        let fetcher: SharedFetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => {
                let timeout = self.http_timeout.unwrap_or(DEFAULT_HTTP_TIMEOUT);
                trace!("Using HTTP fetcher with {:?} timeout", timeout);
                Arc::new(HttpLoader::with_timeout(timeout).map_err(Error::Http)?)
            }
        };
        let templates = TemplateStore::new(&template_directory, fetcher)
            .map_err(|e| Error::directory("template", template_directory, e))?;
        fs::create_dir_all(&output_directory)
            .map_err(|e| Error::directory("output", output_directory.clone(), e))?;

        let font = self.font_loader.resolve();
        debug!("Captions will be rendered with {:?}", font);

        Ok(Engine::from(Inner::new(config, templates, output_directory, font, self.renderer)))
    }
}
impl<R> Builder<R> {
    #[doc(hidden)]
    fn build_config(&self) -> Config {
        let mut config = Config::default();
        if let Some(quality) = self.jpeg_quality {
            config.jpeg_quality = quality;
        }
        config
    }

    #[doc(hidden)]
    fn check_errors(&mut self) -> Result<(), Error> {
        if self.fetcher.is_some() && self.http_timeout.is_some() {
            self.errors.push(Error::FetcherConflict);
        }
        if !self.errors.is_empty() {
            return Err(self.errors.remove(0));
        }
        Ok(())
    }

    #[doc(hidden)]
    fn err(mut self, error: Error) -> Self {
        self.errors.push(error); self
    }
}

impl<R: fmt::Debug> fmt::Debug for Builder<R> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Builder")
            .field("errors", &self.errors)
            .field("template_directory", &self.template_directory)
            .field("output_directory", &self.output_directory)
            .field("font_loader", &self.font_loader)
            .field("fetcher", &self.fetcher.as_ref().map(|_| "<custom>"))
            .field("http_timeout", &self.http_timeout)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("renderer", &self.renderer)
            .finish()
    }
}


/// Error that resulted from misconfiguration of the `Engine` via its `Builder`.
#[derive(Debug, Error)]
pub enum Error {
    /// JPEG quality outside of the 1-100 range.
    #[error("invalid JPEG quality {0}%, must be between 1 and 100")]
    JpegQuality(u8),

    /// Both a custom fetcher and a timeout for the default one were given.
    #[error("HTTP timeout cannot be combined with a custom fetcher")]
    FetcherConflict,

    /// Template or output directory couldn't be created.
    #[error("cannot create {what} directory {}: {error}", .path.display())]
    Directory {
        what: &'static str,
        path: PathBuf,
        #[source]
        error: io::Error,
    },

    /// The HTTP client couldn't be set up.
    #[error("cannot set up the HTTP client: {0}")]
    Http(#[source] reqwest::Error),
}

impl Error {
    #[inline]
    fn directory(what: &'static str, path: PathBuf, error: io::Error) -> Self {
        Error::Directory{what, path, error}
    }
}
