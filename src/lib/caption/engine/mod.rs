//! Module which defines the captioning engine.

mod builder;
mod config;

pub use self::builder::{Builder, Error as BuildError};
pub use self::config::Config;


use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{DynamicImage, RgbaImage};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::model::{CaptionRequest, OUTPUT_NAME_PREFIX};
use crate::resources::{format_for_path, is_plain_file_name, Font, Loader,
                       Template, TemplateError, TemplateStore};
use super::error::CaptionError;
use super::output::CaptionOutput;
use super::task::CaptionTask;
use super::text::{CaptionRenderer, OutlineRenderer};


/// Image captioning engine.
///
/// The engine is thread-safe (`Sync`) so that it can be shared
/// between the threads handling separate requests.
///
/// *Note*: `Engine` implements `Clone`
/// by merely cloning a shared reference to the underlying object.
pub struct Engine<R = OutlineRenderer> {
    inner: Arc<Inner<R>>,
}

/// Shared state of the engine that caption tasks have access to.
#[derive(Debug)]
pub(super) struct Inner<R> {
    pub(super) config: RwLock<Config>,
    pub templates: TemplateStore,
    pub output_directory: PathBuf,
    pub font: Font,
    pub renderer: R,
}

impl<R> Inner<R> {
    #[inline]
    pub fn new(config: Config,
               templates: TemplateStore,
               output_directory: PathBuf,
               font: Font,
               renderer: R) -> Self {
        let config = RwLock::new(config);
        Inner{config, templates, output_directory, font, renderer}
    }
}

impl<R> From<Inner<R>> for Engine<R> {
    fn from(inner: Inner<R>) -> Self {
        Engine{inner: Arc::new(inner)}
    }
}

impl<R> Clone for Engine<R> {
    fn clone(&self) -> Self {
        Engine{inner: self.inner.clone()}
    }
}

impl<R: fmt::Debug> fmt::Debug for Engine<R> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Engine").field("inner", &self.inner).finish()
    }
}

// Constructors.
impl Engine<OutlineRenderer> {
    /// Create an Engine which keeps templates & image macros in given directory paths.
    ///
    /// For other ways of creating `Engine`, see the `EngineBuilder`.
    #[inline]
    pub fn new<Dt, Do>(template_directory: Dt, output_directory: Do) -> Result<Self, BuildError>
        where Dt: AsRef<Path>, Do: AsRef<Path>
    {
        Builder::new()
            .template_directory(template_directory)
            .output_directory(output_directory)
            .build()
    }

    #[inline]
    pub fn builder() -> Builder {
        Builder::new()
    }
}


// Image macro captioning.
impl<R: CaptionRenderer> Engine<R> {
    /// Create an image macro from a stored template and write it to the output directory.
    ///
    /// The file is named `output_name`, or after the template (with a prefix) if not given.
    /// Its format is the one implied by that name, or the template's own.
    /// Returns the path of the file.
    pub fn create_from_template(&self, name: &str,
                                top_text: &str, bottom_text: &str,
                                output_name: Option<&str>) -> Result<PathBuf, CaptionError> {
        let template = self.inner.templates.load(name)?;

        let output_name = output_name.map(str::to_owned)
            .unwrap_or_else(|| format!("{}{}", OUTPUT_NAME_PREFIX, name));
        if !is_plain_file_name(&output_name) {
            return Err(CaptionError::OutputName(output_name));
        }
        let format = format_for_path(&output_name)
            .unwrap_or_else(|| template.preferred_format());

        let image = self.caption(template.into_image(), &CaptionRequest::new(top_text, bottom_text));
        let mut output = CaptionOutput::new(image, format, self.config().jpeg_quality);
        output.save(self.inner.output_directory.join(&output_name))
    }

    /// Create an image macro from an image at given URL.
    ///
    /// The result is kept in memory; see `CaptionOutput::save` for writing it out.
    pub fn create_from_url(&self, url: &str,
                           top_text: &str, bottom_text: &str) -> Result<CaptionOutput, CaptionError> {
        let bytes = self.inner.templates.fetch(url)?;
        let source = Template::from_bytes(&bytes, None).map_err(|error| {
            error!("Image fetched from {} cannot be decoded: {}", url, error);
            CaptionError::Decode{origin: url.to_owned(), error}
        })?;
        debug!("Source image fetched from {}: {:?}", url, source);

        let format = source.preferred_format();
        let image = self.caption(source.into_image(), &CaptionRequest::new(top_text, bottom_text));
        Ok(CaptionOutput::new(image, format, self.config().jpeg_quality))
    }

    /// Caption given image with the texts from the request.
    ///
    /// Note that captioning is a CPU-intensive process and can be relatively lengthy.
    #[inline]
    pub fn caption(&self, image: DynamicImage, request: &CaptionRequest) -> RgbaImage {
        CaptionTask::new(request.clone(), self.inner.clone()).perform(image)
    }
}

// Managing templates.
impl<R> Engine<R> {
    /// The store of templates used by this engine.
    #[inline]
    pub fn templates(&self) -> &TemplateStore {
        &self.inner.templates
    }

    /// List the names of all available templates.
    #[inline]
    pub fn list_templates(&self) -> Vec<String> {
        self.inner.templates.list()
    }

    /// Download a template from given URL and store it under given name.
    #[inline]
    pub fn download_template(&self, url: &str, name: &str) -> Result<PathBuf, TemplateError> {
        self.inner.templates.download(url, name)
    }

    /// Directory where image macros made from templates are written.
    #[inline]
    pub fn output_directory(&self) -> &Path {
        &self.inner.output_directory
    }

    /// Font that the captions are rendered with.
    #[inline]
    pub fn font(&self) -> &Font {
        &self.inner.font
    }
}

// Configuration.
impl<R> Engine<R> {
    /// Read the `Engine`'s configuration.
    #[inline]
    pub fn config(&self) -> RwLockReadGuard<'_, Config> {
        self.inner.config.read()
    }

    /// Modify the `Engine`'s configuration.
    ///
    /// Changes will affect both pending and future captioning tasks.
    #[inline]
    pub fn config_mut(&self) -> RwLockWriteGuard<'_, Config> {
        self.inner.config.write()
    }
}
