//! Module handling image macro templates.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::{self, DynamicImage, GenericImageView, ImageError, ImageFormat};
use thiserror::Error;

use super::{Loader, SharedFetcher};
use super::filesystem::{self, PathLoader};
use super::http::FetchError;


/// Default image format to use when encoding image macros.
pub const DEFAULT_IMAGE_FORMAT: ImageFormat = ImageFormat::Png;

lazy_static! {
    /// Map of template file extensions to supported image formats.
    pub static ref IMAGE_FORMAT_EXTENSIONS: HashMap<&'static str, ImageFormat> = hashmap!{
        "gif" => ImageFormat::Gif,
        "jpeg" => ImageFormat::Jpeg,
        "jpg" => ImageFormat::Jpeg,
        "png" => ImageFormat::Png,
    };
}

/// Image format implied by the file extension of given path, if it's a supported one.
pub fn format_for_path<P: AsRef<Path>>(path: P) -> Option<ImageFormat> {
    filesystem::extension(path)
        .and_then(|ext| IMAGE_FORMAT_EXTENSIONS.get(ext.as_str()).copied())
}


/// Represents an image macro template.
#[derive(Clone)]
pub struct Template {
    image: DynamicImage,
    format: ImageFormat,
}

impl Template {
    #[inline]
    pub fn new(image: DynamicImage, format: ImageFormat) -> Self {
        Template{image, format}
    }

    /// Decode the template from raw bytes.
    ///
    /// The image format is detected from the content;
    /// `format_hint` (e.g. derived from the file extension) takes precedence
    /// when deciding how to encode image macros made from this template.
    pub fn from_bytes(bytes: &[u8], format_hint: Option<ImageFormat>) -> Result<Self, ImageError> {
        let image = image::load_from_memory(bytes)?;
        let format = format_hint
            .or_else(|| image::guess_format(bytes).ok())
            .unwrap_or(DEFAULT_IMAGE_FORMAT);
        Ok(Template::new(image, format))
    }
}

impl Template {
    #[inline]
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    #[inline]
    pub fn into_image(self) -> DynamicImage {
        self.image
    }

    /// Format the template was loaded from.
    #[inline]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// The preferred format for image macros generated using this template.
    /// This is the same that the template was loaded from, if it can be encoded.
    pub fn preferred_format(&self) -> ImageFormat {
        match self.format {
            ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Gif => self.format,
            _ => DEFAULT_IMAGE_FORMAT,
        }
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.image.dimensions();
        write!(fmt, "Template({}x{}, {:?})", width, height, self.format)
    }
}


/// Error while handling a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No template of given name exists.
    #[error("template `{name}` not found in {}", .directory.display())]
    NotFound {
        name: String,
        directory: PathBuf,
    },
    /// Template name doesn't denote a file in the template directory.
    #[error("invalid template name `{0}`")]
    InvalidName(String),
    /// Fetching a template to store it has failed.
    #[error("failed to download template from {url}: {error}")]
    Download {
        url: String,
        #[source]
        error: FetchError,
    },
    /// Template file is not a valid image.
    #[error("cannot decode template `{name}`: {error}")]
    Decode {
        name: String,
        #[source]
        error: ImageError,
    },
    /// Template file couldn't be read or written.
    #[error("I/O error on template `{name}`: {error}")]
    Io {
        name: String,
        #[source]
        error: io::Error,
    },
}

impl TemplateError {
    /// Whether this error means that the template doesn't exist.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(*self, TemplateError::NotFound{..})
    }
}


/// File extensions of images that the store recognizes as templates.
const TEMPLATE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];


/// Directory of named template images.
///
/// Templates are identified by their complete file name (including the extension).
pub struct TemplateStore {
    files: PathLoader,
    fetcher: SharedFetcher,
}

impl TemplateStore {
    /// Create the store for given directory, creating the directory if necessary.
    ///
    /// Remote templates are fetched with given fetcher.
    pub fn new<D: AsRef<Path>>(directory: D, fetcher: SharedFetcher) -> io::Result<Self> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory)?;
        debug!("Template directory: {}", directory.display());
        Ok(TemplateStore{
            files: PathLoader::for_extensions(directory, TEMPLATE_EXTENSIONS),
            fetcher,
        })
    }

    #[inline]
    pub fn directory(&self) -> &Path {
        self.files.directory()
    }
}

impl TemplateStore {
    /// List the names of all available templates.
    ///
    /// Only files with image extensions are included.
    pub fn list(&self) -> Vec<String> {
        debug!("Listing all available templates...");
        let templates: Vec<_> = self.files.list().into_iter()
            .filter_map(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        debug!("{} template(s) found", templates.len());
        templates
    }

    /// Resolve the template name into a path of its file.
    ///
    /// The file is not checked for being a valid image.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, TemplateError> {
        self.files.load(name).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => TemplateError::NotFound{
                name: name.to_owned(),
                directory: self.directory().to_owned(),
            },
            io::ErrorKind::InvalidInput => TemplateError::InvalidName(name.to_owned()),
            _ => TemplateError::Io{name: name.to_owned(), error: e},
        })
    }

    /// Fetch the raw bytes from given URL, without storing them.
    #[inline]
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.fetcher.load(url)
    }

    /// Download a template from given URL and store it under given name.
    ///
    /// An existing template of the same name is replaced,
    /// but only after the download has succeeded.
    pub fn download(&self, url: &str, name: &str) -> Result<PathBuf, TemplateError> {
        if !filesystem::is_plain_file_name(name) {
            return Err(TemplateError::InvalidName(name.to_owned()));
        }
        debug!("Downloading template `{}` from {}", name, url);

        let bytes = self.fetch(url).map_err(|error| {
            error!("Failed to download template `{}`: {}", name, error);
            TemplateError::Download{url: url.to_owned(), error}
        })?;
        let path = filesystem::write_atomic(self.directory(), name, &bytes)
            .map_err(|error| TemplateError::Io{name: name.to_owned(), error})?;

        info!("Template `{}` ({} bytes) saved to {}", name, bytes.len(), path.display());
        Ok(path)
    }
}

impl Loader for TemplateStore {
    type Item = Template;
    type Err = TemplateError;

    /// Load and decode the template of given name.
    fn load(&self, name: &str) -> Result<Template, Self::Err> {
        let path = self.resolve(name)?;
        trace!("Opening image {}", path.display());
        let bytes = fs::read(&path)
            .map_err(|error| TemplateError::Io{name: name.to_owned(), error})?;
        let template = Template::from_bytes(&bytes, format_for_path(&path)).map_err(|error| {
            error!("Failed to open template image file {}: {}", path.display(), error);
            TemplateError::Decode{name: name.to_owned(), error}
        })?;
        debug!("Template `{}` opened successfully: {:?}", name, template);
        Ok(template)
    }
}

impl fmt::Debug for TemplateStore {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("TemplateStore")
            .field("directory", &self.directory())
            .finish()
    }
}
