//! Module handling the resources used for captioning.

mod builtin_font;
mod filesystem;
mod fonts;
mod http;
mod templates;


pub use self::filesystem::{is_plain_file_name, write_atomic, PathLoader};
pub(crate) use self::filesystem::write_atomic_to;
pub use self::fonts::{Font, FontError, FontLoader};
pub use self::http::{FetchError, HttpLoader};
pub use self::templates::{format_for_path, DEFAULT_IMAGE_FORMAT, IMAGE_FORMAT_EXTENSIONS,
                          Template, TemplateError, TemplateStore};


use std::sync::Arc;


/// Loader of resources from some external source.
pub trait Loader {
    /// Type of resources that this loader can load.
    type Item;
    /// Error that may occur while loading the resource.
    type Err;

    /// Load a resource of given name.
    fn load(&self, name: &str) -> Result<Self::Item, Self::Err>;
}

/// Loader of raw bytes from URLs, shared between the template store and the engine.
pub type SharedFetcher = Arc<dyn Loader<Item=Vec<u8>, Err=FetchError> + Send + Sync>;
