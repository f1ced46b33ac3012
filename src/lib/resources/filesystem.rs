//! Module implementing the filesystem side of resource handling.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;

use super::Loader;


/// Loader for file paths from given directory.
///
/// The resources here are just file *paths* (std::path::PathBuf),
/// and no substantial "loading" is performed (only path resolution).
///
/// The predicate only affects `list`. Loading a name resolves
/// any regular file in the directory.
pub struct PathLoader {
    directory: PathBuf,
    predicate: Arc<dyn Fn(&Path) -> bool + Send + Sync>,
}

impl PathLoader {
    #[inline]
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        Self::with_predicate(directory, |_| true)
    }

    /// Create a loader which only lists files
    /// that have one of the extensions given (case-insensitively).
    pub fn for_extensions<D: AsRef<Path>, I, S>(directory: D, extensions: I) -> Self
        where I: IntoIterator<Item=S>, S: ToString
    {
        Self::with_predicate(directory, {
            let extensions: Vec<_> = extensions.into_iter()
                .map(|e| e.to_string()).map(|e| e.trim().to_lowercase())
                .collect();
            move |path| {
                let ext = extension(path);
                extensions.iter().any(|e| Some(e) == ext.as_ref())
            }
        })
    }

    pub fn with_predicate<D, P>(directory: D, predicate: P) -> Self
        where D: AsRef<Path>, P: Fn(&Path) -> bool + Send + Sync + 'static
    {
        PathLoader{
            directory: directory.as_ref().to_owned(),
            predicate: Arc::new(predicate),
        }
    }
}

impl PathLoader {
    #[inline]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// List the paths of all files in the directory that match the predicate.
    ///
    /// A missing directory is the same as an empty one.
    pub fn list(&self) -> Vec<PathBuf> {
        let escaped_dir = glob::Pattern::escape(&self.directory.to_string_lossy());
        let pattern = format!("{}", Path::new(&escaped_dir).join("*").display());
        trace!("Globbing with {}", pattern);

        let glob_iter = match glob::glob(&pattern) {
            Ok(it) => it,
            Err(e) => {
                error!("Failed to glob over files with {}: {}", pattern, e);
                return vec![];
            }
        };
        glob_iter
            .filter_map(|entry| entry.map_err(|e| {
                warn!("Cannot read an entry of {}: {}", self.directory.display(), e);
            }).ok())
            .filter(|path| path.is_file())
            .filter(|path| (self.predicate)(path))
            .collect()
    }
}

impl Loader for PathLoader {
    type Item = PathBuf;
    type Err = io::Error;

    /// "Load" a path "resource" from the loader's directory.
    fn load(&self, name: &str) -> Result<Self::Item, Self::Err> {
        if !is_plain_file_name(name) {
            return Err(io::Error::new(io::ErrorKind::InvalidInput,
                format!("`{}` is not a plain file name", name)));
        }
        let path = self.directory.join(name);
        if !path.is_file() {
            return Err(io::Error::new(io::ErrorKind::NotFound,
                format!("resource `{}` not found in {}", name, self.directory.display())));
        }
        Ok(path)
    }
}

impl fmt::Debug for PathLoader {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("PathLoader")
            .field("directory", &self.directory)
            .finish()
    }
}


/// Whether given name refers to a file directly inside some directory,
/// i.e. it's a single, normal path component.
pub fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(c)), None) => c == name,
        _ => false,
    }
}

/// Write the bytes to a file of given name in the directory, replacing it whole.
///
/// The content goes to a temporary file in the same directory first
/// and is then renamed over the target, so the target never holds partial data.
pub fn write_atomic<D: AsRef<Path>>(directory: D, name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    let directory = directory.as_ref();
    let path = directory.join(name);
    trace!("Writing {} bytes to {} via a temporary file", bytes.len(), path.display());

    let mut file = NamedTempFile::new_in(directory)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(&path).map_err(|e| e.error)?;
    Ok(path)
}

/// Same as `write_atomic` but for a complete target path.
pub(crate) fn write_atomic_to<P: AsRef<Path>>(path: P, bytes: &[u8]) -> io::Result<PathBuf> {
    let path = path.as_ref();
    let name = path.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput,
            format!("{} does not name a file", path.display()))
    })?;
    let directory = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(directory)?;
    write_atomic(directory, name, bytes)
}

/// Get the (useful part of) file extension from the path.
pub(crate) fn extension<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref().extension().and_then(|e| e.to_str())
        .map(|s| s.trim().to_lowercase())
}
